//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "wardlens.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Wardlens configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point historical.source at your case dataset");
                println!("  2. Keep store.kind = \"memory\" or switch to \"rest\"");
                println!("  3. For a REST store, set WARDLENS_STORE_API_KEY in .env");
                println!("  4. Validate configuration: wardlens validate-config");
                println!("  5. Show the overview: wardlens report");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Wardlens Configuration File
# Hospital operations analytics

[application]
log_level = "info"

[historical]
source = "data/hospital_data.csv"

[store]
kind = "memory"

[access]
unrestricted = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and detailed comments
    fn generate_config_with_examples() -> String {
        r#"# Wardlens Configuration File
# Hospital operations analytics
#
# Values may reference environment variables with ${VAR_NAME}; every
# WARDLENS_<SECTION>_<KEY> variable overrides the matching setting.

[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

[historical]
# Comma-separated case dataset, one header line then one case per line.
# A local path or an http(s) URL.
source = "data/hospital_data.csv"
# source = "https://data.example.com/hospital_data.csv"

# Timeout for remote sources
timeout_seconds = 30

[store]
# Live admission store: memory | rest
kind = "memory"

# PostgREST-style store settings (kind = "rest")
# base_url = "https://your-project.example.co"
# api_key = "${WARDLENS_STORE_API_KEY}"
table = "patient_admissions"

# How often the change feed polls the table
poll_interval_ms = 2000
timeout_seconds = 30

# Whether inserted rows come back through the change feed. When false the
# confirmed row is added to the local view directly.
echo_inserts = true

[access]
# Unrestricted callers see every department. Otherwise set a single
# department; leaving both unset shows nothing.
unrestricted = true
# department = "Cardiology"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# Rotation: daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
