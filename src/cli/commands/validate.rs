//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Wardlens configuration file.

use super::{scope_label, EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, StoreKind};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Historical Source: {}", config.historical.source);
        match config.store.kind {
            StoreKind::Memory => println!("  Admission Store: memory"),
            StoreKind::Rest => {
                println!("  Admission Store: rest");
                if let Some(base_url) = &config.store.base_url {
                    println!("  Store URL: {base_url}");
                }
                println!("  Store Table: {}", config.store.table);
                println!(
                    "  API Key: {}",
                    if config.store.api_key.is_some() {
                        "set"
                    } else {
                        "not set"
                    }
                );
                println!("  Poll Interval: {} ms", config.store.poll_interval_ms);
            }
        }
        println!("  Echo Inserts: {}", config.store.echo_inserts);
        println!("  Access: {}", scope_label(&config.access));
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(EXIT_OK)
    }
}
