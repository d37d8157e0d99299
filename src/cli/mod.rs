//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Wardlens using clap.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

/// Wardlens - Hospital Operations Analytics
#[derive(Parser, Debug)]
#[command(name = "wardlens")]
#[command(version, about, long_about = None)]
#[command(author = "Wardlens Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "wardlens.toml", env = "WARDLENS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WARDLENS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the operational overview
    Report(commands::report::ReportArgs),

    /// Show per-department summaries and monthly trends
    Departments(commands::departments::DepartmentsArgs),

    /// List operational action items
    Review(commands::review::ReviewArgs),

    /// Search and page through live admissions
    Patients(commands::patients::PatientsArgs),

    /// Record a new live admission
    Admit(commands::admit::AdmitArgs),

    /// Follow the live feed and print headline metrics on every change
    Watch(commands::watch::WatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from(["wardlens", "report"]);
        assert_eq!(cli.config, "wardlens.toml");
        assert!(matches!(cli.command, Commands::Report(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["wardlens", "--config", "custom.toml", "report"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["wardlens", "--log-level", "debug", "review"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Review(_)));
    }

    #[test]
    fn test_cli_parse_report_json_for_department() {
        let cli = Cli::parse_from([
            "wardlens",
            "report",
            "--department",
            "Cardiology",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.department.as_deref(), Some("Cardiology"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_patients() {
        let cli = Cli::parse_from([
            "wardlens", "patients", "--search", "ali", "--case-type", "IP", "--sort", "severity",
            "--asc", "--page", "2",
        ]);
        match cli.command {
            Commands::Patients(args) => {
                assert_eq!(args.search.as_deref(), Some("ali"));
                assert_eq!(args.case_type.as_deref(), Some("IP"));
                assert!(args.asc);
                assert_eq!(args.page, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_admit() {
        let cli = Cli::parse_from([
            "wardlens",
            "admit",
            "--patient",
            "Jane Doe",
            "--department",
            "Cardiology",
            "--severity",
            "2",
            "--doctor",
            "Dr. Sarah Johnson",
            "--case-type",
            "IP",
        ]);
        assert!(matches!(cli.command, Commands::Admit(_)));
    }

    #[test]
    fn test_cli_parse_watch_departments_validate_init() {
        assert!(matches!(
            Cli::parse_from(["wardlens", "watch"]).command,
            Commands::Watch(_)
        ));
        assert!(matches!(
            Cli::parse_from(["wardlens", "departments"]).command,
            Commands::Departments(_)
        ));
        assert!(matches!(
            Cli::parse_from(["wardlens", "validate-config"]).command,
            Commands::ValidateConfig(_)
        ));
        assert!(matches!(
            Cli::parse_from(["wardlens", "init"]).command,
            Commands::Init(_)
        ));
    }
}
