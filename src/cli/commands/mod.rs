//! CLI command implementations
//!
//! This module contains all CLI command implementations. Commands return the
//! process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 3 | Validation error |
//! | 4 | Source or store unreachable |
//! | 5 | Fatal error |

pub mod admit;
pub mod departments;
pub mod init;
pub mod patients;
pub mod report;
pub mod review;
pub mod session;
pub mod validate;
pub mod watch;

use crate::config::load_config;
use crate::core::scope::AccessScope;
use crate::domain::WardlensError;
use serde::Serialize;
use session::Session;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_VALIDATION: i32 = 3;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error that ended a command
pub fn exit_code_for(error: &WardlensError) -> i32 {
    match error {
        WardlensError::Configuration(_) => EXIT_CONFIG,
        WardlensError::Validation(_) => EXIT_VALIDATION,
        WardlensError::Source(_) | WardlensError::Store(_) => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}

/// Prints the failure line and returns the exit code for it
pub(crate) fn report_failure(context: &str, error: &WardlensError) -> i32 {
    tracing::error!(error = %error, "{context}");
    println!("❌ {context}");
    println!("   Error: {error}");
    exit_code_for(error)
}

/// Loads the configuration and opens a session, narrowed to `department`
/// when given
///
/// On failure the problem is printed and the exit code returned as `Err`.
pub(crate) async fn open_session(
    config_path: &str,
    department: Option<&str>,
) -> std::result::Result<Session, i32> {
    let config = load_config(config_path)
        .map_err(|e| report_failure("Failed to load configuration", &e))?;

    let scope = match department {
        Some(department) => config.access.narrow(department),
        None => config.access.clone(),
    };
    tracing::info!(scope = %scope_label(&scope), "Opening data sources");

    Session::open(&config, scope)
        .await
        .map_err(|e| report_failure("Failed to load hospital data", &e))
}

/// Human description of what a scope can see
pub(crate) fn scope_label(scope: &AccessScope) -> String {
    match (scope.unrestricted, scope.department.as_deref()) {
        (true, _) => "all departments".to_string(),
        (false, Some(department)) => department.to_string(),
        (false, None) => "no departments".to_string(),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SourceError, StoreError, ValidationFailure};

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&WardlensError::Configuration("x".to_string())),
            EXIT_CONFIG
        );
        assert_eq!(
            exit_code_for(&ValidationFailure::new(Vec::new()).into()),
            EXIT_VALIDATION
        );
        assert_eq!(
            exit_code_for(&SourceError::NotFound("data.csv".to_string()).into()),
            EXIT_CONNECTION
        );
        assert_eq!(
            exit_code_for(&StoreError::Timeout("slow".to_string()).into()),
            EXIT_CONNECTION
        );
        assert_eq!(
            exit_code_for(&WardlensError::Feed("gone".to_string())),
            EXIT_FATAL
        );
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(scope_label(&AccessScope::unrestricted()), "all departments");
        assert_eq!(scope_label(&AccessScope::department("Cardiology")), "Cardiology");
        assert_eq!(scope_label(&AccessScope::default()), "no departments");
    }

    #[tokio::test]
    async fn test_open_session_missing_config() {
        let code = open_session("/no/such/wardlens.toml", None).await.err();
        assert_eq!(code, Some(EXIT_CONFIG));
    }
}
