//! Result type alias for Wardlens

use super::errors::WardlensError;

/// Result type alias for Wardlens operations
///
/// # Examples
///
/// ```
/// use wardlens::domain::result::Result;
/// use wardlens::domain::errors::WardlensError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(WardlensError::Feed("cache stopped".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, WardlensError>;
