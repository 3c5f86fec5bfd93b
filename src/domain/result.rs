//! Result type alias for ShiftSync

use super::errors::ShiftSyncError;

/// Result type alias for ShiftSync operations
///
/// # Examples
///
/// ```
/// use shiftsync::domain::result::Result;
/// use shiftsync::domain::errors::ShiftSyncError;
///
/// fn failing_function() -> Result<()> {
///     Err(ShiftSyncError::Other("boom".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ShiftSyncError>;
