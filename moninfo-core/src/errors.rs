//! Error types for `moninfo_core`.
//!
//! Every failure of the query boundary is funnelled through
//! [`MonitorInfoError`], which uses `thiserror` for `Display` and `Error`
//! derives.  Field-level problems are never errors: accessors return
//! `None` and the decoder substitutes a default.

use thiserror::Error;

#[cfg(windows)]
use windows::core::Error as WindowsError;

/// Top-level error type for the `moninfo_core` library.
///
/// Each variant corresponds to one stage of the WMI round trip.
#[derive(Debug, Error)]
pub enum MonitorInfoError {
    /// COM apartment initialisation or a raw HRESULT failure.
    #[error("ComError: {0}")]
    ComError(String),

    /// Could not connect to the WMI namespace.
    #[error("ConnectError: {0}")]
    ConnectError(String),

    /// `ExecQuery` or result enumeration failed.
    #[error("QueryError: {0}")]
    QueryError(String),

    /// No WMI engine exists on this platform.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Convert a `windows::core::Error` (COM / Win32 HRESULT failure) into a
/// `MonitorInfoError::ComError`.
#[cfg(windows)]
impl From<WindowsError> for MonitorInfoError {
    fn from(err: WindowsError) -> Self {
        MonitorInfoError::ComError(format!("Windows COM error: {err}"))
    }
}
