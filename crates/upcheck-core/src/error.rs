//! Error types for probing, collection and export.

use std::path::PathBuf;
use thiserror::Error;

use crate::collector::CollectionState;
use crate::domain::Domain;

/// Errors raised by a [`HostPlatform`](crate::ports::HostPlatform) query.
///
/// Any of these is unrecoverable for the probe that hit it.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// An OS entry point is missing or the call failed.
    #[error("{operation} failed with status: {code:#x}")]
    InterfaceUnavailable { operation: String, code: i64 },

    /// The call succeeded but returned data that could not be decoded.
    #[error("{operation} returned malformed data: {reason}")]
    Malformed { operation: String, reason: String },
}

impl ProbeError {
    /// Interface failure with its OS status code.
    ///
    /// Negative `i32` codes (HRESULT, NTSTATUS) are stored as their unsigned
    /// 32-bit pattern, so they print as `0x80070005`.
    pub fn unavailable(operation: impl Into<String>, code: impl Into<i64>) -> Self {
        Self::InterfaceUnavailable {
            operation: operation.into(),
            code: status_bits(code.into()),
        }
    }

    pub fn malformed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Name of the OS operation that failed.
    pub fn operation(&self) -> &str {
        match self {
            Self::InterfaceUnavailable { operation, .. } | Self::Malformed { operation, .. } => {
                operation
            }
        }
    }
}

fn status_bits(code: i64) -> i64 {
    match i32::try_from(code) {
        Ok(signed) if signed < 0 => i64::from(u32::from_ne_bytes(signed.to_ne_bytes())),
        _ => code,
    }
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// A probe could not run at all; collection stops and the process must exit.
#[derive(Debug, Error)]
#[error("{domain} probe could not complete: {source}")]
pub struct FatalCollectionError {
    pub domain: Domain,
    #[source]
    pub source: ProbeError,
}

/// Why [`Collector::run`](crate::collector::Collector::run) returned early.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The collector already ran (or is running); it runs once.
    #[error("Collection was already started (state: {0:?})")]
    AlreadyStarted(CollectionState),

    #[error(transparent)]
    Fatal(#[from] FatalCollectionError),
}

impl CollectionError {
    /// The fatal probe failure, if that is what stopped the run.
    pub const fn fatal(&self) -> Option<&FatalCollectionError> {
        match self {
            Self::Fatal(err) => Some(err),
            Self::AlreadyStarted(_) => None,
        }
    }
}

/// Errors writing the exported report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create report {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_display_includes_operation_and_code() {
        let err = ProbeError::unavailable("RtlGetVersion", 0xC000_0001_i64);
        assert_eq!(err.operation(), "RtlGetVersion");
        assert_eq!(err.to_string(), "RtlGetVersion failed with status: 0xc0000001");
    }

    #[test]
    fn test_negative_hresult_is_shown_as_unsigned() {
        // E_ACCESSDENIED as windows-rs hands it over
        let err = ProbeError::unavailable("CreateDXGIFactory1", -2_147_024_891_i32);
        assert!(matches!(
            err,
            ProbeError::InterfaceUnavailable { code: 0x8007_0005, .. }
        ));
        assert_eq!(
            err.to_string(),
            "CreateDXGIFactory1 failed with status: 0x80070005"
        );
    }

    #[test]
    fn test_unsigned_win32_error_is_unchanged() {
        let err = ProbeError::unavailable("RegOpenKeyExW", 2_u32);
        assert_eq!(err.to_string(), "RegOpenKeyExW failed with status: 0x2");
    }

    #[test]
    fn test_fatal_error_names_domain() {
        let err = FatalCollectionError {
            domain: Domain::Boot,
            source: ProbeError::malformed("Tbsi_GetDeviceInfo", "short buffer"),
        };
        assert!(err.to_string().starts_with("boot probe could not complete"));
    }
}
