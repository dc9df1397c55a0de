//! CLI-specific error types and exit code mapping.

use thiserror::Error;
use upcheck_core::{CatalogError, CollectionError, FatalCollectionError, SettingsError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A probe could not complete; the run is void.
    #[error("System information processing failed: {0}")]
    Collection(String),

    /// Settings file unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Locale catalog missing or malformed.
    #[error("Language file error: {0}")]
    Locale(String),

    /// Logging could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// A failed collection exits with 1; other categories follow sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Collection(_) => 1,
            Self::Locale(_) => 66,  // EX_NOINPUT
            Self::Logging(_) => 70, // EX_SOFTWARE
            Self::Io(_) => 74,      // EX_IOERR
            Self::Config(_) => 78,  // EX_CONFIG
        }
    }
}

impl From<FatalCollectionError> for CliError {
    fn from(err: FatalCollectionError) -> Self {
        Self::Collection(err.to_string())
    }
}

impl From<CollectionError> for CliError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::Fatal(fatal) => fatal.into(),
            other @ CollectionError::AlreadyStarted(_) => Self::Collection(other.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::Locale(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upcheck_core::{CollectionState, Domain, ProbeError};

    #[test]
    fn test_fatal_collection_exits_with_one() {
        let err: CliError = FatalCollectionError {
            domain: Domain::Os,
            source: ProbeError::unavailable("RtlGetVersion", 0xC000_0002_i64),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("RtlGetVersion"));
    }

    #[test]
    fn test_rejected_second_run_maps_to_collection_error() {
        let err: CliError = CollectionError::AlreadyStarted(CollectionState::Completed).into();
        assert!(matches!(err, CliError::Collection(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("bad".into()).exit_code(), 78);
        assert_eq!(CliError::Locale("missing".into()).exit_code(), 66);
        assert_eq!(CliError::Io("denied".into()).exit_code(), 74);
        assert_eq!(CliError::Logging("twice".into()).exit_code(), 70);
    }

    #[test]
    fn test_settings_error_maps_to_config() {
        let err: CliError = SettingsError::InvalidLocale("english".into()).into();
        assert!(matches!(err, CliError::Config(_)));
    }
}
