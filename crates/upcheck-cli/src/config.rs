//! Settings file handling.
//!
//! The settings file is JSON next to the binary's working directory. A
//! missing file is created with defaults on first run.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use upcheck_core::{Settings, validate_settings};

use crate::error::CliError;

/// Load the settings file, creating it with defaults when missing.
pub fn load_or_create(path: &Path) -> Result<Settings, CliError> {
    if !path.exists() {
        let settings = Settings::with_defaults();
        save(path, &settings)?;
        info!(path = %path.display(), "Settings file created");
        return Ok(settings);
    }

    let text = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&text)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    validate_settings(&settings)?;
    debug!(path = %path.display(), ?settings, "Settings loaded");
    Ok(settings)
}

/// Write settings as pretty JSON.
pub fn save(path: &Path, settings: &Settings) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(settings)
        .map_err(|e| CliError::Config(format!("Failed to serialize settings: {e}")))?;
    fs::write(path, text)?;
    Ok(())
}

/// Persist `locale` in the settings file, leaving other fields as stored.
pub fn save_locale(path: &Path, locale: &str) -> Result<(), CliError> {
    let mut settings = load_or_create(path)?;
    settings.locale = Some(locale.to_string());
    validate_settings(&settings)?;
    save(path, &settings)?;
    info!(locale, path = %path.display(), "Locale saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use upcheck_core::DEFAULT_LOG_FILE;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");

        let settings = load_or_create(&path).unwrap();
        assert_eq!(settings, Settings::with_defaults());
        assert!(path.exists());

        let reloaded = load_or_create(&path).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_partial_file_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, r#"{ "color": false }"#).unwrap();

        let settings = load_or_create(&path).unwrap();
        assert!(!settings.effective_color());
        assert_eq!(settings.effective_log_file(), Path::new(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_invalid_locale_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, r#"{ "locale": "english" }"#).unwrap();

        let err = load_or_create(&path).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, "[ini]").unwrap();

        assert!(matches!(load_or_create(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_save_locale_keeps_other_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, r#"{ "export_dir": "reports" }"#).unwrap();

        save_locale(&path, "tr_tr").unwrap();

        let settings = load_or_create(&path).unwrap();
        assert_eq!(settings.locale.as_deref(), Some("tr_tr"));
        assert_eq!(settings.export_dir.as_deref(), Some("reports"));
    }
}
