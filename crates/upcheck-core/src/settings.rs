//! Settings domain types and validation.
//!
//! Pure types; reading and writing the settings file is done by the binary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default directory holding the `<locale>.json` catalogs.
pub const DEFAULT_LOCALE_DIR: &str = "i18n";

/// Default directory for exported reports.
pub const DEFAULT_EXPORT_DIR: &str = ".";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "upcheck.log";

/// Application settings.
///
/// All fields are optional so a partial file still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Locale file stem, e.g. `en_us`. `None` follows the system locale.
    pub locale: Option<String>,

    /// Directory containing locale catalogs.
    pub locale_dir: Option<String>,

    /// Directory reports are written to.
    pub export_dir: Option<String>,

    /// Log file path.
    pub log_file: Option<String>,

    /// Coloured terminal output.
    pub color: Option<bool>,
}

impl Settings {
    /// Settings with every default filled in.
    pub fn with_defaults() -> Self {
        Self {
            locale: None,
            locale_dir: Some(DEFAULT_LOCALE_DIR.to_string()),
            export_dir: Some(DEFAULT_EXPORT_DIR.to_string()),
            log_file: Some(DEFAULT_LOG_FILE.to_string()),
            color: Some(true),
        }
    }

    pub fn effective_locale_dir(&self) -> PathBuf {
        PathBuf::from(self.locale_dir.as_deref().unwrap_or(DEFAULT_LOCALE_DIR))
    }

    pub fn effective_export_dir(&self) -> PathBuf {
        PathBuf::from(self.export_dir.as_deref().unwrap_or(DEFAULT_EXPORT_DIR))
    }

    pub fn effective_log_file(&self) -> PathBuf {
        PathBuf::from(self.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE))
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Apply overrides; only fields that are `Some` change.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref locale) = other.locale {
            self.locale.clone_from(locale);
        }
        if let Some(ref dir) = other.locale_dir {
            self.locale_dir.clone_from(dir);
        }
        if let Some(ref dir) = other.export_dir {
            self.export_dir.clone_from(dir);
        }
        if let Some(ref file) = other.log_file {
            self.log_file.clone_from(file);
        }
        if let Some(color) = other.color {
            self.color = color;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset the field
/// - `Some(Some(value))` = set the field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub locale: Option<Option<String>>,
    pub locale_dir: Option<Option<String>>,
    pub export_dir: Option<Option<String>>,
    pub log_file: Option<Option<String>>,
    pub color: Option<Option<bool>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Locale must look like 'en_us', got '{0}'")]
    InvalidLocale(String),

    #[error("{0} cannot be empty")]
    EmptyPath(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(locale) = &settings.locale {
        if !is_locale_stem(locale) {
            return Err(SettingsError::InvalidLocale(locale.clone()));
        }
    }

    let paths = [
        ("Locale directory", &settings.locale_dir),
        ("Export directory", &settings.export_dir),
        ("Log file", &settings.log_file),
    ];
    for (name, value) in paths {
        if value.as_ref().is_some_and(|p| p.trim().is_empty()) {
            return Err(SettingsError::EmptyPath(name));
        }
    }

    Ok(())
}

/// `<lang>_<country>` made of ASCII letters, e.g. `en_us` or `tr_TR`.
fn is_locale_stem(locale: &str) -> bool {
    let mut parts = locale.split('_');
    let valid = |part: Option<&str>| {
        part.is_some_and(|p| {
            (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic())
        })
    };
    valid(parts.next()) && valid(parts.next()) && parts.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.locale, None);
        assert_eq!(settings.effective_locale_dir(), PathBuf::from("i18n"));
        assert_eq!(settings.effective_log_file(), PathBuf::from("upcheck.log"));
        assert!(settings.effective_color());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_settings_fall_back_to_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.effective_export_dir(), PathBuf::from("."));
        assert!(settings.effective_color());
    }

    #[test]
    fn test_partial_json_loads() {
        let settings: Settings = serde_json::from_str(r#"{"locale": "tr_tr"}"#).unwrap();
        assert_eq!(settings.locale.as_deref(), Some("tr_tr"));
        assert_eq!(settings.color, None);
    }

    #[test]
    fn test_validate_locale() {
        let mut settings = Settings::with_defaults();
        settings.locale = Some("en_US".into());
        assert!(validate_settings(&settings).is_ok());

        for bad in ["english", "en-us", "e_us", "en_us_x", "../en_us"] {
            settings.locale = Some(bad.into());
            assert!(
                matches!(validate_settings(&settings), Err(SettingsError::InvalidLocale(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_validate_empty_paths() {
        let settings = Settings {
            export_dir: Some("  ".into()),
            ..Settings::with_defaults()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyPath("Export directory"))
        ));
    }

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            locale: Some(Some("tr_tr".into())),
            color: Some(Some(false)),
            ..Default::default()
        });
        assert_eq!(settings.locale.as_deref(), Some("tr_tr"));
        assert_eq!(settings.color, Some(false));
        assert_eq!(settings.log_file.as_deref(), Some(DEFAULT_LOG_FILE));

        settings.merge(&SettingsUpdate {
            locale: Some(None),
            ..Default::default()
        });
        assert_eq!(settings.locale, None);
    }
}
