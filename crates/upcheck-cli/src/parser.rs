//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use upcheck_core::SettingsUpdate;

/// Default settings file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "upcheck.json";

/// Check whether this PC meets the Windows 11 upgrade requirements.
#[derive(Debug, Parser)]
#[command(name = "upcheck")]
#[command(about = "Check whether this PC meets the Windows 11 upgrade requirements")]
#[command(version)]
pub struct Cli {
    /// Locale file stem to use for this run, e.g. `tr_tr`
    #[arg(long, env = "UPCHECK_LOCALE")]
    pub locale: Option<String>,

    /// Persist `--locale` to the settings file
    #[arg(long, requires = "locale")]
    pub save_locale: bool,

    /// Write a JSON report once collection finishes
    #[arg(short = 'e', long)]
    pub export: bool,

    /// Directory the report is written to
    #[arg(long, env = "UPCHECK_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Settings file
    #[arg(short = 'c', long, env = "UPCHECK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// One-run overrides of the persisted settings.
    pub fn settings_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            locale: self.locale.clone().map(Some),
            export_dir: self
                .export_dir
                .as_ref()
                .map(|dir| Some(dir.display().to_string())),
            color: self.no_color.then_some(Some(false)),
            ..SettingsUpdate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["upcheck"]);
        assert!(!cli.export);
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));

        let update = cli.settings_update();
        assert!(update.locale.is_none());
        assert!(update.export_dir.is_none());
        assert!(update.color.is_none());
    }

    #[test]
    fn test_overrides_become_settings_update() {
        let cli = Cli::parse_from([
            "upcheck",
            "--locale",
            "tr_tr",
            "--export",
            "--export-dir",
            "reports",
            "--no-color",
        ]);
        assert!(cli.export);

        let update = cli.settings_update();
        assert_eq!(update.locale, Some(Some("tr_tr".to_string())));
        assert_eq!(update.export_dir, Some(Some("reports".to_string())));
        assert_eq!(update.color, Some(Some(false)));
    }

    #[test]
    fn test_save_locale_requires_locale() {
        let result = Cli::try_parse_from(["upcheck", "--save-locale"]);
        assert!(result.is_err());
    }
}
