//! CLI entry point - the composition root.
//!
//! Settings, logging, the locale catalog and the host adapter are wired
//! together here and handed to the check handler.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use upcheck_cli::handlers::check::{self, CheckOptions};
use upcheck_cli::{Cli, CliError, config, logging};
use upcheck_core::Catalog;
use upcheck_runtime::{default_platform, system_locale};

fn main() -> ExitCode {
    // Load .env before parsing so UPCHECK_* defaults apply
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut settings = config::load_or_create(&cli.config)?;
    settings.merge(&cli.settings_update());
    upcheck_core::validate_settings(&settings).map_err(CliError::from)?;

    // Held until run() returns so the file writer is flushed on every exit path
    let _guard = logging::init_tracing(&settings.effective_log_file(), cli.verbose)?;
    info!(version = env!("CARGO_PKG_VERSION"), "upcheck starting");

    if cli.save_locale {
        if let Some(locale) = &cli.locale {
            config::save_locale(&cli.config, locale)
                .with_context(|| format!("Saving locale to {}", cli.config.display()))?;
        }
    }

    let system = system_locale();
    let catalog = Catalog::load(
        &settings.effective_locale_dir(),
        settings.locale.as_deref(),
        system.as_deref(),
    )
    .map_err(CliError::from)?;

    let options = CheckOptions {
        color: settings.effective_color(),
        export_dir: cli.export.then(|| settings.effective_export_dir()),
    };

    match check::execute(default_platform(), Arc::new(catalog), &options) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, "Terminating");
            Err(e.into())
        }
    }
}
