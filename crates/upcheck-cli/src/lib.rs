//! Terminal front end for upcheck.
//!
//! `main.rs` is the composition root: it loads settings, installs logging,
//! picks the host adapter and hands off to [`handlers`]. Everything else
//! here is kept in the library so it can be tested without a process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;

pub use error::CliError;
pub use parser::Cli;
