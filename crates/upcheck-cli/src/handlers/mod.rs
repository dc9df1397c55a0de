//! Command handlers.
//!
//! Handlers are thin: they wire core types together, call into
//! [`crate::presentation`] for output and translate failures into
//! [`crate::CliError`].

pub mod check;
pub mod export;
