//! OS adapters for upcheck.
//!
//! Provides the [`HostPlatform`](upcheck_core::HostPlatform) implementation for
//! the current target and system locale detection. Unsafe FFI is confined to
//! the Windows adapter modules.

pub mod locale;
pub mod platform;

pub use locale::{normalize_locale, system_locale};
pub use platform::{UnsupportedPlatform, default_platform};

#[cfg(windows)]
pub use platform::WindowsPlatform;
