//! [`HostPlatform`] adapters.
//!
//! `WindowsPlatform` talks to the Win32/NT interfaces the probes need.
//! Every other target gets [`UnsupportedPlatform`], which reports the
//! firmware and device interfaces as unavailable.

mod unsupported;
#[cfg(windows)]
mod win32;

use std::sync::Arc;

use upcheck_core::HostPlatform;

pub use unsupported::UnsupportedPlatform;
#[cfg(windows)]
pub use win32::WindowsPlatform;

/// Platform adapter for the running target.
///
/// This should be constructed once in the binary's composition root and
/// shared with the collector.
#[cfg(windows)]
pub fn default_platform() -> Arc<dyn HostPlatform> {
    Arc::new(WindowsPlatform::new())
}

/// Platform adapter for the running target.
#[cfg(not(windows))]
pub fn default_platform() -> Arc<dyn HostPlatform> {
    Arc::new(UnsupportedPlatform::new())
}
