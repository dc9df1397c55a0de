//! WinInet connectivity state.

use tracing::debug;
use upcheck_core::InternetState;
use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::Networking::WinInet::{
    INTERNET_CONNECTION, InternetAttemptConnect, InternetGetConnectedState,
};

pub(super) fn connected_state() -> InternetState {
    let mut flags = INTERNET_CONNECTION::default();
    let connected = unsafe { InternetGetConnectedState(&mut flags, 0) }.is_ok();
    InternetState {
        connected,
        flags: flags.0,
    }
}

pub(super) fn attempt_connect() -> bool {
    let status = unsafe { InternetAttemptConnect(0) };
    debug!(status, "InternetAttemptConnect");
    status == ERROR_SUCCESS.0
}
