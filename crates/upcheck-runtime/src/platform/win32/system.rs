//! OS version, boot environment and TPM.

use std::ffi::c_void;

use tracing::debug;
use upcheck_core::{BootEnvironment, OsVersion, ProbeError, ProbeResult, SecureBootState, TpmInfo};
use windows::Wdk::System::SystemInformation::{NtQuerySystemInformation, SYSTEM_INFORMATION_CLASS};
use windows::Wdk::System::SystemServices::RtlGetVersion;
use windows::Win32::System::SystemInformation::{
    GetProductInfo, OS_PRODUCT_TYPE, OSVERSIONINFOEXW, OSVERSIONINFOW,
};
use windows::Win32::System::TpmBaseServices::{TBS_SUCCESS, TPM_DEVICE_INFO, Tbsi_GetDeviceInfo};
use windows::core::GUID;

use super::struct_size;

const SYSTEM_BOOT_ENVIRONMENT_INFORMATION: SYSTEM_INFORMATION_CLASS = SYSTEM_INFORMATION_CLASS(90);
const SYSTEM_SECURE_BOOT_INFORMATION: SYSTEM_INFORMATION_CLASS = SYSTEM_INFORMATION_CLASS(145);

/// `TBS_E_TPM_NOT_FOUND`
const TPM_NOT_FOUND: u32 = 0x8028_400F;

#[repr(C)]
#[derive(Default)]
struct BootEnvironmentInformation {
    boot_identifier: GUID,
    firmware_type: u32,
    boot_flags: u64,
}

#[repr(C)]
#[derive(Default)]
struct SecureBootInformation {
    enabled: u8,
    capable: u8,
}

pub(super) fn os_version() -> ProbeResult<OsVersion> {
    let mut info = OSVERSIONINFOEXW {
        dwOSVersionInfoSize: struct_size::<OSVERSIONINFOEXW>(),
        ..Default::default()
    };
    let status = unsafe { RtlGetVersion(std::ptr::from_mut(&mut info).cast::<OSVERSIONINFOW>()) };
    if status.is_err() {
        return Err(ProbeError::unavailable("RtlGetVersion", status.0));
    }

    Ok(OsVersion {
        major: info.dwMajorVersion,
        minor: info.dwMinorVersion,
        build: info.dwBuildNumber,
        service_pack_major: info.wServicePackMajor,
        service_pack_minor: info.wServicePackMinor,
        platform_id: info.dwPlatformId,
    })
}

pub(super) fn product_type(major: u32, minor: u32) -> ProbeResult<u32> {
    let mut product = OS_PRODUCT_TYPE::default();
    let ok = unsafe { GetProductInfo(major, minor, 0, 0, &mut product) };
    if !ok.as_bool() {
        let error = windows::core::Error::from_win32();
        return Err(super::os_error("GetProductInfo", &error));
    }
    Ok(product.0)
}

/// Fixed-size `NtQuerySystemInformation` query.
fn query_system_information<T: Default>(
    class: SYSTEM_INFORMATION_CLASS,
    operation: &'static str,
) -> ProbeResult<T> {
    let mut value = T::default();
    let mut returned = 0u32;
    let status = unsafe {
        NtQuerySystemInformation(
            class,
            std::ptr::from_mut(&mut value).cast::<c_void>(),
            struct_size::<T>(),
            &mut returned,
        )
    };
    if status.is_err() {
        return Err(ProbeError::unavailable(operation, status.0));
    }
    Ok(value)
}

pub(super) fn boot_environment() -> ProbeResult<BootEnvironment> {
    let info: BootEnvironmentInformation = query_system_information(
        SYSTEM_BOOT_ENVIRONMENT_INFORMATION,
        "NtQuerySystemInformation(SystemBootEnvironmentInformation)",
    )?;
    debug!(boot_identifier = ?info.boot_identifier, "Boot environment queried");
    Ok(BootEnvironment {
        firmware_type: info.firmware_type,
        boot_flags: info.boot_flags,
    })
}

pub(super) fn secure_boot() -> ProbeResult<SecureBootState> {
    let info: SecureBootInformation = query_system_information(
        SYSTEM_SECURE_BOOT_INFORMATION,
        "NtQuerySystemInformation(SystemSecureBootInformation)",
    )?;
    Ok(SecureBootState {
        capable: info.capable != 0,
        enabled: info.enabled != 0,
    })
}

pub(super) fn tpm() -> ProbeResult<TpmInfo> {
    let mut info = TPM_DEVICE_INFO::default();
    let status = unsafe {
        Tbsi_GetDeviceInfo(
            struct_size::<TPM_DEVICE_INFO>(),
            std::ptr::from_mut(&mut info).cast::<c_void>(),
        )
    };

    if status == TPM_NOT_FOUND {
        debug!("No TPM device found");
        return Ok(TpmInfo {
            present: false,
            version: info.tpmVersion,
        });
    }
    if status != TBS_SUCCESS {
        return Err(ProbeError::unavailable("Tbsi_GetDeviceInfo", status));
    }

    Ok(TpmInfo {
        present: true,
        version: info.tpmVersion,
    })
}
