//! Volume enumeration.

use std::ffi::c_void;

use tracing::{debug, warn};
use upcheck_core::{PartitionStyle, ProbeResult, VolumeFacts};
use windows::Win32::Foundation::{CloseHandle, HANDLE, MAX_PATH};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_READ, FILE_SHARE_WRITE, FindFirstVolumeW,
    FindNextVolumeW, FindVolumeClose, GetDiskFreeSpaceExW, GetVolumeInformationW,
    GetVolumePathNamesForVolumeNameW, OPEN_EXISTING, QueryDosDeviceW,
};
use windows::Win32::System::IO::DeviceIoControl;
use windows::Win32::System::Ioctl::{IOCTL_DISK_GET_PARTITION_INFO_EX, PARTITION_INFORMATION_EX};
use windows::core::HSTRING;

use super::{from_wide, os_error, struct_size};

const PATH_BUFFER: usize = MAX_PATH as usize;

/// Inner part of a `\\?\Volume{guid}\` name, as `QueryDosDeviceW` wants it.
fn volume_device_part(volume_name: &str) -> Option<&str> {
    volume_name.strip_prefix("\\\\?\\")?.strip_suffix('\\')
}

/// Every volume the system reports, with its first mount path.
///
/// Enumeration stops early (with a warning) at a malformed volume name or
/// an unresolvable device, keeping what was found so far.
pub(super) fn volumes() -> ProbeResult<Vec<VolumeFacts>> {
    let mut name = [0u16; PATH_BUFFER];
    let handle =
        unsafe { FindFirstVolumeW(&mut name) }.map_err(|e| os_error("FindFirstVolumeW", &e))?;

    let mut volumes = Vec::new();
    loop {
        let volume_name = from_wide(&name);
        let Some(device_part) = volume_device_part(&volume_name) else {
            warn!(volume = %volume_name, "FindFirstVolume/FindNextVolume returned a bad path");
            break;
        };
        let Some(device_name) = dos_device(device_part) else {
            break;
        };
        debug!(device = %device_name, volume = %volume_name, "Found a device");

        volumes.push(describe(&volume_name, device_name));

        if unsafe { FindNextVolumeW(handle, &mut name) }.is_err() {
            break;
        }
    }

    if let Err(e) = unsafe { FindVolumeClose(handle) } {
        debug!(error = %e, "FindVolumeClose failed");
    }
    Ok(volumes)
}

fn dos_device(device_part: &str) -> Option<String> {
    let mut target = [0u16; PATH_BUFFER];
    let written = unsafe { QueryDosDeviceW(&HSTRING::from(device_part), Some(&mut target[..])) };
    if written == 0 {
        let error = windows::core::Error::from_win32();
        warn!(error = %error, "QueryDosDeviceW failed");
        return None;
    }
    Some(from_wide(&target))
}

fn describe(volume_name: &str, device_name: String) -> VolumeFacts {
    let path = mount_path(volume_name);
    let device_path = volume_name.trim_end_matches('\\');
    let (free_bytes, total_bytes) = space(&path);

    VolumeFacts {
        file_system: file_system(&path),
        partition: partition_style(device_path),
        path,
        device_name,
        volume_name: device_path.to_string(),
        free_bytes,
        total_bytes,
    }
}

/// First mount path of the volume, empty when it is not mounted.
fn mount_path(volume_name: &str) -> String {
    let mut buffer = [0u16; PATH_BUFFER];
    let mut returned = 0u32;
    let result = unsafe {
        GetVolumePathNamesForVolumeNameW(
            &HSTRING::from(volume_name),
            Some(&mut buffer[..]),
            &mut returned,
        )
    };
    match result {
        Ok(()) => from_wide(&buffer),
        Err(e) => {
            debug!(volume = %volume_name, error = %e, "No mount path");
            String::new()
        }
    }
}

fn file_system(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut name = [0u16; PATH_BUFFER];
    let result = unsafe {
        GetVolumeInformationW(&HSTRING::from(path), None, None, None, None, Some(&mut name[..]))
    };
    if let Err(e) = result {
        warn!(path = %path, error = %e, "GetVolumeInformationW failed");
        return String::new();
    }
    from_wide(&name)
}

fn partition_style(device_path: &str) -> PartitionStyle {
    let handle = match unsafe {
        CreateFileW(
            &HSTRING::from(device_path),
            0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            FILE_FLAGS_AND_ATTRIBUTES(0),
            HANDLE::default(),
        )
    } {
        Ok(handle) => handle,
        Err(e) => {
            debug!(device = %device_path, error = %e, "Volume could not be opened");
            return PartitionStyle::Unknown;
        }
    };

    let mut info = PARTITION_INFORMATION_EX::default();
    let mut returned = 0u32;
    let result = unsafe {
        DeviceIoControl(
            handle,
            IOCTL_DISK_GET_PARTITION_INFO_EX,
            None,
            0,
            Some(std::ptr::from_mut(&mut info).cast::<c_void>()),
            struct_size::<PARTITION_INFORMATION_EX>(),
            Some(&mut returned),
            None,
        )
    };
    if let Err(e) = unsafe { CloseHandle(handle) } {
        debug!(error = %e, "CloseHandle failed");
    }

    match result {
        Ok(()) => PartitionStyle::from_raw(i64::from(info.PartitionStyle.0)),
        Err(e) => {
            warn!(device = %device_path, error = %e, "DeviceIoControl failed");
            PartitionStyle::Unknown
        }
    }
}

/// Free bytes available to the caller and total bytes.
fn space(path: &str) -> (Option<u64>, Option<u64>) {
    if path.is_empty() {
        return (None, None);
    }
    let mut free = 0u64;
    let mut total = 0u64;
    let result = unsafe {
        GetDiskFreeSpaceExW(&HSTRING::from(path), Some(&mut free), Some(&mut total), None)
    };
    match result {
        Ok(()) => (Some(free), Some(total)),
        Err(e) => {
            warn!(path = %path, error = %e, "GetDiskFreeSpaceExW failed");
            (None, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_device_part() {
        assert_eq!(
            volume_device_part("\\\\?\\Volume{2d1c3a55-0000-0000-0000-100000000000}\\"),
            Some("Volume{2d1c3a55-0000-0000-0000-100000000000}")
        );
        assert_eq!(volume_device_part("C:\\"), None);
        assert_eq!(volume_device_part("\\\\?\\Volume{x}"), None);
    }

    #[test]
    fn test_system_volume_is_listed() {
        let volumes = volumes().unwrap();
        assert!(volumes.iter().any(|v| v.path.eq_ignore_ascii_case("C:\\")));
    }
}
