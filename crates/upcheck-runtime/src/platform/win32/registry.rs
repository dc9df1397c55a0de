//! Read-only access to `HKEY_LOCAL_MACHINE`.

use std::ffi::c_void;

use upcheck_core::ProbeError;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
use windows::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_READ, REG_ROUTINE_FLAGS, RRF_RT_REG_BINARY, RRF_RT_REG_DWORD,
    RRF_RT_REG_QWORD, RRF_RT_REG_SZ, RegCloseKey, RegEnumKeyExW, RegGetValueW, RegOpenKeyExW,
};
use windows::core::{HSTRING, PCWSTR, PWSTR};

use super::from_wide;

/// Longest registry key name, in characters.
const MAX_KEY_NAME: usize = 256;

/// Open registry key, closed on drop.
pub(super) struct RegKey(HKEY);

impl RegKey {
    /// Open `HKEY_LOCAL_MACHINE\<path>` for reading.
    pub fn open(path: &str) -> Result<Self, WIN32_ERROR> {
        let mut handle = HKEY::default();
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_LOCAL_MACHINE,
                &HSTRING::from(path),
                0,
                KEY_READ,
                &mut handle,
            )
        };
        if status.is_ok() {
            Ok(Self(handle))
        } else {
            Err(status)
        }
    }

    /// Like [`open`](Self::open), but a missing key is `Ok(None)`.
    pub fn open_optional(path: &str) -> Result<Option<Self>, WIN32_ERROR> {
        match Self::open(path) {
            Ok(key) => Ok(Some(key)),
            Err(status) if status == ERROR_FILE_NOT_FOUND => Ok(None),
            Err(status) => Err(status),
        }
    }

    /// Names of the direct subkeys, in enumeration order.
    pub fn subkeys(&self) -> Vec<String> {
        let mut names = Vec::new();
        for index in 0u32.. {
            let mut buffer = [0u16; MAX_KEY_NAME];
            let mut len = super::struct_size::<[u16; MAX_KEY_NAME]>() / 2;
            let status = unsafe {
                RegEnumKeyExW(
                    self.0,
                    index,
                    PWSTR(buffer.as_mut_ptr()),
                    &mut len,
                    None,
                    PWSTR::null(),
                    None,
                    None,
                )
            };
            // ERROR_NO_MORE_ITEMS ends the enumeration
            if status.is_err() {
                break;
            }
            names.push(from_wide(&buffer));
        }
        names
    }

    pub fn string(&self, name: &str) -> Result<String, WIN32_ERROR> {
        let bytes = self.raw(name, RRF_RT_REG_SZ)?;
        let wide: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(from_wide(&wide))
    }

    pub fn dword(&self, name: &str) -> Result<u32, WIN32_ERROR> {
        let mut value = 0u32;
        self.fixed(name, RRF_RT_REG_DWORD, std::ptr::from_mut(&mut value).cast(), 4)?;
        Ok(value)
    }

    pub fn qword(&self, name: &str) -> Result<u64, WIN32_ERROR> {
        let mut value = 0u64;
        self.fixed(name, RRF_RT_REG_QWORD, std::ptr::from_mut(&mut value).cast(), 8)?;
        Ok(value)
    }

    pub fn binary(&self, name: &str) -> Result<Vec<u8>, WIN32_ERROR> {
        self.raw(name, RRF_RT_REG_BINARY)
    }

    fn fixed(
        &self,
        name: &str,
        flags: REG_ROUTINE_FLAGS,
        data: *mut c_void,
        size: u32,
    ) -> Result<(), WIN32_ERROR> {
        let mut size = size;
        let status = unsafe {
            RegGetValueW(
                self.0,
                PCWSTR::null(),
                &HSTRING::from(name),
                flags,
                None,
                Some(data),
                Some(&mut size),
            )
        };
        if status.is_ok() { Ok(()) } else { Err(status) }
    }

    /// Variable-size value: size query first, then the read.
    fn raw(&self, name: &str, flags: REG_ROUTINE_FLAGS) -> Result<Vec<u8>, WIN32_ERROR> {
        let value = HSTRING::from(name);
        let mut size = 0u32;
        let status = unsafe {
            RegGetValueW(self.0, PCWSTR::null(), &value, flags, None, None, Some(&mut size))
        };
        if status.is_err() {
            return Err(status);
        }

        let mut buffer = vec![0u8; size as usize];
        let status = unsafe {
            RegGetValueW(
                self.0,
                PCWSTR::null(),
                &value,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&mut size),
            )
        };
        if status.is_err() {
            return Err(status);
        }
        buffer.truncate(size as usize);
        Ok(buffer)
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Probe error for a failed registry call.
pub(super) fn registry_error(operation: &str, status: WIN32_ERROR) -> ProbeError {
    ProbeError::unavailable(operation, status.0)
}
