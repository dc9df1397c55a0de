//! Monitors, display registry entries, graphics adapters and DirectX.

use std::ffi::c_void;

use tracing::{debug, warn};
use upcheck_core::{AdapterFacts, DirectXVersion, EdidBlob, MonitorFacts, ProbeError, ProbeResult};
use windows::Wdk::Graphics::Direct3D::{
    D3DKMT_CLOSEADAPTER, D3DKMT_DRIVERVERSION, D3DKMT_OPENADAPTERFROMLUID,
    D3DKMT_QUERYADAPTERINFO, D3DKMTCloseAdapter, D3DKMTOpenAdapterFromLuid,
    D3DKMTQueryAdapterInfo, KMTQAITYPE_DRIVERVERSION,
};
use windows::Win32::Foundation::{BOOL, FreeLibrary, HWND, LPARAM, LUID, RECT, TRUE};
use windows::Win32::Graphics::Dxgi::{CreateDXGIFactory1, IDXGIFactory1};
use windows::Win32::Graphics::Gdi::{
    BITSPIXEL, DISPLAY_DEVICEW, EnumDisplayDevicesW, EnumDisplayMonitors, GetDC, GetDeviceCaps,
    GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW, ReleaseDC,
};
use windows::Win32::System::LibraryLoader::LoadLibraryW;
use windows::Win32::UI::WindowsAndMessaging::MONITORINFOF_PRIMARY;
use windows::core::{HSTRING, PCWSTR};

use super::registry::{RegKey, registry_error};
use super::{from_wide, os_error, struct_size};

const DISPLAY_ENUM_KEY: &str = "SYSTEM\\CurrentControlSet\\Enum\\DISPLAY";

/// `DXGI_ADAPTER_FLAG_SOFTWARE`
const SOFTWARE_ADAPTER: u32 = 2;

/// Runtime libraries checked from newest to oldest.
const DIRECTX_RUNTIMES: [(&str, DirectXVersion); 2] = [
    ("d3d12.dll", DirectXVersion { major: 12, minor: 0 }),
    ("d3d11.dll", DirectXVersion { major: 11, minor: 0 }),
];

/// Monitor handle and colour depth captured during enumeration.
type Enumerated = Vec<(HMONITOR, u32)>;

unsafe extern "system" fn collect_monitor(
    monitor: HMONITOR,
    hdc: HDC,
    _rect: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let found = unsafe { &mut *(data.0 as *mut Enumerated) };
    let bits = unsafe { GetDeviceCaps(hdc, BITSPIXEL) };
    found.push((monitor, u32::try_from(bits).unwrap_or_default()));
    TRUE
}

pub(super) fn monitors() -> ProbeResult<Vec<MonitorFacts>> {
    let screen = unsafe { GetDC(HWND::default()) };
    if screen.is_invalid() {
        let error = windows::core::Error::from_win32();
        return Err(os_error("GetDC", &error));
    }

    let mut found: Enumerated = Vec::new();
    let enumerated = unsafe {
        EnumDisplayMonitors(
            screen,
            None,
            Some(collect_monitor),
            LPARAM(std::ptr::from_mut(&mut found) as isize),
        )
    };
    unsafe { ReleaseDC(HWND::default(), screen) };
    if !enumerated.as_bool() {
        let error = windows::core::Error::from_win32();
        return Err(os_error("EnumDisplayMonitors", &error));
    }

    let mut monitors = Vec::with_capacity(found.len());
    for (position, (handle, color_depth)) in found.into_iter().enumerate() {
        let index = u32::try_from(position + 1).unwrap_or(u32::MAX);
        if let Some(monitor) = describe_monitor(index, handle, color_depth) {
            monitors.push(monitor);
        }
    }
    Ok(monitors)
}

fn describe_monitor(index: u32, handle: HMONITOR, color_depth: u32) -> Option<MonitorFacts> {
    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = struct_size::<MONITORINFOEXW>();
    let info_ptr = std::ptr::from_mut(&mut info).cast::<MONITORINFO>();
    let ok = unsafe { GetMonitorInfoW(handle, info_ptr) };
    if !ok.as_bool() {
        warn!(index, error = %windows::core::Error::from_win32(), "GetMonitorInfoW failed");
        return None;
    }

    let mut device = DISPLAY_DEVICEW {
        cb: struct_size::<DISPLAY_DEVICEW>(),
        ..Default::default()
    };
    let ok = unsafe { EnumDisplayDevicesW(PCWSTR(info.szDevice.as_ptr()), 0, &mut device, 0) };
    if !ok.as_bool() {
        warn!(index, error = %windows::core::Error::from_win32(), "EnumDisplayDevicesW failed");
        return None;
    }

    let rect = info.monitorInfo.rcMonitor;
    Some(MonitorFacts {
        index,
        device_id: from_wide(&device.DeviceID),
        device_name: from_wide(&device.DeviceName),
        device_string: from_wide(&device.DeviceString),
        primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        color_depth,
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    })
}

/// EDID blocks under `Enum\DISPLAY\<model>\<instance>\Device Parameters`.
pub(super) fn edids() -> ProbeResult<Vec<EdidBlob>> {
    let Some(root) = RegKey::open_optional(DISPLAY_ENUM_KEY)
        .map_err(|status| registry_error("RegOpenKeyExW(Enum\\DISPLAY)", status))?
    else {
        debug!("No display devices in the registry");
        return Ok(Vec::new());
    };

    let mut blobs = Vec::new();
    for model in root.subkeys() {
        debug!(model = %model, "Display device detected");
        let model_path = format!("{DISPLAY_ENUM_KEY}\\{model}");
        let Ok(model_key) = RegKey::open(&model_path) else {
            continue;
        };

        for instance in model_key.subkeys() {
            let registry_path = format!("{model_path}\\{instance}\\Device Parameters");
            let Ok(parameters) = RegKey::open(&registry_path) else {
                continue;
            };
            match parameters.binary("EDID") {
                Ok(bytes) => blobs.push(EdidBlob {
                    registry_path,
                    bytes,
                }),
                Err(status) => {
                    debug!(path = %registry_path, status = status.0, "No EDID value");
                }
            }
        }
    }
    Ok(blobs)
}

pub(super) fn adapters() -> ProbeResult<Vec<AdapterFacts>> {
    let factory: IDXGIFactory1 =
        unsafe { CreateDXGIFactory1() }.map_err(|e| os_error("CreateDXGIFactory1", &e))?;

    let mut adapters = Vec::new();
    // EnumAdapters1 fails with DXGI_ERROR_NOT_FOUND past the last adapter
    for index in 0u32.. {
        let Ok(adapter) = (unsafe { factory.EnumAdapters1(index) }) else {
            break;
        };
        let desc = unsafe { adapter.GetDesc1() }
            .map_err(|e| os_error("IDXGIAdapter1::GetDesc1", &e))?;
        let description = from_wide(&desc.Description);
        if desc.Flags & SOFTWARE_ADAPTER != 0 {
            debug!(adapter = %description, "Skipping software adapter");
            continue;
        }

        let driver_model = driver_version(desc.AdapterLuid)
            .map_or_else(|| "Unknown".to_string(), driver_model_name);
        debug!(adapter = %description, driver_model = %driver_model, "Graphics adapter");
        adapters.push(AdapterFacts {
            description,
            driver_model,
        });
    }
    debug!(count = adapters.len(), "Graphics adapters enumerated");
    Ok(adapters)
}

/// Raw `D3DKMT_DRIVERVERSION` of the adapter, e.g. `3000` for WDDM 3.0.
fn driver_version(luid: LUID) -> Option<i32> {
    let mut open = D3DKMT_OPENADAPTERFROMLUID {
        AdapterLuid: luid,
        hAdapter: 0,
    };
    let status = unsafe { D3DKMTOpenAdapterFromLuid(&mut open) };
    if status.is_err() {
        debug!(status = status.0, "D3DKMTOpenAdapterFromLuid failed");
        return None;
    }

    let mut version = D3DKMT_DRIVERVERSION::default();
    let mut query = D3DKMT_QUERYADAPTERINFO {
        hAdapter: open.hAdapter,
        Type: KMTQAITYPE_DRIVERVERSION,
        pPrivateDriverData: std::ptr::from_mut(&mut version).cast::<c_void>(),
        PrivateDriverDataSize: struct_size::<D3DKMT_DRIVERVERSION>(),
    };
    let status = unsafe { D3DKMTQueryAdapterInfo(&mut query) };

    let close = D3DKMT_CLOSEADAPTER {
        hAdapter: open.hAdapter,
    };
    let _ = unsafe { D3DKMTCloseAdapter(&close) };

    if status.is_err() {
        debug!(status = status.0, "D3DKMTQueryAdapterInfo(DRIVERVERSION) failed");
        return None;
    }
    Some(version.0)
}

/// Driver model label in the `WDDM <major>.<minor>` form.
fn driver_model_name(raw: i32) -> String {
    format!("WDDM {}.{}", raw / 1000, (raw % 1000) / 100)
}

/// Newest DirectX runtime present on the system.
pub(super) fn directx_version() -> ProbeResult<DirectXVersion> {
    let mut last_error = None;
    for (library, version) in DIRECTX_RUNTIMES {
        match unsafe { LoadLibraryW(&HSTRING::from(library)) } {
            Ok(module) => {
                if let Err(e) = unsafe { FreeLibrary(module) } {
                    debug!(library, error = %e, "FreeLibrary failed");
                }
                return Ok(version);
            }
            Err(e) => {
                debug!(library, error = %e, "DirectX runtime not present");
                last_error = Some(e);
            }
        }
    }
    Err(last_error.map_or_else(
        || ProbeError::malformed("LoadLibraryW(d3d11.dll)", "no runtime checked"),
        |e| os_error("LoadLibraryW(d3d11.dll)", &e),
    ))
}
