//! System locale detection.
//!
//! Catalog files are named after lower-cased `<lang>_<country>` stems, so both
//! the Windows locale name (`en-US`) and POSIX values (`tr_TR.UTF-8`) are
//! normalized to that form.

/// Normalize a locale identifier to a catalog stem.
///
/// Returns `None` for values that do not carry both a language and a
/// country, such as `C` or `POSIX`.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    let mut parts = base.split(['-', '_']);
    let language = parts.next().filter(|p| !p.is_empty())?;
    let country = parts.next().filter(|p| !p.is_empty())?;
    if !language.chars().all(|c| c.is_ascii_alphabetic())
        || !country.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }
    Some(format!(
        "{}_{}",
        language.to_ascii_lowercase(),
        country.to_ascii_lowercase()
    ))
}

/// Locale of the current user, normalized to a catalog stem.
pub fn system_locale() -> Option<String> {
    let raw = platform_locale()?;
    let locale = normalize_locale(&raw);
    tracing::debug!(raw = %raw, locale = ?locale, "Detected system locale");
    locale
}

#[cfg(windows)]
#[allow(unsafe_code)]
fn platform_locale() -> Option<String> {
    use windows::Win32::Globalization::GetUserDefaultLocaleName;

    // LOCALE_NAME_MAX_LENGTH
    let mut buffer = [0u16; 85];
    let written = unsafe { GetUserDefaultLocaleName(&mut buffer) };
    if written <= 1 {
        return None;
    }
    let len = usize::try_from(written - 1).ok()?;
    Some(String::from_utf16_lossy(&buffer[..len]))
}

#[cfg(not(windows))]
fn platform_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_style_names() {
        assert_eq!(normalize_locale("en-US").as_deref(), Some("en_us"));
        assert_eq!(normalize_locale("tr-TR").as_deref(), Some("tr_tr"));
    }

    #[test]
    fn test_posix_style_names() {
        assert_eq!(normalize_locale("tr_TR.UTF-8").as_deref(), Some("tr_tr"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de_de"));
    }

    #[test]
    fn test_names_without_country_are_rejected() {
        for raw in ["C", "POSIX", "", "en", "en_", "C.UTF-8"] {
            assert_eq!(normalize_locale(raw), None, "{raw:?}");
        }
    }
}
