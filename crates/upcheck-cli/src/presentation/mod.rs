//! Terminal presentation of the checklist.
//!
//! Format-only: everything here reads the store and the localizer and
//! produces text. Eligibility decisions stay in `upcheck-core`.

pub mod panel;
pub mod progress;

pub use panel::{render_details, render_result, render_summary, status_text};
pub use progress::{POLL_INTERVAL, wait_for_worker};

use upcheck_core::Status;

/// ANSI colour escape for a status.
const fn status_color(status: Status) -> &'static str {
    match status {
        Status::Unknown => "\x1b[2m",
        Status::Initializing => "\x1b[33m",
        Status::Ok => "\x1b[32m",
        Status::Fail => "\x1b[31m",
    }
}

const RESET: &str = "\x1b[0m";

/// Wrap `text` in the colour of `status` when `color` is set.
pub fn paint(text: &str, status: Status, color: bool) -> String {
    if color {
        format!("{}{text}{RESET}", status_color(status))
    } else {
        text.to_string()
    }
}

/// Pad `text` to `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("Compatible", Status::Ok, false), "Compatible");
    }

    #[test]
    fn test_paint_wraps_in_escape_codes() {
        assert_eq!(paint("x", Status::Fail, true), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn test_pad_counts_chars_not_bytes() {
        assert_eq!(pad("İşlemci", 9), "İşlemci  ");
        assert_eq!(pad("too long", 3), "too long");
    }
}
