//! Rendered fact record (title + detail lines).

use serde::{Deserialize, Serialize};

/// Byte width of the icon prefix at the start of every title.
///
/// A three-byte glyph followed by two spaces.
pub const ICON_PREFIX_LEN: usize = 5;

/// Display-ready output of one probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Title including the icon prefix, e.g. `"\u{f2db}  CPU Details:"`.
    pub title: String,
    /// Ordered, pre-formatted detail lines.
    pub details: Vec<String>,
}

impl FactRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: Vec::new(),
        }
    }

    /// Append a detail line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.details.is_empty()
    }

    /// Title with the fixed-width icon prefix removed.
    ///
    /// Titles shorter than the prefix (or not split on a char boundary)
    /// yield an empty string.
    pub fn title_without_icon(&self) -> &str {
        self.title.get(ICON_PREFIX_LEN..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_without_icon_strips_glyph_and_spaces() {
        let record = FactRecord::new("\u{f2db}  CPU Details:");
        assert_eq!(record.title_without_icon(), "CPU Details:");
    }

    #[test]
    fn test_title_without_icon_short_title() {
        let record = FactRecord::new("abc");
        assert_eq!(record.title_without_icon(), "");
    }

    #[test]
    fn test_default_record_is_empty() {
        assert!(FactRecord::default().is_empty());
        let mut record = FactRecord::new("t");
        record.push("line");
        assert!(!record.is_empty());
        assert_eq!(record.details, vec!["line".to_string()]);
    }
}
