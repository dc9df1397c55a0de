//! Summary table, overall result and per-domain details.

use std::fmt::Write;

use upcheck_core::{CommonText, Domain, EligibilityStore, Localizer, Status};

use super::{pad, paint};

/// Localized label for a status.
pub fn status_text(status: Status, text: &dyn Localizer) -> String {
    let id = match status {
        Status::Unknown => CommonText::Unknown,
        Status::Initializing => CommonText::Initializing,
        Status::Ok => CommonText::CompatibleOk,
        Status::Fail => CommonText::CompatibleFail,
    };
    text.text(id.into())
}

/// One row per probed domain with its coloured status.
pub fn render_summary(store: &EligibilityStore, text: &dyn Localizer, color: bool) -> String {
    let names: Vec<(Domain, String)> = Domain::PROBED
        .iter()
        .map(|domain| (*domain, text.text((*domain).into())))
        .collect();
    let header = text.text(Domain::Summary.into());
    let width = names
        .iter()
        .map(|(_, name)| name.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or_default()
        + 2;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}",
        pad(&header, width),
        text.text(CommonText::Status.into())
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 16));
    for (domain, name) in names {
        let status = store.status(domain);
        let label = status_text(status, text);
        let _ = writeln!(out, "{}{}", pad(&name, width), paint(&label, status, color));
    }
    out
}

/// Overall go/no-go line.
pub fn render_result(upgradable: bool, text: &dyn Localizer, color: bool) -> String {
    let (message, status) = if upgradable {
        (CommonText::CanUpgrade, Status::Ok)
    } else {
        (CommonText::CannotUpgrade, Status::Fail)
    };
    format!(
        "{}: {}",
        text.text(CommonText::Result.into()),
        paint(&text.text(message.into()), status, color)
    )
}

/// Every published record as a title followed by indented detail lines.
///
/// Titles are printed without the icon glyph, which most terminal fonts
/// do not carry.
pub fn render_details(store: &EligibilityStore) -> String {
    let mut out = String::new();
    for (_, record) in store.records() {
        let _ = writeln!(out, "{}", record.title_without_icon());
        for line in &record.details {
            let _ = writeln!(out, "    {line}");
        }
        out.push('\n');
    }
    out
}
