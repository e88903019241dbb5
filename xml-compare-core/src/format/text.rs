use std::collections::BTreeMap;

use crate::diff::{DifferenceCode, XmlDiff};
use crate::format::{select, Selection};

/// Format differences as plain text, one line per difference.
pub fn format_text(diff: &XmlDiff, selection: Selection) -> String {
    let mut lines = Vec::new();
    for info in select(diff, selection) {
        let path = match selection {
            Selection::All => info.path(),
            Selection::Unique => info.simple_path(),
        };
        match path {
            Some(path) => lines.push(format!("{} {path}", info.code())),
            None => lines.push(info.code().to_string()),
        }
        lines.push(format!("  {}", info.message()));
    }
    lines.join("\n")
}

/// Format difference counts per code.
pub fn format_summary(diff: &XmlDiff) -> String {
    let mut per_code: BTreeMap<DifferenceCode, usize> = BTreeMap::new();
    for info in diff.differences() {
        *per_code.entry(info.code()).or_default() += 1;
    }

    let mut parts = vec![
        format!("differences={}", diff.differences_count()),
        format!("unique={}", diff.unique_differences().len()),
    ];
    parts.extend(
        per_code
            .into_iter()
            .map(|(code, count)| format!("{}={count}", code.as_str().to_lowercase())),
    );
    parts.join(" ")
}
