use serde::Serialize;

use crate::diff::{DifferenceCode, XmlDiff};
use crate::format::{select, Selection};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    identical: bool,
    differences_count: usize,
    unique_count: usize,
    differences: Vec<JsonEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    code: DifferenceCode,
    path: Option<String>,
    simple_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<&'a str>,
    message: String,
}

/// Format a diff as pretty-printed JSON.
pub fn format_json(diff: &XmlDiff, selection: Selection) -> String {
    let report = JsonReport {
        identical: diff.is_identical(),
        differences_count: diff.differences_count(),
        unique_count: diff.unique_differences().len(),
        differences: select(diff, selection)
            .into_iter()
            .map(|info| JsonEntry {
                code: info.code(),
                path: info.path(),
                simple_path: info.simple_path(),
                attribute: info.attribute_name(),
                message: info.message(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
