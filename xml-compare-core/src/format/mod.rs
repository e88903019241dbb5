//! Diff report formatters.

pub mod json;
pub mod text;

pub use json::format_json;
pub use text::{format_summary, format_text};

use crate::diff::{DifferenceInformation, XmlDiff};

/// Which set of differences a report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every difference.
    #[default]
    All,
    /// Differences with repeated structure collapsed.
    Unique,
}

pub(crate) fn select(diff: &XmlDiff, selection: Selection) -> Vec<&DifferenceInformation> {
    match selection {
        Selection::All => diff.sorted_differences(),
        Selection::Unique => diff.sorted_unique_differences(),
    }
}
