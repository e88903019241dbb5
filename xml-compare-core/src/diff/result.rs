use std::collections::{BTreeSet, HashSet};

use crate::diff::{DifferenceDetails, DifferenceInformation};
use crate::node::Document;

/// Outcome of comparing two documents.
#[derive(Debug, Clone)]
pub struct XmlDiff {
    first: Document,
    second: Document,
    details: DifferenceDetails,
}

impl XmlDiff {
    pub fn new(first: Document, second: Document, details: DifferenceDetails) -> Self {
        Self {
            first,
            second,
            details,
        }
    }

    pub fn first(&self) -> &Document {
        &self.first
    }

    pub fn second(&self) -> &Document {
        &self.second
    }

    pub fn details(&self) -> &DifferenceDetails {
        &self.details
    }

    pub fn differences_count(&self) -> usize {
        self.details.count()
    }

    pub fn is_identical(&self) -> bool {
        self.details.is_empty()
    }

    /// Every difference found.
    pub fn differences(&self) -> &HashSet<DifferenceInformation> {
        self.details.all()
    }

    /// Differences with repeated structure collapsed.
    pub fn unique_differences(&self) -> &HashSet<DifferenceInformation> {
        self.details.unique()
    }

    /// [`Self::differences`] in a stable order.
    pub fn sorted_differences(&self) -> Vec<&DifferenceInformation> {
        sorted(self.differences())
    }

    /// [`Self::unique_differences`] in a stable order.
    pub fn sorted_unique_differences(&self) -> Vec<&DifferenceInformation> {
        sorted(self.unique_differences())
    }

    /// Paths of all differences; root mismatches contribute nothing.
    pub fn paths(&self) -> BTreeSet<String> {
        self.differences()
            .iter()
            .filter_map(DifferenceInformation::path)
            .collect()
    }

    /// Simple paths of the deduplicated differences.
    pub fn simple_paths(&self) -> BTreeSet<String> {
        self.unique_differences()
            .iter()
            .filter_map(DifferenceInformation::simple_path)
            .collect()
    }

    pub fn messages(&self) -> BTreeSet<String> {
        self.differences()
            .iter()
            .map(DifferenceInformation::message)
            .collect()
    }

    pub fn unique_messages(&self) -> BTreeSet<String> {
        self.unique_differences()
            .iter()
            .map(DifferenceInformation::message)
            .collect()
    }
}

fn sorted(set: &HashSet<DifferenceInformation>) -> Vec<&DifferenceInformation> {
    let mut entries: Vec<&DifferenceInformation> = set.iter().collect();
    entries.sort_by(|a, b| a.path().cmp(&b.path()).then_with(|| a.cmp(b)));
    entries
}
