use std::collections::HashSet;

use crate::diff::{DifferenceCode, DifferenceInformation};
use crate::error::CompareError;
use crate::node::Node;

/// Accumulated differences of a comparison.
///
/// Keeps every recorded difference plus a deduplicated view in which records
/// differing only by positional predicates collapse into one. Merging is set
/// union on both views, so results can be folded in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifferenceDetails {
    all: HashSet<DifferenceInformation>,
    unique: HashSet<DifferenceInformation>,
}

impl DifferenceDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single difference between two nodes.
    pub fn of(
        node1: Option<&Node>,
        node2: Option<&Node>,
        code: DifferenceCode,
    ) -> Result<Self, CompareError> {
        Self::of_attribute(node1, node2, None, code)
    }

    /// A single difference, optionally about a named attribute.
    pub fn of_attribute(
        node1: Option<&Node>,
        node2: Option<&Node>,
        attribute_name: Option<&str>,
        code: DifferenceCode,
    ) -> Result<Self, CompareError> {
        let mut details = Self::new();
        details.insert(DifferenceInformation::new(node1, node2, attribute_name, code)?);
        Ok(details)
    }

    /// Record one difference in both views.
    pub fn insert(&mut self, info: DifferenceInformation) {
        self.unique.insert(info.structural());
        self.all.insert(info);
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        self.all.extend(other.all);
        self.unique.extend(other.unique);
    }

    /// Builder-style [`Self::merge`], handy in folds.
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }

    /// Number of recorded differences (the full view).
    pub fn count(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// True when nothing differs: the compared subtrees are equivalent.
    pub fn is_best_match(&self) -> bool {
        self.is_empty()
    }

    /// Every recorded difference.
    pub fn all(&self) -> &HashSet<DifferenceInformation> {
        &self.all
    }

    /// Differences with positional predicates collapsed.
    pub fn unique(&self) -> &HashSet<DifferenceInformation> {
        &self.unique
    }

    /// Drop every difference whose path contains one of `omitted`.
    ///
    /// Plain substring containment, applied to both views independently.
    /// Differences without a path (root mismatches) are always kept.
    pub fn filter<S: AsRef<str>>(&self, omitted: &[S]) -> Self {
        let keep = |info: &&DifferenceInformation| match info.path() {
            Some(path) => !omitted
                .iter()
                .any(|needle| path.contains(needle.as_ref())),
            None => true,
        };

        Self {
            all: self.all.iter().filter(keep).cloned().collect(),
            unique: self.unique.iter().filter(keep).cloned().collect(),
        }
    }
}

impl FromIterator<DifferenceInformation> for DifferenceDetails {
    fn from_iter<I: IntoIterator<Item = DifferenceInformation>>(iter: I) -> Self {
        let mut details = Self::new();
        for info in iter {
            details.insert(info);
        }
        details
    }
}
