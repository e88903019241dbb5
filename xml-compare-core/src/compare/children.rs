use std::collections::BTreeSet;

use crate::compare::{ComparatorStep, CostMatrix, Pipeline};
use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::Node;

/// Reconciles children regardless of their order among same-kind siblings.
///
/// Each kind of child is matched as a group: exact matches are paired first,
/// the rest at minimum total difference, and unpaired siblings are reported
/// as missing from the other document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildrenComparator;

impl ComparatorStep for ChildrenComparator {
    fn compare(
        &self,
        pipeline: &Pipeline,
        node1: &Node,
        node2: &Node,
    ) -> Result<DifferenceDetails, CompareError> {
        let kinds: BTreeSet<&str> = node1
            .children()
            .keys()
            .chain(node2.children().keys())
            .map(String::as_str)
            .collect();

        let mut details = DifferenceDetails::new();
        for kind in kinds {
            let first = node1.children_of(kind);
            let second = node2.children_of(kind);
            details.merge(match (first.is_empty(), second.is_empty()) {
                (true, true) => continue,
                (false, true) => missing(first, DifferenceCode::MissingElementInSecondDocument)?,
                (true, false) => missing(second, DifferenceCode::MissingElementInFirstDocument)?,
                (false, false) => {
                    let mut matrix = CostMatrix::new(kind, first, second);
                    matrix.match_exact(pipeline)?;
                    matrix.assign_remaining(pipeline)?;
                    matrix.into_details()
                }
            });
        }
        Ok(details)
    }
}

/// A group present on one side only: every member is missing from the other.
fn missing(group: &[Node], code: DifferenceCode) -> Result<DifferenceDetails, CompareError> {
    let mut details = DifferenceDetails::new();
    for node in group {
        let record = match code {
            DifferenceCode::MissingElementInFirstDocument => {
                DifferenceDetails::of(None, Some(node), code)?
            }
            _ => DifferenceDetails::of(Some(node), None, code)?,
        };
        details.merge(record);
    }
    Ok(details)
}
