use std::collections::HashSet;

use crate::compare::{ComparatorStep, Pipeline};
use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::Node;

/// Checks that kinds of children appear in the same relative order.
///
/// Only the first appearance of each child kind matters; the order of
/// siblings within one kind is never reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderComparator;

impl ComparatorStep for OrderComparator {
    fn compare(
        &self,
        _pipeline: &Pipeline,
        node1: &Node,
        node2: &Node,
    ) -> Result<DifferenceDetails, CompareError> {
        let first = declared_order(node1);
        let second = declared_order(node2);

        let in_first: HashSet<&str> = first.iter().map(|group| group[0].simple_path()).collect();
        let in_second: HashSet<&str> = second.iter().map(|group| group[0].simple_path()).collect();

        let first = leaders_in(&first, &in_second);
        let second = leaders_in(&second, &in_first);

        let mut details = DifferenceDetails::new();
        for (a, b) in first.into_iter().zip(second) {
            if a.simple_path() != b.simple_path() {
                details.merge(DifferenceDetails::of(
                    Some(a),
                    Some(b),
                    DifferenceCode::IncorrectOrder,
                )?);
            }
        }
        Ok(details)
    }
}

/// Non-empty child groups, ordered by where each group first appears.
fn declared_order(node: &Node) -> Vec<&[Node]> {
    let mut groups: Vec<&[Node]> = node
        .children()
        .values()
        .map(Vec::as_slice)
        .filter(|group| !group.is_empty())
        .collect();
    groups.sort_by_key(|group| group[0].index());
    groups
}

/// First member of every group whose kind also exists in `other`.
fn leaders_in<'a>(groups: &[&'a [Node]], other: &HashSet<&str>) -> Vec<&'a Node> {
    groups
        .iter()
        .filter(|group| other.contains(group[0].simple_path()))
        .map(|&group| &group[0])
        .collect()
}
