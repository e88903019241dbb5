//! Recursive node comparison.
//!
//! A [`Pipeline`] runs an ordered list of [`ComparatorStep`]s over a pair of
//! nodes and unions what they report. The children step calls back into the
//! pipeline for every sibling pairing it considers, so one pipeline compares a
//! whole subtree.

pub(crate) mod assignment;
pub mod attributes;
pub mod children;
pub mod cost;
pub mod extract;
pub mod order;
pub mod values;

use std::fmt::Debug;

use tracing::debug;

pub use attributes::AttributesComparator;
pub use children::ChildrenComparator;
pub use cost::{CostMatrix, SiblingSlot};
pub use extract::ValueExtractors;
pub use order::OrderComparator;
pub use values::ValuesComparator;

use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::{Document, Node};

/// One stage of a node comparison.
///
/// Steps only read the nodes they are given. `pipeline` is the pipeline the
/// step runs in, for steps that recurse into descendants.
pub trait ComparatorStep: Debug + Send + Sync {
    fn compare(
        &self,
        pipeline: &Pipeline,
        node1: &Node,
        node2: &Node,
    ) -> Result<DifferenceDetails, CompareError>;
}

/// Ordered comparator steps, built once per configuration.
#[derive(Debug)]
pub struct Pipeline {
    steps: Vec<Box<dyn ComparatorStep>>,
}

impl Pipeline {
    /// The standard pipeline: value, attributes, declared order, children.
    pub fn new(extractors: ValueExtractors) -> Self {
        Self::with_steps(vec![
            Box::new(ValuesComparator::new(extractors.clone())),
            Box::new(AttributesComparator::new(extractors)),
            Box::new(OrderComparator),
            Box::new(ChildrenComparator),
        ])
    }

    pub fn with_steps(steps: Vec<Box<dyn ComparatorStep>>) -> Self {
        Self { steps }
    }

    /// Union of every step's differences for `node1` against `node2`.
    pub fn compare(&self, node1: &Node, node2: &Node) -> Result<DifferenceDetails, CompareError> {
        let mut details = DifferenceDetails::new();
        for step in &self.steps {
            details.merge(step.compare(self, node1, node2)?);
        }
        Ok(details)
    }

    /// Compare two whole documents.
    ///
    /// Documents whose roots have different paths are not compared further.
    pub fn compare_documents(
        &self,
        first: &Document,
        second: &Document,
    ) -> Result<DifferenceDetails, CompareError> {
        let (root1, root2) = (first.root(), second.root());
        if root1.path() != root2.path() {
            debug!(first = root1.path(), second = root2.path(), "root nodes differ");
            return DifferenceDetails::of(Some(root1), Some(root2), DifferenceCode::DifferentRootNode);
        }

        let details = self.compare(root1, root2)?;
        debug!(
            root = root1.path(),
            differences = details.count(),
            unique = details.unique().len(),
            "documents compared"
        );
        Ok(details)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ValueExtractors::default())
    }
}
