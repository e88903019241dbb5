use crate::compare::{ComparatorStep, Pipeline, ValueExtractors};
use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::Node;

/// Compares the direct text of two nodes.
#[derive(Debug, Clone, Default)]
pub struct ValuesComparator {
    extractors: ValueExtractors,
}

impl ValuesComparator {
    pub fn new(extractors: ValueExtractors) -> Self {
        Self { extractors }
    }
}

impl ComparatorStep for ValuesComparator {
    fn compare(
        &self,
        _pipeline: &Pipeline,
        node1: &Node,
        node2: &Node,
    ) -> Result<DifferenceDetails, CompareError> {
        // Both sides go through the first node's extractor.
        let (path, simple) = (node1.path(), node1.simple_path());
        let first = self.extractors.extract(path, simple, node1.value())?;
        let second = self.extractors.extract(path, simple, node2.value())?;

        if first == second {
            Ok(DifferenceDetails::new())
        } else {
            DifferenceDetails::of(Some(node1), Some(node2), DifferenceCode::DifferentValue)
        }
    }
}
