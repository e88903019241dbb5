use std::collections::BTreeSet;

use crate::compare::{ComparatorStep, Pipeline, ValueExtractors};
use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::Node;

/// Compares the attributes of two nodes, one difference per differing name.
#[derive(Debug, Clone, Default)]
pub struct AttributesComparator {
    extractors: ValueExtractors,
}

impl AttributesComparator {
    pub fn new(extractors: ValueExtractors) -> Self {
        Self { extractors }
    }
}

impl ComparatorStep for AttributesComparator {
    fn compare(
        &self,
        _pipeline: &Pipeline,
        node1: &Node,
        node2: &Node,
    ) -> Result<DifferenceDetails, CompareError> {
        let names: BTreeSet<&str> = node1
            .attributes()
            .keys()
            .chain(node2.attributes().keys())
            .map(String::as_str)
            .collect();

        let mut details = DifferenceDetails::new();
        for name in names {
            let key = format!("{}/@{name}", node1.path());
            let simple_key = format!("{}/@{name}", node1.simple_path());
            let first = self.extractors.extract(&key, &simple_key, node1.attribute(name))?;
            let second = self.extractors.extract(&key, &simple_key, node2.attribute(name))?;
            if first != second {
                details.merge(DifferenceDetails::of_attribute(
                    Some(node1),
                    Some(node2),
                    Some(name),
                    DifferenceCode::DifferentAttributeValue,
                )?);
            }
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::AttributesComparator;
    use crate::compare::{ComparatorStep, Pipeline, ValueExtractors};
    use crate::node::Node;

    #[test]
    fn reports_each_differing_name() {
        let first = Node::new(0, "/e[2]")
            .with_attribute("a", "1")
            .with_attribute("b", "2")
            .with_attribute("same", "x");
        let second = Node::new(0, "/e[2]")
            .with_attribute("a", "9")
            .with_attribute("c", "3")
            .with_attribute("same", "x");

        let details = AttributesComparator::default()
            .compare(&Pipeline::default(), &first, &second)
            .expect("compare");

        let mut paths: Vec<String> = details.all().iter().filter_map(|d| d.path()).collect();
        paths.sort();
        assert_eq!(paths, vec!["/e[2]/@a", "/e[2]/@b", "/e[2]/@c"]);
    }

    #[test]
    fn missing_attribute_message_uses_placeholder() {
        let first = Node::new(0, "/e").with_attribute("a", "1");
        let second = Node::new(0, "/e");
        let details = AttributesComparator::default()
            .compare(&Pipeline::default(), &first, &second)
            .expect("compare");
        let info = details.all().iter().next().expect("one difference");
        assert_eq!(info.message(), "Attribute value differs. First: 1. Second: [null]");
    }

    #[test]
    fn extractor_keyed_by_attribute_path() {
        let extractors =
            ValueExtractors::new([("/e/@stamp", r"^(\d{4})-")]).expect("extractors");
        let first = Node::new(0, "/e").with_attribute("stamp", "2024-01-01");
        let second = Node::new(0, "/e").with_attribute("stamp", "2024-06-30");
        let details = AttributesComparator::new(extractors)
            .compare(&Pipeline::default(), &first, &second)
            .expect("compare");
        assert!(details.is_empty());
    }
}
