use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::diff::DifferenceCode;
use crate::error::CompareError;
use crate::node::Node;

const NULL: &str = "[null]";

/// Snapshot of the node a difference points at.
///
/// Only what reports need is kept. Equality and ordering follow the path, so a
/// snapshot behaves like the node it was taken from.
#[derive(Debug, Clone, Serialize)]
pub struct DiffNode {
    path: String,
    simple_path: String,
    value: Option<String>,
    attribute_value: Option<String>,
}

impl DiffNode {
    fn capture(node: &Node, attribute_name: Option<&str>) -> Self {
        Self {
            path: node.path().to_string(),
            simple_path: node.simple_path().to_string(),
            value: node.value().map(str::to_string),
            attribute_value: attribute_name
                .and_then(|name| node.attribute(name))
                .map(str::to_string),
        }
    }

    fn structural(&self) -> Self {
        Self {
            path: self.simple_path.clone(),
            ..self.clone()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn simple_path(&self) -> &str {
        &self.simple_path
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Value of the attribute named by the owning difference, if any.
    pub fn attribute_value(&self) -> Option<&str> {
        self.attribute_value.as_deref()
    }
}

impl PartialEq for DiffNode {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DiffNode {}

impl Hash for DiffNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for DiffNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiffNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

/// One discrepancy between the two documents.
///
/// `node1` comes from the first document and `node2` from the second; an
/// absent side means the element is missing from that document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DifferenceInformation {
    node1: Option<DiffNode>,
    node2: Option<DiffNode>,
    attribute_name: Option<String>,
    code: DifferenceCode,
}

impl DifferenceInformation {
    /// Record a difference between `node1` and `node2`.
    ///
    /// Fails when both nodes are absent, unless the code is
    /// [`DifferenceCode::DifferentRootNode`].
    pub fn new(
        node1: Option<&Node>,
        node2: Option<&Node>,
        attribute_name: Option<&str>,
        code: DifferenceCode,
    ) -> Result<Self, CompareError> {
        if node1.is_none() && node2.is_none() && code != DifferenceCode::DifferentRootNode {
            return Err(CompareError::both_absent(code));
        }

        Ok(Self {
            node1: node1.map(|node| DiffNode::capture(node, attribute_name)),
            node2: node2.map(|node| DiffNode::capture(node, attribute_name)),
            attribute_name: attribute_name.map(str::to_string),
            code,
        })
    }

    /// Start a record whose parts are supplied one by one.
    pub fn builder<'a>() -> DifferenceInformationBuilder<'a> {
        DifferenceInformationBuilder::default()
    }

    /// Same record with positional predicates dropped from the node paths.
    pub fn structural(&self) -> Self {
        Self {
            node1: self.node1.as_ref().map(DiffNode::structural),
            node2: self.node2.as_ref().map(DiffNode::structural),
            attribute_name: self.attribute_name.clone(),
            code: self.code,
        }
    }

    pub fn node1(&self) -> Option<&DiffNode> {
        self.node1.as_ref()
    }

    pub fn node2(&self) -> Option<&DiffNode> {
        self.node2.as_ref()
    }

    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }

    pub fn code(&self) -> DifferenceCode {
        self.code
    }

    /// Path of the differing item, e.g. `/xml/element[2]/@value`.
    ///
    /// `None` for a root mismatch, which has no single location.
    pub fn path(&self) -> Option<String> {
        self.located(DiffNode::path)
    }

    /// [`Self::path`] without positional predicates.
    pub fn simple_path(&self) -> Option<String> {
        self.located(DiffNode::simple_path)
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        let (first, second) = match self.code {
            DifferenceCode::DifferentRootNode => (
                self.node1.as_ref().map(DiffNode::path),
                self.node2.as_ref().map(DiffNode::path),
            ),
            DifferenceCode::DifferentValue => (
                self.node1.as_ref().and_then(DiffNode::value),
                self.node2.as_ref().and_then(DiffNode::value),
            ),
            DifferenceCode::DifferentAttributeValue => (
                self.node1.as_ref().and_then(DiffNode::attribute_value),
                self.node2.as_ref().and_then(DiffNode::attribute_value),
            ),
            DifferenceCode::IncorrectOrder
            | DifferenceCode::MissingElementInFirstDocument
            | DifferenceCode::MissingElementInSecondDocument => (None, None),
        };
        self.code
            .message(first.unwrap_or(NULL), second.unwrap_or(NULL))
    }

    fn located(&self, extract: fn(&DiffNode) -> &str) -> Option<String> {
        if self.code == DifferenceCode::DifferentRootNode {
            return None;
        }
        let suffix = self.code.path_suffix(self.attribute_name.as_deref());
        self.node1
            .as_ref()
            .or(self.node2.as_ref())
            .map(|node| format!("{}{suffix}", extract(node)))
    }
}

/// Step-by-step construction of a [`DifferenceInformation`].
#[derive(Debug, Default)]
pub struct DifferenceInformationBuilder<'a> {
    node1: Option<&'a Node>,
    node2: Option<&'a Node>,
    attribute_name: Option<&'a str>,
    code: Option<DifferenceCode>,
}

impl<'a> DifferenceInformationBuilder<'a> {
    pub fn node1(mut self, node: &'a Node) -> Self {
        self.node1 = Some(node);
        self
    }

    pub fn node2(mut self, node: &'a Node) -> Self {
        self.node2 = Some(node);
        self
    }

    pub fn attribute_name(mut self, name: &'a str) -> Self {
        self.attribute_name = Some(name);
        self
    }

    pub fn code(mut self, code: DifferenceCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Fails with [`CompareError::InvalidDifference`] when no code was given.
    pub fn build(self) -> Result<DifferenceInformation, CompareError> {
        let code = self.code.ok_or_else(|| {
            CompareError::InvalidDifference("difference code is required".to_string())
        })?;
        DifferenceInformation::new(self.node1, self.node2, self.attribute_name, code)
    }
}
