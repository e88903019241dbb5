//! Folded node tree used by the comparison engine.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::CompareError;
use crate::table::{records_from_xml, PathRecord};

/// One element of a document tree.
///
/// Nodes are equal when their paths are equal; everything else is derived
/// from the path table and frozen once the tree is built.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    index: usize,
    path: String,
    simple_path: String,
    name: String,
    parent: Option<String>,
    value: Option<String>,
    attributes: BTreeMap<String, String>,
    children: BTreeMap<String, Vec<Node>>,
}

impl Node {
    /// Create a bare node for `path` first seen at record `index`.
    pub fn new(index: usize, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            index,
            simple_path: simple_path(&path),
            name: last_segment(&path).to_string(),
            parent: None,
            value: None,
            attributes: BTreeMap::new(),
            children: BTreeMap::new(),
            path,
        }
    }

    /// Builder-style helper setting the (normalized) text value.
    pub fn with_value(mut self, value: impl AsRef<str>) -> Self {
        self.set_value(Some(value.as_ref()));
        self
    }

    /// Builder-style helper adding one (normalized) attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.put_attribute(name.into(), value.as_ref());
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn simple_path(&self) -> &str {
        &self.simple_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the owning node, `None` for the root.
    pub fn parent_path(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Children grouped by simple path, each group ordered by `index`.
    pub fn children(&self) -> &BTreeMap<String, Vec<Node>> {
        &self.children
    }

    /// Children sharing `simple_path`; empty when there are none.
    pub fn children_of(&self, simple_path: &str) -> &[Node] {
        self.children
            .get(simple_path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn set_value(&mut self, value: Option<&str>) {
        self.value = value.and_then(normalize);
    }

    fn put_attribute(&mut self, name: String, value: &str) {
        self.attributes
            .insert(name, normalize(value).unwrap_or_default());
    }

    fn merge(&mut self, record: PathRecord) {
        if let Some(value) = record.value.as_deref() {
            self.set_value(Some(value));
        }
        if let Some((name, value)) = record.attribute {
            self.put_attribute(name, &value);
        }
    }

    fn add_child(&mut self, child: Node) {
        let group = self.children.entry(child.simple_path.clone()).or_default();
        let position = group.partition_point(|sibling| sibling.index < child.index);
        group.insert(position, child);
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// A parsed document reduced to its root node.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parse XML text and fold it into a node tree.
    pub fn from_xml(xml: &str, ignore_namespaces: bool) -> Result<Self, CompareError> {
        let records = records_from_xml(xml.as_bytes(), ignore_namespaces)?;
        Self::from_records(records)
    }

    /// Fold a path table into a tree.
    ///
    /// Records sharing a path are merged; the first occurrence fixes the node
    /// index. A node whose parent path is not in the table is the root.
    pub fn from_records(records: impl IntoIterator<Item = PathRecord>) -> Result<Self, CompareError> {
        let mut nodes: HashMap<String, Node> = HashMap::new();
        for (index, record) in records.into_iter().enumerate() {
            nodes
                .entry(record.path.clone())
                .or_insert_with(|| Node::new(index, record.path.clone()))
                .merge(record);
        }

        if nodes.is_empty() {
            return Err(CompareError::MalformedTable("no records".to_string()));
        }

        let mut paths: Vec<String> = nodes.keys().cloned().collect();
        // Deepest first so every child is complete before it moves into its parent.
        paths.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));

        let mut root: Option<Node> = None;
        for path in paths {
            let Some(mut node) = nodes.remove(&path) else {
                continue;
            };
            let parent_key = parent_path(&path);
            match parent_key.and_then(|key| nodes.get_mut(key)) {
                Some(parent) => {
                    node.parent = Some(parent.path.clone());
                    parent.add_child(node);
                }
                None if root.is_none() => root = Some(node),
                None => {
                    return Err(CompareError::MalformedTable(format!(
                        "more than one root: {} and {}",
                        root.as_ref().map(Node::path).unwrap_or_default(),
                        path
                    )))
                }
            }
        }

        root.map(|root| Self { root })
            .ok_or_else(|| CompareError::MalformedTable("no root node".to_string()))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node
                .children
                .values()
                .flatten()
                .map(count)
                .sum::<usize>()
        }
        count(&self.root)
    }
}

/// Strip `[k]` predicates from a path.
pub fn simple_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('[') {
        let (head, tail) = rest.split_at(open);
        out.push_str(head);
        match tail.find(']') {
            Some(close) if tail[1..close].chars().all(|c| c.is_ascii_digit()) && close > 1 => {
                rest = &tail[close + 1..];
            }
            _ => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn parent_path(path: &str) -> Option<&str> {
    path.rfind('/')
        .map(|pos| &path[..pos])
        .filter(|parent| !parent.is_empty())
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// Trim and collapse internal whitespace; empty text becomes `None`.
fn normalize(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{simple_path, Document, Node};
    use crate::error::CompareError;
    use crate::table::PathRecord;

    #[test]
    fn derives_simple_path_and_name() {
        let node = Node::new(0, "/a/b[2]/c[10]");
        assert_eq!(node.simple_path(), "/a/b/c");
        assert_eq!(node.name(), "c[10]");
        assert_eq!(simple_path("/a[x]/b"), "/a[x]/b");
    }

    #[test]
    fn normalizes_values_and_attributes() {
        let node = Node::new(0, "/a")
            .with_value("  one \n  two ")
            .with_attribute("k", " x   y ");
        assert_eq!(node.value(), Some("one two"));
        assert_eq!(node.attribute("k"), Some("x y"));

        let blank = Node::new(0, "/a").with_value("   ");
        assert_eq!(blank.value(), None);
    }

    #[test]
    fn folds_records_into_tree() {
        let doc = Document::from_records(vec![
            PathRecord::element("/xml", None),
            PathRecord::element("/xml/item[1]", Some("one".to_string())),
            PathRecord::attribute("/xml/item[1]", "id", "1"),
            PathRecord::element("/xml/item[2]", None),
            PathRecord::attribute("/xml/item[2]", "id", "2"),
            PathRecord::element("/xml/tail", None),
        ])
        .expect("tree");

        let root = doc.root();
        assert_eq!(root.path(), "/xml");
        assert_eq!(root.parent_path(), None);

        let items = root.children_of("/xml/item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path(), "/xml/item[1]");
        assert_eq!(items[0].index(), 1);
        assert_eq!(items[0].value(), Some("one"));
        assert_eq!(items[0].attribute("id"), Some("1"));
        assert_eq!(items[1].index(), 3);
        assert_eq!(items[1].parent_path(), Some("/xml"));
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn merge_keeps_the_non_absent_value() {
        let doc = Document::from_records(vec![
            PathRecord::element("/a", Some("text".to_string())),
            PathRecord::attribute("/a", "x", "1"),
        ])
        .expect("tree");
        assert_eq!(doc.root().value(), Some("text"));
        assert_eq!(doc.root().attribute("x"), Some("1"));
    }

    #[test]
    fn rejects_tables_with_two_roots() {
        let err = Document::from_records(vec![
            PathRecord::element("/a", None),
            PathRecord::element("/b", None),
        ])
        .expect_err("two roots");
        assert!(matches!(err, CompareError::MalformedTable(_)));
    }

    #[test]
    fn nodes_are_equal_by_path() {
        assert_eq!(Node::new(0, "/a").with_value("x"), Node::new(5, "/a"));
        assert_ne!(Node::new(0, "/a"), Node::new(0, "/b"));
    }
}
