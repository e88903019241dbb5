use std::collections::BTreeMap;

/// A raw XML element as read from the source document.
///
/// This is the parser's intermediate shape; comparison runs on the folded
/// [`crate::node::Node`] tree built from the path table.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified tag name as written in the source.
    pub tag: String,
    /// XML attributes keyed by qualified name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
    /// Direct text content, `None` when it was absent or blank.
    pub text: Option<String>,
}

impl XmlElement {
    /// Create a new element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Number of direct children carrying `tag`.
    pub fn count_children(&self, tag: &str) -> usize {
        self.children.iter().filter(|child| child.tag == tag).count()
    }

    /// Append a text or CDATA fragment exactly as written.
    pub(crate) fn push_text(&mut self, fragment: &str) {
        self.text.get_or_insert_with(String::new).push_str(fragment);
    }
}
