//! Flat path table produced from a parsed document.
//!
//! Each element contributes one record carrying its text, followed by one
//! record per attribute. Record order is document order, which later becomes
//! the node `index` used by the declared-order check.

use std::collections::HashMap;

use crate::element::XmlElement;
use crate::namespace::{clean_attribute_name, clean_path};
use crate::parser::{parse, ParseError};

/// One row of the path table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// Structural path with positional predicates, e.g. `/a/b[2]/c`.
    pub path: String,
    /// Text content, if any.
    pub value: Option<String>,
    /// A single attribute name/value pair.
    pub attribute: Option<(String, String)>,
}

impl PathRecord {
    pub fn element(path: impl Into<String>, value: Option<String>) -> Self {
        Self {
            path: path.into(),
            value,
            attribute: None,
        }
    }

    pub fn attribute(
        path: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            value: None,
            attribute: Some((name.into(), value.into())),
        }
    }
}

/// Parse `xml` and flatten it into path records.
pub fn records_from_xml(xml: &[u8], ignore_namespaces: bool) -> Result<Vec<PathRecord>, ParseError> {
    let root = parse(xml)?;
    Ok(flatten(&root, ignore_namespaces))
}

/// Flatten an element tree into records in document order.
///
/// A segment receives a `[k]` predicate only when its parent holds more than
/// one element with the same name; the root segment never does. With
/// `ignore_namespaces`, names are compared after prefixes are stripped, so
/// `x:item` and `item` count as repeated siblings.
pub fn flatten(root: &XmlElement, ignore_namespaces: bool) -> Vec<PathRecord> {
    let naming = if ignore_namespaces {
        Naming::Local
    } else {
        Naming::Qualified
    };
    let mut records = Vec::new();
    let path = format!("/{}", naming.tag(&root.tag));
    flatten_into(root, &path, naming, &mut records);
    records
}

/// How tags and attribute names appear in paths.
#[derive(Debug, Clone, Copy)]
enum Naming {
    Qualified,
    Local,
}

impl Naming {
    fn tag(self, tag: &str) -> String {
        match self {
            Naming::Qualified => tag.to_string(),
            Naming::Local => clean_path(tag),
        }
    }

    fn attribute(self, name: &str) -> String {
        match self {
            Naming::Qualified => name.to_string(),
            Naming::Local => clean_attribute_name(name),
        }
    }
}

fn flatten_into(element: &XmlElement, path: &str, naming: Naming, records: &mut Vec<PathRecord>) {
    records.push(PathRecord::element(path, element.text.clone()));
    for (name, value) in &element.attributes {
        records.push(PathRecord::attribute(path, naming.attribute(name), value.clone()));
    }

    let names: Vec<String> = element
        .children
        .iter()
        .map(|child| naming.tag(&child.tag))
        .collect();
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *totals.entry(name.as_str()).or_default() += 1;
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (child, name) in element.children.iter().zip(&names) {
        let position = positions.entry(name.as_str()).or_default();
        *position += 1;
        let child_path = if totals[name.as_str()] > 1 {
            format!("{path}/{name}[{position}]")
        } else {
            format!("{path}/{name}")
        };
        flatten_into(child, &child_path, naming, records);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{records_from_xml, PathRecord};

    #[test]
    fn adds_predicates_only_to_repeated_siblings() {
        let records = records_from_xml(
            br#"<xml><element value="a"/><element value="b"/><single>t</single></xml>"#,
            false,
        )
        .expect("records");

        assert_eq!(
            records,
            vec![
                PathRecord::element("/xml", None),
                PathRecord::element("/xml/element[1]", None),
                PathRecord::attribute("/xml/element[1]", "value", "a"),
                PathRecord::element("/xml/element[2]", None),
                PathRecord::attribute("/xml/element[2]", "value", "b"),
                PathRecord::element("/xml/single", Some("t".to_string())),
            ]
        );
    }

    #[test]
    fn strips_namespaces_when_requested() {
        let xml = br#"<s:root xmlns:s="urn:x"><s:item s:kind="k"/></s:root>"#;

        let kept = records_from_xml(xml, false).expect("records");
        assert_eq!(kept[0].path, "/s:root");

        let cleaned = records_from_xml(xml, true).expect("records");
        assert_eq!(
            cleaned,
            vec![
                PathRecord::element("/root", None),
                PathRecord::attribute("/root", "xmlns", "urn:x"),
                PathRecord::element("/root/item", None),
                PathRecord::attribute("/root/item", "kind", "k"),
            ]
        );
    }

    #[test]
    fn counts_siblings_by_local_name_when_ignoring_namespaces() {
        let xml = br#"<r xmlns:x="u"><x:item>a</x:item><item>b</item><other/></r>"#;

        let cleaned = records_from_xml(xml, true).expect("records");
        let paths: Vec<&str> = cleaned.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/r", "/r", "/r/item[1]", "/r/item[2]", "/r/other"]
        );
        assert_eq!(cleaned[2].value.as_deref(), Some("a"));
        assert_eq!(cleaned[3].value.as_deref(), Some("b"));

        let kept = records_from_xml(xml, false).expect("records");
        let paths: Vec<&str> = kept.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/r", "/r", "/r/x:item", "/r/item", "/r/other"]);
    }
}
