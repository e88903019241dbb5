use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Kind of a single reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifferenceCode {
    /// The two documents have different root paths.
    DifferentRootNode,
    /// Element text differs.
    DifferentValue,
    /// An attribute value differs or is missing on one side.
    DifferentAttributeValue,
    /// Same-kind sibling groups appear in a different relative order.
    IncorrectOrder,
    /// Element exists only in the second document.
    MissingElementInFirstDocument,
    /// Element exists only in the first document.
    MissingElementInSecondDocument,
}

impl DifferenceCode {
    pub const ALL: [Self; 6] = [
        Self::DifferentRootNode,
        Self::DifferentValue,
        Self::DifferentAttributeValue,
        Self::IncorrectOrder,
        Self::MissingElementInFirstDocument,
        Self::MissingElementInSecondDocument,
    ];

    /// Upper snake case identifier, as used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DifferentRootNode => "DIFFERENT_ROOT_NODE",
            Self::DifferentValue => "DIFFERENT_VALUE",
            Self::DifferentAttributeValue => "DIFFERENT_ATTRIBUTE_VALUE",
            Self::IncorrectOrder => "INCORRECT_ORDER",
            Self::MissingElementInFirstDocument => "MISSING_ELEMENT_IN_FIRST_DOCUMENT",
            Self::MissingElementInSecondDocument => "MISSING_ELEMENT_IN_SECOND_DOCUMENT",
        }
    }

    /// Render the human-readable message for this code.
    ///
    /// `first` and `second` fill the two placeholders of codes that compare
    /// something (root paths, values, attribute values); other codes ignore them.
    pub fn message(self, first: &str, second: &str) -> String {
        match self {
            Self::DifferentRootNode => format!(
                "First root node: {first} is different from second root node: {second}"
            ),
            Self::DifferentValue => format!("Value differs. First: {first}. Second: {second}"),
            Self::DifferentAttributeValue => {
                format!("Attribute value differs. First: {first}. Second: {second}")
            }
            Self::IncorrectOrder => {
                "Element from first document exists in first in incorrect order.".to_string()
            }
            Self::MissingElementInFirstDocument => {
                "Xpath exists in second xml document but doesn't exist in first one.".to_string()
            }
            Self::MissingElementInSecondDocument => {
                "Xpath exists in first xml document but doesn't exist in second one.".to_string()
            }
        }
    }

    /// Suffix appended to a node path to address the differing item.
    pub(crate) fn path_suffix(self, attribute_name: Option<&str>) -> String {
        match self {
            Self::DifferentValue => "/text()".to_string(),
            Self::DifferentAttributeValue => format!("/@{}", attribute_name.unwrap_or_default()),
            _ => String::new(),
        }
    }
}

impl Display for DifferenceCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::DifferenceCode;

    #[test]
    fn display_matches_serialized_name() {
        for code in DifferenceCode::ALL {
            let json = serde_json::to_string(&code).expect("serialize");
            assert_eq!(json, format!("\"{code}\""));
        }
    }

    #[test]
    fn fills_message_placeholders() {
        assert_eq!(
            DifferenceCode::DifferentValue.message("a", "b"),
            "Value differs. First: a. Second: b"
        );
        assert_eq!(
            DifferenceCode::IncorrectOrder.message("ignored", "ignored"),
            "Element from first document exists in first in incorrect order."
        );
    }
}
