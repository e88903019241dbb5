//! Semantic comparison of XML documents.
//!
//! Documents are flattened into path records, folded into node trees and
//! compared recursively. Same-kind siblings are matched regardless of their
//! order, so reordering alone never produces a difference.

pub mod builder;
pub mod compare;
pub mod diff;
pub mod element;
pub mod error;
pub mod format;
pub mod namespace;
pub mod node;
pub mod omit;
pub mod parser;
pub mod table;

pub use builder::{CompareOptions, XmlComparator, XmlComparatorBuilder};
pub use compare::{ComparatorStep, Pipeline, ValueExtractors};
pub use diff::{DiffNode, DifferenceCode, DifferenceDetails, DifferenceInformation, XmlDiff};
pub use error::CompareError;
pub use format::{format_json, format_summary, format_text, Selection};
pub use node::{Document, Node};
pub use parser::{parse, parse_file, ParseError};

/// Compare two documents with default options.
pub fn compare(first: &str, second: &str) -> Result<XmlDiff, CompareError> {
    XmlComparator::default().compare(first, second)
}
