//! Configured comparator and its builder.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::{Pipeline, ValueExtractors};
use crate::diff::XmlDiff;
use crate::error::CompareError;
use crate::node::Document;
use crate::omit::load_omit_list;

/// Comparison settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Strip namespace prefixes before comparing.
    pub ignore_namespaces: bool,
    /// Differences whose path contains any of these are dropped.
    pub xpaths_to_omit: BTreeSet<String>,
    /// Path (or `path/@attribute`) to regex; group 1 replaces the value.
    pub value_extractors: BTreeMap<String, String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_namespaces: true,
            xpaths_to_omit: BTreeSet::new(),
            value_extractors: BTreeMap::new(),
        }
    }
}

/// Compares XML documents under one fixed configuration.
///
/// Building compiles extractors and assembles the comparison pipeline once;
/// a comparator can then be reused, including across threads.
#[derive(Debug)]
pub struct XmlComparator {
    options: CompareOptions,
    pipeline: Pipeline,
}

impl XmlComparator {
    pub fn builder() -> XmlComparatorBuilder {
        XmlComparatorBuilder::default()
    }

    pub fn new(options: CompareOptions) -> Result<Self, CompareError> {
        let extractors = ValueExtractors::new(
            options
                .value_extractors
                .iter()
                .map(|(path, pattern)| (path.clone(), pattern.as_str())),
        )?;
        Ok(Self {
            pipeline: Pipeline::new(extractors),
            options,
        })
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Parse and compare two documents.
    pub fn compare(&self, first: &str, second: &str) -> Result<XmlDiff, CompareError> {
        let first = Document::from_xml(first, self.options.ignore_namespaces)?;
        let second = Document::from_xml(second, self.options.ignore_namespaces)?;
        self.compare_documents(first, second)
    }

    /// Compare two already folded documents.
    pub fn compare_documents(
        &self,
        first: Document,
        second: Document,
    ) -> Result<XmlDiff, CompareError> {
        let mut details = self.pipeline.compare_documents(&first, &second)?;
        if !self.options.xpaths_to_omit.is_empty() {
            let omitted: Vec<&str> = self.options.xpaths_to_omit.iter().map(String::as_str).collect();
            let before = details.count();
            details = details.filter(&omitted);
            debug!(
                omitted = before - details.count(),
                remaining = details.count(),
                "applied omission list"
            );
        }
        Ok(XmlDiff::new(first, second, details))
    }
}

impl Default for XmlComparator {
    fn default() -> Self {
        Self {
            options: CompareOptions::default(),
            pipeline: Pipeline::default(),
        }
    }
}

/// Step-by-step configuration of an [`XmlComparator`].
///
/// Nothing is validated until [`XmlComparatorBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct XmlComparatorBuilder {
    options: CompareOptions,
    omit_files: Vec<String>,
}

impl XmlComparatorBuilder {
    /// Start from existing options.
    pub fn options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ignore_namespaces(mut self, ignore: bool) -> Self {
        self.options.ignore_namespaces = ignore;
        self
    }

    /// Add path substrings to omit.
    pub fn xpaths_to_omit<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .xpaths_to_omit
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add the entries of a newline-delimited file (path or `file://` URL).
    pub fn xpaths_to_omit_file(mut self, location: impl Into<String>) -> Self {
        self.omit_files.push(location.into());
        self
    }

    pub fn value_extractor(mut self, path: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.options
            .value_extractors
            .insert(path.into(), pattern.into());
        self
    }

    pub fn value_extractors<I, K, V>(mut self, extractors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options.value_extractors.extend(
            extractors
                .into_iter()
                .map(|(path, pattern)| (path.into(), pattern.into())),
        );
        self
    }

    /// Read omission files and compile extractors.
    pub fn build(mut self) -> Result<XmlComparator, CompareError> {
        for location in &self.omit_files {
            let entries = load_omit_list(location)?;
            debug!(file = %location, entries = entries.len(), "loaded omission list");
            self.options.xpaths_to_omit.extend(entries);
        }
        XmlComparator::new(self.options)
    }
}
