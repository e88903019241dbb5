//! Caller-supplied value normalization.
//!
//! An extractor maps a node path (or `path/@attribute`) to a regular
//! expression. When the pattern matches a value, its first capture group
//! replaces the value before comparison; when it does not match, the raw
//! value is compared unchanged.

use std::borrow::Cow;
use std::collections::HashMap;

use regex::Regex;

use crate::error::CompareError;

/// Compiled value extractors keyed by path.
#[derive(Debug, Clone, Default)]
pub struct ValueExtractors {
    patterns: HashMap<String, Regex>,
}

impl ValueExtractors {
    /// Compile `(path, pattern)` pairs.
    ///
    /// Every pattern must compile and define at least one capture group.
    pub fn new<I, K, V>(entries: I) -> Result<Self, CompareError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut patterns = HashMap::new();
        for (path, pattern) in entries {
            let path = path.into();
            let regex = Regex::new(pattern.as_ref()).map_err(|err| {
                CompareError::InvalidExtractor {
                    path: path.clone(),
                    reason: err.to_string(),
                }
            })?;
            // captures_len counts the implicit whole-match group.
            if regex.captures_len() < 2 {
                return Err(CompareError::InvalidExtractor {
                    path,
                    reason: format!("pattern {:?} has no capture group", pattern.as_ref()),
                });
            }
            patterns.insert(path, regex);
        }
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Pattern for `path`, falling back to the predicate-free `simple_path`.
    pub fn pattern_for(&self, path: &str, simple_path: &str) -> Option<&Regex> {
        self.patterns
            .get(path)
            .or_else(|| self.patterns.get(simple_path))
    }

    /// Apply the extractor registered for `path` / `simple_path` to `value`.
    pub fn extract<'v>(
        &self,
        path: &str,
        simple_path: &str,
        value: Option<&'v str>,
    ) -> Result<Option<Cow<'v, str>>, CompareError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let Some(pattern) = self.pattern_for(path, simple_path) else {
            return Ok(Some(Cow::Borrowed(value)));
        };

        match pattern.captures(value) {
            None => Ok(Some(Cow::Borrowed(value))),
            Some(captures) => match captures.get(1) {
                Some(group) => Ok(Some(Cow::Owned(group.as_str().to_string()))),
                None => Err(CompareError::ExtractorGroupMissing {
                    path: path.to_string(),
                    value: value.to_string(),
                }),
            },
        }
    }
}
