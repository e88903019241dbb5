//! TOML comparison settings and their merge with command-line options.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use xml_compare_core::{XmlComparator, XmlComparatorBuilder};

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub ignore_namespaces: Option<bool>,
    pub omit: Vec<String>,
    /// Relative paths resolve against the config file's directory.
    pub omit_file: Option<PathBuf>,
    pub extractors: BTreeMap<String, String>,
}

/// Errors returned when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a config file, resolving `omit_file` next to it.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut config = parse_config(&raw, path.display().to_string())?;
    if let (Some(omit_file), Some(dir)) = (config.omit_file.as_mut(), path.parent()) {
        if omit_file.is_relative() {
            *omit_file = dir.join(&*omit_file);
        }
    }
    Ok(config)
}

fn parse_config(raw: &str, path: String) -> Result<FileConfig, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub keep_namespaces: bool,
    pub omit: Vec<String>,
    pub omit_files: Vec<PathBuf>,
    pub extractors: Vec<(String, String)>,
}

/// Combine file settings with command-line overrides.
///
/// List settings accumulate; a command-line extractor replaces a file
/// extractor for the same path; `keep_namespaces` wins over the file.
pub fn comparator_builder(file: FileConfig, overrides: Overrides) -> XmlComparatorBuilder {
    let ignore_namespaces = !overrides.keep_namespaces && file.ignore_namespaces.unwrap_or(true);

    let mut builder = XmlComparator::builder()
        .ignore_namespaces(ignore_namespaces)
        .xpaths_to_omit(file.omit)
        .xpaths_to_omit(overrides.omit)
        .value_extractors(file.extractors)
        .value_extractors(overrides.extractors);

    for omit_file in file.omit_file.into_iter().chain(overrides.omit_files) {
        builder = builder.xpaths_to_omit_file(omit_file.to_string_lossy());
    }
    builder
}
