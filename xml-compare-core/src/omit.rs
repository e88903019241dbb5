//! Omission lists: path substrings whose differences are not reported.

use std::fs;
use std::path::Path;

use crate::error::CompareError;

const FILE_SCHEME: &str = "file://";

/// Read a newline-delimited omission list from a path or `file://` URL.
pub fn load_omit_list(location: &str) -> Result<Vec<String>, CompareError> {
    let path = Path::new(location.strip_prefix(FILE_SCHEME).unwrap_or(location));
    let text = fs::read_to_string(path).map_err(|source| CompareError::OmitList {
        path: location.to_string(),
        source,
    })?;
    Ok(parse_omit_list(&text))
}

/// One entry per non-blank line, surrounding whitespace trimmed.
pub fn parse_omit_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::{load_omit_list, parse_omit_list};
    use crate::error::CompareError;

    #[test]
    fn skips_blank_lines() {
        let entries = parse_omit_list("/a/b\n\n   \n  /c/@d  \r\n");
        assert_eq!(entries, vec!["/a/b", "/c/@d"]);
    }

    #[test]
    fn loads_plain_paths_and_file_urls() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "/xml/element\n\n/xml/other").expect("write");

        let plain = file.path().to_str().expect("utf-8 path").to_string();
        assert_eq!(
            load_omit_list(&plain).expect("plain path"),
            vec!["/xml/element", "/xml/other"]
        );

        let url = format!("file://{plain}");
        assert_eq!(load_omit_list(&url).expect("file url").len(), 2);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_omit_list("/definitely/not/here.txt").expect_err("missing");
        assert!(matches!(err, CompareError::OmitList { .. }));
    }
}
