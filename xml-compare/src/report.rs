use colored::Colorize;
use xml_compare_core::{format_summary, format_text, DifferenceCode, Selection, XmlDiff};

/// Render differences for terminal output.
///
/// Lines headed by a difference code are colored by that code; message lines
/// are left plain.
pub fn render_text(diff: &XmlDiff, selection: Selection) -> String {
    if diff.is_identical() {
        return "documents are equivalent".green().to_string();
    }

    let raw = format_text(diff, selection);
    let mut out = Vec::new();
    for line in raw.lines() {
        let colored = match leading_code(line) {
            Some(DifferenceCode::DifferentRootNode) => line.red().bold().to_string(),
            Some(DifferenceCode::MissingElementInSecondDocument) => line.red().to_string(),
            Some(DifferenceCode::MissingElementInFirstDocument) => line.green().to_string(),
            Some(DifferenceCode::DifferentValue | DifferenceCode::DifferentAttributeValue) => {
                line.yellow().to_string()
            }
            Some(DifferenceCode::IncorrectOrder) => line.magenta().to_string(),
            None => line.to_string(),
        };
        out.push(colored);
    }
    out.join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(diff: &XmlDiff) -> String {
    format_summary(diff).cyan().to_string()
}

fn leading_code(line: &str) -> Option<DifferenceCode> {
    let token = line.split(' ').next()?;
    DifferenceCode::ALL
        .into_iter()
        .find(|code| code.as_str() == token)
}
