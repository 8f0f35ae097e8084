//! YAML frontmatter reading for catalog descriptions

use serde_yaml::Value;

/// Split content into YAML frontmatter (between the first two `---` lines) and body
///
/// Returns `None` when the delimiters are missing or the block is not a mapping.
pub fn parse_frontmatter_and_body(content: &str) -> Option<(Value, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim() == "---")? + 1;
    let frontmatter_str = lines[1..end_idx].join("\n");
    let body = lines[end_idx + 1..].join("\n");
    let value: Value = serde_yaml::from_str(&frontmatter_str).ok()?;
    if value.as_mapping().is_none() && !value.is_null() {
        return None;
    }
    Some((value, body))
}

/// The `description:` frontmatter key, trimmed, if present and non-empty
pub fn description(content: &str) -> Option<String> {
    let (frontmatter, _) = parse_frontmatter_and_body(content)?;
    let text = frontmatter.get("description")?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
