//! YAML frontmatter extraction.

use std::collections::HashMap;

use crate::error::{IkonError, Result};

use super::span::{Span, Spanned};

/// Result of extracting frontmatter from a document section.
#[derive(Debug)]
pub struct FrontmatterResult {
    /// Parsed frontmatter key-value pairs
    pub values: HashMap<String, Spanned<serde_yaml::Value>>,
    /// Span of the frontmatter section (including --- markers)
    pub span: Span,
    /// Byte offset where content after frontmatter begins
    pub content_start: usize,
}

/// Extract YAML frontmatter from the beginning of a document.
///
/// Expects the document to start with `---`, contain YAML, and end with `---`.
/// Returns the parsed values and the position where remaining content begins.
pub fn extract_frontmatter(source: &str, base_offset: usize) -> Result<FrontmatterResult> {
    let trimmed = source.trim_start();
    let leading = source.len() - trimmed.len();

    if !trimmed.starts_with("---") {
        return Err(IkonError::Parse {
            message: "Document must start with ---".to_string(),
            help: Some("Add YAML frontmatter: ---\\nname: my-name\\n---".to_string()),
        });
    }

    // YAML starts after the opening marker line.
    let after_open = &trimmed[3..];
    let open_line_end = after_open.find('\n').unwrap_or(after_open.len());
    let yaml_start = 3 + open_line_end + 1;

    let yaml_section = trimmed.get(yaml_start..).unwrap_or("");
    let closing = find_closing_marker(yaml_section).ok_or_else(|| IkonError::Parse {
        message: "Unclosed frontmatter: missing closing ---".to_string(),
        help: Some("Add --- after the YAML content".to_string()),
    })?;

    let yaml_content = &yaml_section[..closing];
    let closing_offset = yaml_start + closing;

    let parsed: serde_yaml::Value =
        serde_yaml::from_str(yaml_content).map_err(|e| IkonError::Parse {
            message: format!("Invalid YAML in frontmatter: {}", e),
            help: None,
        })?;

    let value_span = Span::from_local_offsets(
        source,
        leading + yaml_start,
        leading + closing_offset,
        base_offset,
    );

    let values = match parsed {
        serde_yaml::Value::Mapping(map) => map
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_str()
                    .map(|k| (k.to_string(), Spanned::new(value, value_span)))
            })
            .collect(),
        serde_yaml::Value::Null => HashMap::new(),
        _ => {
            return Err(IkonError::Parse {
                message: "Frontmatter must be a YAML mapping".to_string(),
                help: Some("Use key: value format".to_string()),
            });
        }
    };

    // Content begins after the closing --- and its newline.
    let after_closing = &trimmed[closing_offset + 3..];
    let newline_after = after_closing.find('\n').map(|i| i + 1).unwrap_or(0);
    let content_start = leading + closing_offset + 3 + newline_after;

    let span = Span::from_local_offsets(source, leading, leading + closing_offset + 3, base_offset);

    Ok(FrontmatterResult {
        values,
        span,
        content_start,
    })
}

/// Find the closing --- marker. Must sit at the start of a line.
fn find_closing_marker(s: &str) -> Option<usize> {
    let mut offset = 0;
    for line in s.lines() {
        if line.trim() == "---" {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    // Allow a final --- with no trailing newline.
    if s.ends_with("---") && !s.ends_with("\n---") {
        Some(s.len() - 3)
    } else {
        None
    }
}
