//! Document splitting and parsing.
//!
//! Files can contain multiple definitions, each starting with `---` followed
//! by YAML frontmatter containing at least `name:`.

use crate::error::{IkonError, Result};

use super::body::extract_body;
use super::frontmatter::extract_frontmatter;
use super::span::{Span, Spanned};
use super::types::RawDocument;

/// Parse a file containing one or more document definitions.
///
/// Each definition starts with `---` and YAML frontmatter containing `name:`.
pub fn parse_documents(source: &str) -> Result<Vec<RawDocument>> {
    let sections = split_documents(source);

    if sections.is_empty() {
        return Err(IkonError::Parse {
            message: "No documents found in file".to_string(),
            help: Some("Add a document with ---\\nname: my-name\\n---".to_string()),
        });
    }

    sections
        .into_iter()
        .map(|(section, base_offset)| parse_single_document(&section, base_offset))
        .collect()
}

/// Split source into document sections.
///
/// Returns (section_content, base_offset) for each document. Boundaries are
/// `---` lines immediately followed by `name:`, outside of code fences.
fn split_documents(source: &str) -> Vec<(String, usize)> {
    let mut sections = Vec::new();
    let mut current_start = 0;
    let mut in_code_block = false;

    let lines: Vec<&str> = source.lines().collect();
    let mut offset = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
        }

        if !in_code_block && line.trim() == "---" && i > 0 {
            let next_is_name = lines
                .get(i + 1)
                .map(|l| l.trim().starts_with("name:"))
                .unwrap_or(false);

            if next_is_name {
                let section = &source[current_start..offset];
                if !section.trim().is_empty() {
                    sections.push((section.to_string(), current_start));
                }
                current_start = offset;
            }
        }

        offset += line.len() + 1;
    }

    let final_section = &source[current_start..];
    if !final_section.trim().is_empty() {
        sections.push((final_section.to_string(), current_start));
    }

    sections
}

/// Parse a single document section.
fn parse_single_document(source: &str, base_offset: usize) -> Result<RawDocument> {
    let frontmatter = extract_frontmatter(source, base_offset)?;

    let name = frontmatter
        .values
        .get("name")
        .and_then(|v| v.value.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| IkonError::Parse {
            message: "Document missing required 'name' field".to_string(),
            help: Some("Add name: my-name to frontmatter".to_string()),
        })?;

    let name_span = frontmatter
        .values
        .get("name")
        .map(|v| v.span)
        .unwrap_or(frontmatter.span);

    let remaining = &source[frontmatter.content_start..];
    let remaining_offset = base_offset + frontmatter.content_start;

    let body = extract_body(remaining, remaining_offset).map(|b| b.content);

    let span = Span::from_local_offsets(source, 0, source.len(), base_offset);

    Ok(RawDocument {
        name: Spanned::new(name, name_span),
        frontmatter: frontmatter.values,
        body,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_document() {
        let source = r##"---
name: fire-orb
size: 64
---

```icon
- disc:
    center: [32, 32]
    radius: 24
  fill: "#E25822"
```
"##;

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name.value, "fire-orb");
        assert!(docs[0].body.is_some());
        assert!(docs[0].body.as_ref().unwrap().value.contains("radius: 24"));
    }

    #[test]
    fn test_parse_multiple_documents() {
        let source = r##"---
name: orb-a
---

```icon
- disc: { center: [8, 8], radius: 4 }
  fill: "#FFF"
```

---
name: orb-b
---

```icon
- disc: { center: [8, 8], radius: 6 }
  fill: "#000"
```
"##;

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name.value, "orb-a");
        assert_eq!(docs[1].name.value, "orb-b");
        assert!(docs[0].body.as_ref().unwrap().value.contains("radius: 4"));
        assert!(docs[1].body.as_ref().unwrap().value.contains("radius: 6"));
    }

    #[test]
    fn test_parse_document_without_body() {
        let source = "---\nname: colours\n---\n$dark: #1a1a2e\n";

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name.value, "colours");
        assert!(docs[0].body.is_none());
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_documents("").is_err());
    }

    #[test]
    fn test_parse_missing_name() {
        let source = "---\nsize: 64\n---\n";
        assert!(parse_documents(source).is_err());
    }

    #[test]
    fn test_dashes_inside_code_fence_do_not_split() {
        let source = r##"---
name: tricky
---

```icon
- disc: { center: [8, 8], radius: 4 }
  fill: "#FFF"
```
"##;

        // YAML list dashes and fence content must not create new documents.
        let docs = parse_documents(source).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_document_spans() {
        let source = "---\nname: test\n---\n\n```icon\n- disc: { center: [1, 1], radius: 1 }\n  fill: \"#FFF\"\n```\n";

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs[0].span.start.line, 1);
        assert!(docs[0].body.as_ref().unwrap().span.start.offset > 0);
    }
}
