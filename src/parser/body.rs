//! Code block body extraction.

use super::span::{Span, Spanned};

/// Result of extracting a code block body.
#[derive(Debug)]
pub struct BodyResult {
    /// The content inside the code block (without fence markers)
    pub content: Spanned<String>,
    /// Byte offset where content after the code block begins
    pub content_end: usize,
}

/// Extract the body content from an ```icon code block.
///
/// Searches for an ```icon fence and extracts the content until the
/// closing ```.
pub fn extract_body(source: &str, base_offset: usize) -> Option<BodyResult> {
    let fence_start = find_opening_fence(source)?;
    let after_fence = &source[fence_start..];

    // Content starts after the opening fence line.
    let fence_line_end = after_fence.find('\n').unwrap_or(after_fence.len());
    let content_start = fence_start + fence_line_end + 1;

    if content_start > source.len() {
        return None;
    }

    let content_section = &source[content_start..];
    let closing_offset = find_closing_fence(content_section)?;

    let body = content_section[..closing_offset]
        .strip_suffix('\n')
        .unwrap_or(&content_section[..closing_offset]);

    let span = Span::from_local_offsets(
        source,
        content_start,
        content_start + body.len(),
        base_offset,
    );

    // End position is past the closing ``` and its newline.
    let after_closing = &content_section[closing_offset..];
    let fence_end = after_closing.find('\n').map(|i| i + 1).unwrap_or(3);
    let content_end = content_start + closing_offset + fence_end;

    Some(BodyResult {
        content: Spanned::new(body.to_string(), span),
        content_end,
    })
}

/// Find the start of an ```icon code fence.
fn find_opening_fence(source: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```icon") || trimmed.starts_with("``` icon") {
            let leading = line.len() - trimmed.len();
            return Some(offset + leading);
        }
        offset += line.len() + 1;
    }
    None
}

/// Find the closing ``` fence.
fn find_closing_fence(source: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.lines() {
        if line.trim() == "```" {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_body() {
        let source = "```icon\n- disc:\n    radius: 4\n```\n";

        let result = extract_body(source, 0).unwrap();

        assert_eq!(result.content.value, "- disc:\n    radius: 4");
    }

    #[test]
    fn test_extract_body_with_prefix() {
        let source = "some text\n```icon\nbody\n```\nafter";

        let result = extract_body(source, 0).unwrap();

        assert_eq!(result.content.value, "body");
        assert_eq!(&source[result.content_end..], "after");
    }

    #[test]
    fn test_extract_body_no_fence() {
        assert!(extract_body("no code fence here", 0).is_none());
    }

    #[test]
    fn test_extract_body_wrong_language() {
        assert!(extract_body("```yaml\nkey: value\n```", 0).is_none());
    }

    #[test]
    fn test_extract_body_unclosed() {
        assert!(extract_body("```icon\nhello\nworld", 0).is_none());
    }

    #[test]
    fn test_extract_body_span_location() {
        let source = "```icon\nAB\nCD\n```";

        let result = extract_body(source, 0).unwrap();

        // Content starts at line 2
        assert_eq!(result.content.span.start.line, 2);
        assert_eq!(result.content.span.start.column, 1);
    }

    #[test]
    fn test_extract_body_with_base_offset() {
        let source = "```icon\ntest\n```";

        let result = extract_body(source, 100).unwrap();
        assert!(result.content.span.start.offset >= 100);
    }
}
