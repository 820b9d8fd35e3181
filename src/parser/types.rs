//! Common types for parsed documents.

use std::collections::HashMap;

use crate::error::{IkonError, Result};

use super::span::{Span, Spanned};

/// A raw parsed document before type-specific processing.
///
/// This represents the common structure of all ikon definition files:
/// YAML frontmatter with metadata plus an optional body inside an
/// ```icon code block.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The document name (required, from frontmatter)
    pub name: Spanned<String>,

    /// All frontmatter key-value pairs
    pub frontmatter: HashMap<String, Spanned<serde_yaml::Value>>,

    /// Body content (inside the ```icon block), if present
    pub body: Option<Spanned<String>>,

    /// Span covering the entire document
    pub span: Span,
}

impl RawDocument {
    /// Get a frontmatter value by key.
    pub fn get_frontmatter(&self, key: &str) -> Option<&Spanned<serde_yaml::Value>> {
        self.frontmatter.get(key)
    }

    /// Get a frontmatter string value by key.
    pub fn get_frontmatter_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).and_then(|v| v.value.as_str())
    }

    /// Get a positive integer frontmatter value by key.
    ///
    /// Returns an error if the key exists but is not a positive integer.
    pub fn get_frontmatter_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.frontmatter.get(key) {
            None => Ok(None),
            Some(spanned) => {
                let value = spanned
                    .value
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|&n| n > 0);

                match value {
                    Some(n) => Ok(Some(n)),
                    None => Err(IkonError::Parse {
                        message: format!(
                            "Document '{}': '{}' must be a positive integer",
                            self.name.value, key
                        ),
                        help: Some(format!("Use {}: 256", key)),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::span::Location;

    fn dummy_span() -> Span {
        Span::new(Location::new(0, 1, 1), Location::new(0, 1, 1))
    }

    fn doc_with(key: &str, value: serde_yaml::Value) -> RawDocument {
        let mut frontmatter = HashMap::new();
        frontmatter.insert(key.to_string(), Spanned::new(value, dummy_span()));

        RawDocument {
            name: Spanned::new("test".to_string(), dummy_span()),
            frontmatter,
            body: None,
            span: dummy_span(),
        }
    }

    #[test]
    fn test_get_frontmatter_str() {
        let doc = doc_with("variant", serde_yaml::Value::String("dark".to_string()));
        assert_eq!(doc.get_frontmatter_str("variant"), Some("dark"));
        assert_eq!(doc.get_frontmatter_str("missing"), None);
    }

    #[test]
    fn test_get_frontmatter_u32() {
        let doc = doc_with("size", serde_yaml::Value::Number(128.into()));
        assert_eq!(doc.get_frontmatter_u32("size").unwrap(), Some(128));
        assert_eq!(doc.get_frontmatter_u32("missing").unwrap(), None);
    }

    #[test]
    fn test_get_frontmatter_u32_rejects_zero() {
        let doc = doc_with("size", serde_yaml::Value::Number(0.into()));
        assert!(doc.get_frontmatter_u32("size").is_err());
    }

    #[test]
    fn test_get_frontmatter_u32_rejects_string() {
        let doc = doc_with("size", serde_yaml::Value::String("big".to_string()));
        assert!(doc.get_frontmatter_u32("size").is_err());
    }
}
