//! Parser modules for ikon definition files.
//!
//! This module provides infrastructure for parsing markdown-style definition
//! files used by ikon. Each file can contain one or more document definitions.
//!
//! # Document Structure
//!
//! Each document has:
//! - YAML frontmatter between `---` markers (must include `name:`)
//! - Optional body content inside an ```icon code fence
//!
//! # Usage
//!
//! ```ignore
//! use ikon::parser::parse_icon_file;
//!
//! let source = std::fs::read_to_string("icons/orbs.icon.md")?;
//! let icons = parse_icon_file(&source)?;
//!
//! for icon in icons {
//!     println!("Found: {}", icon.name);
//! }
//! ```

mod body;
mod document;
mod frontmatter;
pub mod icon;
pub mod palette;
pub mod span;
pub mod types;

// Re-export main entry points
pub use document::parse_documents;
pub use icon::parse_icon_file;
pub use palette::parse_palette_file;
pub use span::{Location, Span, Spanned};
pub use types::RawDocument;
