//! Markdown content for the portfolio site.
//!
//! This crate parses markdown files with YAML frontmatter, extracts code blocks and
//! headings, renders HTML with a code highlighting theme, and loads posts and pages
//! from a content directory.

pub mod codeblock;
pub mod frontmatter;
pub mod highlight;
pub mod parser;
pub mod store;
pub mod theme;

pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{PageFrontmatter, PostFrontmatter};
pub use parser::{parse_document, render_html, ParseError, ParsedDoc, TocEntry};
pub use store::{ContentError, ContentStore, Page, Post};
pub use theme::{CodeTheme, TokenColors, UnknownTheme};
