//! Markdown document parser and HTML renderer.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::de::DeserializeOwned;

use crate::codeblock::{extract_filename, CodeBlock, Language};
use crate::frontmatter::{extract_frontmatter, FrontmatterError};
use crate::highlight::Highlighter;
use crate::theme::CodeTheme;

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct ParsedDoc<T> {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<T>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a markdown document.
///
/// Extracts frontmatter, code blocks, and generates a table of contents.
pub fn parse_document<T: DeserializeOwned>(source: &str) -> Result<ParsedDoc<T>, ParseError> {
    let (frontmatter, content) = extract_frontmatter::<T>(source)?;

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();
    let mut ids = HeadingIds::default();

    let parser = Parser::new_ext(content, markdown_options());

    let mut current_code_block: Option<(String, usize)> = None; // (info, line)
    let mut current_heading: Option<(u8, String)> = None; // (level, text)
    let mut line_number = 1;

    // Offset line numbers by the frontmatter block
    let frontmatter_len = source.len() - content.len();
    let frontmatter_line_offset = source[..frontmatter_len].lines().count();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                current_code_block = Some((info, line_number + frontmatter_line_offset));
            }

            Event::Text(text) => {
                if let Some((ref info, start_line)) = current_code_block {
                    let mut block =
                        CodeBlock::new(Language::from_info(info), text.to_string(), start_line);
                    block.filename = extract_filename(info);
                    code_blocks.push(block);
                } else if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }

                line_number += text.matches('\n').count();
            }

            Event::Code(code) => {
                if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&code);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                current_code_block = None;
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let id = ids.unique(&title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::SoftBreak | Event::HardBreak => {
                line_number += 1;
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
        toc,
    })
}

impl<T> ParsedDoc<T> {
    /// Render the document body to HTML using the given code theme.
    pub fn render_html(&self, theme: CodeTheme) -> String {
        render_html(&self.content, theme)
    }
}

/// Render markdown to HTML.
///
/// Headings get slug `id`s matching the table of contents, and fenced code
/// blocks are highlighted and wrapped in a `<pre>` styled with the theme
/// colors.
pub fn render_html(content: &str, theme: CodeTheme) -> String {
    let events: Vec<Event> = Parser::new_ext(content, markdown_options()).collect();
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    let highlighter = Highlighter::new(theme);
    let mut ids = HeadingIds::default();

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                let title = heading_text(&events[i + 1..]);
                out.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(CowStr::from(ids.unique(&title))),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
                i += 1;
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => Language::from_info(info),
                    CodeBlockKind::Indented => Language::Unknown,
                };

                let mut source = String::new();
                i += 1;
                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => source.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                out.push(Event::Html(CowStr::from(code_block_html(
                    &source,
                    language,
                    theme,
                    &highlighter,
                ))));
                i += 1;
            }

            event => {
                out.push(event.clone());
                i += 1;
            }
        }
    }

    let mut html_output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut html_output, out.into_iter());
    html_output
}

/// Collect the plain text of a heading, stopping at its end tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

fn code_block_html(
    source: &str,
    language: Language,
    theme: CodeTheme,
    highlighter: &Highlighter,
) -> String {
    let code = highlighter
        .highlight(source, language)
        .unwrap_or_else(|| escape_html(source).into_owned());

    format!(
        "<pre class=\"code-block\" data-theme=\"{}\" style=\"{}\"><code class=\"language-{}\">{}</code></pre>\n",
        theme.name(),
        theme.pre_style(),
        language.as_str(),
        code
    )
}

/// Heading anchors, unique within one document: `setup`, `setup-1`, ...
#[derive(Default)]
struct HeadingIds {
    counts: HashMap<String, usize>,
    used: HashSet<String>,
}

impl HeadingIds {
    fn unique(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.counts.entry(base.clone()).or_insert(0);
        let mut id = base.clone();
        while self.used.contains(&id) {
            *count += 1;
            id = format!("{base}-{count}");
        }
        self.used.insert(id.clone());
        id
    }
}

/// Escape text for inclusion in HTML.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;"),
    )
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::PageFrontmatter;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_document() {
        let source = r#"---
title: Radios
description: Two radios talking
---

# Radios

Wiring the transceiver.

```cpp
radio.begin();
```

## Receiver

```python
print("pong")
```
"#;

        let doc = parse_document::<PageFrontmatter>(source).unwrap();

        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.title, "Radios");
        assert_eq!(fm.description, Some("Two radios talking".to_string()));

        assert_eq!(doc.code_blocks.len(), 2);
        assert_eq!(doc.code_blocks[0].language, Language::Cpp);
        assert!(doc.code_blocks[0].source.contains("radio.begin()"));
        assert_eq!(doc.code_blocks[1].language, Language::Python);

        assert_eq!(doc.toc.len(), 2);
        assert_eq!(doc.toc[0].title, "Radios");
        assert_eq!(doc.toc[0].level, 1);
        assert_eq!(doc.toc[1].id, "receiver");
        assert_eq!(doc.toc[1].level, 2);
    }

    #[test]
    fn parses_without_frontmatter() {
        let doc = parse_document::<PageFrontmatter>("# Just Markdown\n\nNo frontmatter.").unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].title, "Just Markdown");
    }

    #[test]
    fn renders_heading_ids() {
        let html = render_html("## Wiring the `CE` pin", CodeTheme::Monokai);
        assert!(html.contains(r#"<h2 id="wiring-the-ce-pin">"#), "{html}");
    }

    #[test]
    fn renders_themed_code_blocks() {
        let html = render_html(
            "```rust\nlet greeting = \"hello\";\n```\n",
            CodeTheme::Monokai,
        );

        assert!(html.contains(r#"data-theme="monokai""#));
        assert!(html.contains("background-color: #272822"));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains(r#"<span style="color:#e6db74;">"#), "{html}");
        assert!(html.contains("greeting"));
    }

    #[test]
    fn unknown_languages_render_plain() {
        let html = render_html("```\nlet x = a < b;\n```\n", CodeTheme::Monokai);

        assert!(html.contains(r#"<code class="language-plaintext">let x = a &lt; b;"#));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn repeated_headings_get_unique_ids() {
        let source = "## Setup\n\nFirst.\n\n## Setup\n\nSecond.\n\n## Setup\n";

        let html = render_html(source, CodeTheme::Monokai);
        assert!(html.contains(r#"<h2 id="setup">"#));
        assert!(html.contains(r#"<h2 id="setup-1">"#));
        assert!(html.contains(r#"<h2 id="setup-2">"#));

        let doc = parse_document::<PageFrontmatter>(source).unwrap();
        let ids: Vec<_> = doc.toc.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn generated_suffix_skips_taken_ids() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.unique("Setup 1"), "setup-1");
        assert_eq!(ids.unique("Setup"), "setup");
        assert_eq!(ids.unique("Setup"), "setup-2");
    }

    #[test]
    fn renders_plain_markdown() {
        let html = render_html("Hello **world**", CodeTheme::Nord);
        assert_eq!(html, "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn escapes_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
        assert_eq!(escape_html("Vaughan's"), "Vaughan&#39;s");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
