//! Token highlighting for fenced code blocks.

use std::str::FromStr;
use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::codeblock::Language;
use crate::theme::CodeTheme;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A code theme prepared for highlighting.
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(code_theme: CodeTheme) -> Self {
        Self {
            theme: build_theme(code_theme),
        }
    }

    /// Highlight `source` as a series of inline-styled `<span>`s.
    ///
    /// Returns `None` when there is no grammar for the language; the caller
    /// falls back to escaped plain text.
    pub fn highlight(&self, source: &str, language: Language) -> Option<String> {
        let syntax = SYNTAXES.find_syntax_by_extension(language.syntax_token()?)?;
        let mut lines = HighlightLines::new(syntax, &self.theme);

        let mut html = String::with_capacity(source.len() * 4);
        for line in LinesWithEndings::from(source) {
            let regions = match lines.highlight_line(line, &SYNTAXES) {
                Ok(regions) => regions,
                Err(e) => {
                    tracing::debug!("Highlighting {} failed: {}", language.as_str(), e);
                    return None;
                }
            };
            match styled_line_to_highlighted_html(&regions, IncludeBackground::No) {
                Ok(line_html) => html.push_str(&line_html),
                Err(e) => {
                    tracing::debug!("Highlighting {} failed: {}", language.as_str(), e);
                    return None;
                }
            }
        }
        Some(html)
    }
}

fn build_theme(code_theme: CodeTheme) -> Theme {
    let tokens = code_theme.tokens();
    let rules: [(&str, &str, Option<FontStyle>); 8] = [
        ("comment", tokens.comment, Some(FontStyle::ITALIC)),
        ("string", tokens.string, None),
        ("constant", tokens.constant, None),
        ("keyword, storage.modifier", tokens.keyword, None),
        ("storage.type", tokens.storage, None),
        ("entity.name.function, support.function", tokens.function, None),
        ("entity.name.type, entity.name.class, support.type", tokens.type_name, None),
        ("keyword.operator", tokens.keyword, None),
    ];

    let scopes = rules
        .into_iter()
        .filter_map(|(selector, color, font_style)| {
            Some(ThemeItem {
                scope: ScopeSelectors::from_str(selector).ok()?,
                style: StyleModifier {
                    foreground: color_of(color),
                    background: None,
                    font_style,
                },
            })
        })
        .collect();

    Theme {
        name: Some(code_theme.name().to_string()),
        settings: ThemeSettings {
            foreground: color_of(code_theme.foreground()),
            background: color_of(code_theme.background()),
            ..ThemeSettings::default()
        },
        scopes,
        ..Theme::default()
    }
}

fn color_of(hex: &str) -> Option<Color> {
    Color::from_str(hex).ok()
}
