//! HTML-safe markup fragments.

use std::fmt;

use folio_content::parser::escape_html;

/// A fragment of HTML that is safe to embed as-is.
///
/// Text enters through [`Markup::text`] and is escaped; trusted HTML enters
/// through [`Markup::raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Escaped text content.
    pub fn text(s: &str) -> Self {
        Self(escape_html(s).into_owned())
    }

    /// Trusted HTML.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// An inline hyperlink.
    pub fn link(href: &str, label: Markup) -> Self {
        Self(format!("<a href=\"{}\">{}</a>", escape_html(href), label.0))
    }

    /// Wrap in an element with the given classes.
    pub fn wrap(tag: &str, class: &str, inner: Markup) -> Self {
        Self(format!("<{tag} class=\"{class}\">{}</{tag}>", inner.0))
    }

    /// Join fragments in order.
    pub fn concat(parts: impl IntoIterator<Item = Markup>) -> Self {
        let mut out = String::new();
        for part in parts {
            out.push_str(&part.0);
        }
        Self(out)
    }

    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
