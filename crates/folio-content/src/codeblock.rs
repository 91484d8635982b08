//! Code block extraction and parsing.

/// Programming language of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Rust,
    C,
    Cpp,
    Python,
    TypeScript,
    JavaScript,
    Html,
    Css,
    Json,
    Toml,
    Yaml,
    Bash,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from code fence info string.
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "rs" | "rust" => Self::Rust,
            "c" | "h" => Self::C,
            "cpp" | "c++" | "cc" | "hpp" | "arduino" | "ino" => Self::Cpp,
            "py" | "python" => Self::Python,
            "ts" | "tsx" | "typescript" => Self::TypeScript,
            "js" | "jsx" | "javascript" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "toml" => Self::Toml,
            "yml" | "yaml" => Self::Yaml,
            "bash" | "sh" | "shell" | "console" => Self::Bash,
            _ => Self::Unknown,
        }
    }

    /// File extension the highlighter knows the language by. TypeScript is
    /// highlighted as JavaScript; TOML has no bundled grammar.
    pub fn syntax_token(&self) -> Option<&'static str> {
        match self {
            Self::Rust => Some("rs"),
            Self::C => Some("c"),
            Self::Cpp => Some("cpp"),
            Self::Python => Some("py"),
            Self::TypeScript | Self::JavaScript => Some("js"),
            Self::Html => Some("html"),
            Self::Css => Some("css"),
            Self::Json => Some("json"),
            Self::Yaml => Some("yaml"),
            Self::Bash => Some("sh"),
            Self::Toml | Self::Unknown => None,
        }
    }

    /// Identifier used in the `language-*` class of rendered code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Bash => "bash",
            Self::Unknown => "plaintext",
        }
    }
}

/// A fenced or indented code block found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Unique identifier for this block (format: block-{line_number})
    pub id: String,

    /// Programming language
    pub language: Language,

    /// Source code content
    pub source: String,

    /// Line number where the block starts (1-indexed)
    pub line_number: usize,

    /// Optional filename hint from info string
    pub filename: Option<String>,
}

impl CodeBlock {
    /// Create a new code block.
    pub fn new(language: Language, source: String, line_number: usize) -> Self {
        Self {
            id: format!("block-{}", line_number),
            language,
            source,
            line_number,
            filename: None,
        }
    }
}

/// Extract filename from code fence info string if present.
///
/// Supports formats like:
/// - `cpp filename="radio.ino"`
/// - `cpp file=radio.ino`
pub fn extract_filename(info: &str) -> Option<String> {
    if let Some(start) = info.find("filename=\"") {
        let rest = &info[start + 10..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    if let Some(start) = info.find("file=") {
        let rest = &info[start + 5..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let filename = rest[..end].trim_matches('"');
        if !filename.is_empty() {
            return Some(filename.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(Language::from_info("rust"), Language::Rust);
        assert_eq!(Language::from_info("ino file=radio.ino"), Language::Cpp);
        assert_eq!(Language::from_info("Python"), Language::Python);
        assert_eq!(Language::from_info("tsx"), Language::TypeScript);
        assert_eq!(Language::from_info(""), Language::Unknown);
        assert_eq!(Language::Unknown.as_str(), "plaintext");
    }

    #[test]
    fn extracts_filename() {
        assert_eq!(
            extract_filename("cpp filename=\"radio.ino\""),
            Some("radio.ino".to_string())
        );
        assert_eq!(
            extract_filename("py file=receiver.py"),
            Some("receiver.py".to_string())
        );
        assert_eq!(extract_filename("rust"), None);
    }

    #[test]
    fn block_id_follows_line() {
        let block = CodeBlock::new(Language::Rust, "fn main() {}".to_string(), 12);
        assert_eq!(block.id, "block-12");
    }
}
