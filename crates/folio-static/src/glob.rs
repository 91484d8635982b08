//! Glob patterns for the style content scan.
//!
//! Supported syntax: `**` (any number of directories), `*` and `?` (within one
//! path segment) and `{a,b}` alternation.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    raw: String,
    base: PathBuf,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a pattern such as `./content/**/*.{md,html}`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let normalized = pattern.trim().trim_start_matches("./");
        let regex = Regex::new(&glob_to_regex(normalized))?;

        let base: PathBuf = normalized
            .split('/')
            .take_while(|segment| !segment.contains(['*', '?', '{', '[']))
            .collect();

        // A pattern without wildcards names a file; walk from its parent.
        let base = if base.as_os_str().len() == normalized.len() {
            base.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            base
        };

        Ok(Self {
            raw: pattern.to_string(),
            base,
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Leading directory without wildcards.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Check a path relative to the project root.
    pub fn is_match(&self, relative: &Path) -> bool {
        let joined = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");
        self.regex.is_match(&joined)
    }

    /// All files below `root` matching this pattern, sorted.
    pub fn files(&self, root: &Path) -> Vec<PathBuf> {
        let start = root.join(&self.base);
        if !start.exists() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&start)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.strip_prefix(root).is_ok_and(|rel| self.is_match(rel)))
            .collect();
        files.sort();
        files
    }
}

/// Translate glob syntax into an anchored regular expression.
fn glob_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' => {
                depth += 1;
                out.push_str("(?:");
            }
            '}' if depth > 0 => {
                depth -= 1;
                out.push(')');
            }
            ',' if depth > 0 => out.push('|'),
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
        i += 1;
    }

    // Unbalanced braces surface as a regex compile error.
    for _ in 0..depth {
        out.push('(');
    }

    out.push('$');
    out
}
