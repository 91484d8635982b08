//! Syntax highlighting themes for rendered code blocks.

use std::fmt;
use std::str::FromStr;

/// Color theme applied to fenced code blocks in markdown output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeTheme {
    #[default]
    Monokai,
    Dracula,
    Nord,
    GithubDark,
    GithubLight,
    OneDarkPro,
    SolarizedDark,
    SolarizedLight,
}

impl CodeTheme {
    /// All known themes.
    pub const ALL: [CodeTheme; 8] = [
        Self::Monokai,
        Self::Dracula,
        Self::Nord,
        Self::GithubDark,
        Self::GithubLight,
        Self::OneDarkPro,
        Self::SolarizedDark,
        Self::SolarizedLight,
    ];

    /// Theme name as written in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monokai => "monokai",
            Self::Dracula => "dracula",
            Self::Nord => "nord",
            Self::GithubDark => "github-dark",
            Self::GithubLight => "github-light",
            Self::OneDarkPro => "one-dark-pro",
            Self::SolarizedDark => "solarized-dark",
            Self::SolarizedLight => "solarized-light",
        }
    }

    /// Editor background color.
    pub fn background(&self) -> &'static str {
        match self {
            Self::Monokai => "#272822",
            Self::Dracula => "#282A36",
            Self::Nord => "#2E3440",
            Self::GithubDark => "#24292E",
            Self::GithubLight => "#FFFFFF",
            Self::OneDarkPro => "#282C34",
            Self::SolarizedDark => "#002B36",
            Self::SolarizedLight => "#FDF6E3",
        }
    }

    /// Default foreground color.
    pub fn foreground(&self) -> &'static str {
        match self {
            Self::Monokai => "#F8F8F2",
            Self::Dracula => "#F8F8F2",
            Self::Nord => "#D8DEE9",
            Self::GithubDark => "#E1E4E8",
            Self::GithubLight => "#24292E",
            Self::OneDarkPro => "#ABB2BF",
            Self::SolarizedDark => "#839496",
            Self::SolarizedLight => "#657B83",
        }
    }

    /// Token colors used by the highlighter.
    pub fn tokens(&self) -> TokenColors {
        match self {
            Self::Monokai => TokenColors {
                keyword: "#F92672",
                storage: "#66D9EF",
                string: "#E6DB74",
                comment: "#75715E",
                constant: "#AE81FF",
                function: "#A6E22E",
                type_name: "#66D9EF",
            },
            Self::Dracula => TokenColors {
                keyword: "#FF79C6",
                storage: "#8BE9FD",
                string: "#F1FA8C",
                comment: "#6272A4",
                constant: "#BD93F9",
                function: "#50FA7B",
                type_name: "#8BE9FD",
            },
            Self::Nord => TokenColors {
                keyword: "#81A1C1",
                storage: "#81A1C1",
                string: "#A3BE8C",
                comment: "#616E88",
                constant: "#B48EAD",
                function: "#88C0D0",
                type_name: "#8FBCBB",
            },
            Self::GithubDark => TokenColors {
                keyword: "#F97583",
                storage: "#F97583",
                string: "#9ECBFF",
                comment: "#6A737D",
                constant: "#79B8FF",
                function: "#B392F0",
                type_name: "#B392F0",
            },
            Self::GithubLight => TokenColors {
                keyword: "#D73A49",
                storage: "#D73A49",
                string: "#032F62",
                comment: "#6A737D",
                constant: "#005CC5",
                function: "#6F42C1",
                type_name: "#6F42C1",
            },
            Self::OneDarkPro => TokenColors {
                keyword: "#C678DD",
                storage: "#C678DD",
                string: "#98C379",
                comment: "#5C6370",
                constant: "#D19A66",
                function: "#61AFEF",
                type_name: "#E5C07B",
            },
            Self::SolarizedDark => TokenColors {
                keyword: "#859900",
                storage: "#268BD2",
                string: "#2AA198",
                comment: "#586E75",
                constant: "#D33682",
                function: "#268BD2",
                type_name: "#B58900",
            },
            Self::SolarizedLight => TokenColors {
                keyword: "#859900",
                storage: "#268BD2",
                string: "#2AA198",
                comment: "#93A1A1",
                constant: "#D33682",
                function: "#268BD2",
                type_name: "#B58900",
            },
        }
    }

    /// Inline style for the `<pre>` element.
    pub fn pre_style(&self) -> String {
        format!(
            "background-color: {}; color: {}; overflow-x: auto;",
            self.background(),
            self.foreground()
        )
    }
}

/// Colors for the token classes a theme distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenColors {
    pub keyword: &'static str,
    /// `fn`, `let`, `class` and other declaration words
    pub storage: &'static str,
    pub string: &'static str,
    pub comment: &'static str,
    /// Numbers, booleans and language constants
    pub constant: &'static str,
    pub function: &'static str,
    pub type_name: &'static str,
}

impl fmt::Display for CodeTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodeTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// A theme name that does not match any known theme.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown markdown theme: {0}")]
pub struct UnknownTheme(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_theme_names() {
        assert_eq!("monokai".parse::<CodeTheme>().unwrap(), CodeTheme::Monokai);
        assert_eq!(
            " GitHub-Dark ".parse::<CodeTheme>().unwrap(),
            CodeTheme::GithubDark
        );
        assert!("solarized".parse::<CodeTheme>().is_err());
    }

    #[test]
    fn names_round_trip() {
        for theme in CodeTheme::ALL {
            assert_eq!(theme.name().parse::<CodeTheme>().unwrap(), theme);
        }
    }

    #[test]
    fn themes_carry_token_colors() {
        assert_eq!(CodeTheme::Monokai.tokens().string, "#E6DB74");
        assert_ne!(
            CodeTheme::SolarizedDark.tokens().comment,
            CodeTheme::SolarizedLight.tokens().comment
        );
    }

    #[test]
    fn monokai_style() {
        let style = CodeTheme::Monokai.pre_style();
        assert!(style.contains("#272822"));
        assert!(style.contains("#F8F8F2"));
    }
}
