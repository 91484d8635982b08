//! Integration toggles and style scan settings.

use serde::Deserialize;

/// Which build integrations are active.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteIntegrations {
    /// Component primitives used by the home, posts and projects pages
    pub react_support: bool,

    /// Generate `assets/main.css` from the classes in use
    pub utility_css: bool,

    /// Write `sitemap.xml`
    pub sitemap: bool,

    /// Write `robots.txt`
    pub robots_txt: bool,

    /// Downscale oversized images from the public directory
    pub image_optimization: bool,

    /// Code highlighting theme for markdown
    pub markdown_theme: String,
}

impl Default for SiteIntegrations {
    fn default() -> Self {
        Self {
            react_support: true,
            utility_css: true,
            sitemap: true,
            robots_txt: true,
            image_optimization: true,
            markdown_theme: "monokai".to_string(),
        }
    }
}

/// Optional utility families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePlugin {
    /// `aspect-w-*` / `aspect-h-*`
    AspectRatio,
    /// `prose` / `prose-invert`
    Typography,
}

/// Where the utility CSS engine looks for class names, and which plugins it loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Glob patterns relative to the project root
    pub content: Vec<String>,

    /// Enabled plugins
    pub plugins: Vec<StylePlugin>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            content: vec!["content/**/*.{md,mdx,html}".to_string()],
            plugins: vec![StylePlugin::AspectRatio, StylePlugin::Typography],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrations_default_to_enabled() {
        let integrations: SiteIntegrations = toml::from_str("").unwrap();

        assert!(integrations.react_support);
        assert!(integrations.utility_css);
        assert!(integrations.sitemap);
        assert!(integrations.robots_txt);
        assert!(integrations.image_optimization);
        assert_eq!(integrations.markdown_theme, "monokai");
    }

    #[test]
    fn integrations_override_single_fields() {
        let integrations: SiteIntegrations =
            toml::from_str("sitemap = false\nmarkdown_theme = \"nord\"").unwrap();

        assert!(!integrations.sitemap);
        assert!(integrations.robots_txt);
        assert_eq!(integrations.markdown_theme, "nord");
    }

    #[test]
    fn parses_plugin_names() {
        let style: StyleConfig =
            toml::from_str("content = [\"src/**/*.html\"]\nplugins = [\"typography\"]").unwrap();

        assert_eq!(style.content, vec!["src/**/*.html"]);
        assert_eq!(style.plugins, vec![StylePlugin::Typography]);

        assert!(toml::from_str::<StyleConfig>("plugins = [\"forms\"]").is_err());
    }
}
