//! `folio.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use folio_kit::{Hero, ProjectCard, ProjectList};
use folio_static::{BuildConfig, SiteIntegrations, StyleConfig};

/// Configuration file structure (folio.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteSection,
    pub integrations: SiteIntegrations,
    pub style: StyleConfig,
    pub build: BuildSection,
    pub hero: Hero,
    /// Replaces the built-in project cards when present
    pub projects: Option<Vec<ProjectCard>>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub description: String,
    /// Absolute origin, e.g. `https://example.com`
    pub url: Option<String>,
    pub author: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        let defaults = BuildConfig::default();
        Self {
            title: defaults.title,
            description: defaults.description,
            url: None,
            author: defaults.author,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub content: PathBuf,
    pub public: PathBuf,
    pub output: PathBuf,
    pub minify: bool,
    pub recent_posts: usize,
    pub max_image_width: u32,
}

impl Default for BuildSection {
    fn default() -> Self {
        let defaults = BuildConfig::default();
        Self {
            content: defaults.content_dir,
            public: defaults.public_dir,
            output: defaults.output_dir,
            minify: defaults.minify,
            recent_posts: defaults.recent_posts,
            max_image_width: defaults.max_image_width,
        }
    }
}

/// Command-line values that win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub minify: Option<bool>,
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve into build settings. Relative paths are taken from `root`.
    pub fn into_build_config(self, root: &Path, overrides: &Overrides) -> BuildConfig {
        let output = overrides.output.clone().unwrap_or(self.build.output);

        BuildConfig {
            root: root.to_path_buf(),
            content_dir: root.join(self.build.content),
            public_dir: root.join(self.build.public),
            output_dir: root.join(output),
            minify: overrides.minify.unwrap_or(self.build.minify),
            site_url: self.site.url.filter(|url| !url.trim().is_empty()),
            title: self.site.title,
            description: self.site.description,
            author: self.site.author,
            integrations: self.integrations,
            style: self.style,
            projects: self
                .projects
                .unwrap_or_else(ProjectList::default_projects),
            hero: self.hero,
            recent_posts: self.build.recent_posts,
            max_image_width: self.build.max_image_width,
            live_reload: None,
        }
    }
}

/// Directory the config file lives in.
pub fn project_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load `config_path` and resolve it with the command-line overrides.
pub fn load_build_config(config_path: &Path, overrides: &Overrides) -> Result<BuildConfig> {
    let root = project_root(config_path);
    Ok(ConfigFile::load(config_path)?.into_build_config(&root, overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_kit::ColorTags;
    use folio_static::StylePlugin;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");

        let config = load_build_config(&path, &Overrides::default()).unwrap();

        assert_eq!(config.title, "Vaughan's Tech");
        assert_eq!(config.content_dir, temp.path().join("content"));
        assert_eq!(config.output_dir, temp.path().join("dist"));
        assert!(config.minify);
        assert_eq!(config.recent_posts, 3);
        assert_eq!(config.max_image_width, 1600);
        assert_eq!(config.projects.len(), 2);
        assert!(config.site_url.is_none());
    }

    #[test]
    fn reads_every_section() {
        let config: ConfigFile = toml::from_str(
            r#"
[site]
title = "My Site"
url = "https://example.com"

[integrations]
sitemap = false

[style]
plugins = ["typography"]

[build]
output = "public_html"
recent_posts = 6

[hero]
about = "/about/"

[[projects]]
name = "Folio"
description = "This site"
link = "https://github.com/example/folio"
image = { src = "/images/folio.png", alt = "Folio" }
category = [{ label = "Rust", color = "orange" }]
"#,
        )
        .unwrap();

        let build = config.into_build_config(Path::new("/site"), &Overrides::default());

        assert_eq!(build.title, "My Site");
        assert_eq!(build.author, "Michael Vaughan");
        assert_eq!(build.site_url.as_deref(), Some("https://example.com"));
        assert!(!build.integrations.sitemap);
        assert!(build.integrations.robots_txt);
        assert_eq!(build.style.plugins, vec![StylePlugin::Typography]);
        assert_eq!(build.output_dir, PathBuf::from("/site/public_html"));
        assert_eq!(build.recent_posts, 6);
        assert_eq!(build.hero.about_link.as_deref(), Some("/about/"));
        assert_eq!(build.projects.len(), 1);
        assert_eq!(build.projects[0].category[0].color, ColorTags::Orange);
    }

    #[test]
    fn flags_override_file() {
        let config: ConfigFile = toml::from_str("[build]\noutput = \"out\"\nminify = true").unwrap();

        let build = config.into_build_config(
            Path::new("."),
            &Overrides {
                output: Some(PathBuf::from("elsewhere")),
                minify: Some(false),
            },
        );

        assert_eq!(build.output_dir, PathBuf::from("./elsewhere"));
        assert!(!build.minify);
    }

    #[test]
    fn empty_site_url_is_unset() {
        let config: ConfigFile = toml::from_str("[site]\nurl = \"  \"").unwrap();
        let build = config.into_build_config(Path::new("."), &Overrides::default());
        assert!(build.site_url.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[test]
    fn unknown_plugin_is_an_error() {
        assert!(toml::from_str::<ConfigFile>("[style]\nplugins = [\"forms\"]").is_err());
    }

    #[test]
    fn root_is_config_directory() {
        assert_eq!(project_root(Path::new("folio.toml")), PathBuf::from("."));
        assert_eq!(
            project_root(Path::new("site/folio.toml")),
            PathBuf::from("site")
        );
    }
}
