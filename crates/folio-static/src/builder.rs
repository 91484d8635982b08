//! Static site builder.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Datelike;
use rayon::prelude::*;

use folio_content::{CodeTheme, ContentError, ContentStore, Page, Post, UnknownTheme};
use folio_kit::{
    BoilerplateKit, Hero, Markup, Partial, Primitives, ProjectCard, ProjectList, RecentPosts,
    RenderError,
};

use crate::assets::AssetPipeline;
use crate::config::{SiteIntegrations, StyleConfig};
use crate::glob::GlobPattern;
use crate::sitemap::{absolute_url, robots_txt, Sitemap};
use crate::templates::{ArticleMeta, Context, Layout, NavItem, TemplateEngine};
use crate::utility::UtilityEngine;

const STYLESHEET_PATH: &str = "assets/main.css";

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project root; style content globs resolve against it
    pub root: PathBuf,

    /// Markdown content (`posts/`, `pages/`)
    pub content_dir: PathBuf,

    /// Files copied into the output as-is
    pub public_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the generated stylesheet
    pub minify: bool,

    /// Absolute origin, e.g. `https://example.com`. Needed for the sitemap.
    pub site_url: Option<String>,

    /// Site title
    pub title: String,

    pub description: String,

    pub author: String,

    pub integrations: SiteIntegrations,

    pub style: StyleConfig,

    /// Cards on the home and projects pages
    pub projects: Vec<ProjectCard>,

    pub hero: Hero,

    /// Posts shown on the home page
    pub recent_posts: usize,

    /// Wider public images are downscaled
    pub max_image_width: u32,

    /// Script injected into every page by the dev server
    pub live_reload: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            content_dir: PathBuf::from("content"),
            public_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            site_url: None,
            title: "Vaughan's Tech".to_string(),
            description: "Portfolio and blog of Michael Vaughan".to_string(),
            author: "Michael Vaughan".to_string(),
            integrations: SiteIntegrations::default(),
            style: StyleConfig::default(),
            projects: ProjectList::default_projects(),
            hero: Hero::default(),
            recent_posts: 3,
            max_image_width: 1600,
            live_reload: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Posts among them
    pub posts: usize,

    /// Utility classes in the stylesheet
    pub css_classes: usize,

    /// Public files written
    pub assets: usize,

    /// Public images downscaled
    pub images_resized: usize,

    /// Whether `sitemap.xml` was written
    pub sitemap: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read project files: {0}")]
    ReadError(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Theme(#[from] UnknownTheme),

    #[error("The {needed_by} requires the `{integration}` integration")]
    IntegrationRequired {
        integration: &'static str,
        needed_by: String,
    },

    #[error("Failed to render component: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("{url} is produced by both {first} and {second}")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },

    #[error("Invalid style content glob `{pattern}`: {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// What a page shows.
#[derive(Debug, Clone, Copy)]
enum PageKind<'a> {
    Home,
    PostIndex,
    Projects,
    Post(&'a Post),
    Page(&'a Page),
}

impl PageKind<'_> {
    /// Whether the page is composed from component primitives.
    fn needs_primitives(&self) -> bool {
        matches!(self, Self::Home | Self::PostIndex | Self::Projects)
    }

    fn describe(&self) -> String {
        match self {
            Self::Home => "home page".to_string(),
            Self::PostIndex => "posts index".to_string(),
            Self::Projects => "projects page".to_string(),
            Self::Post(post) => format!("post {}", post.slug),
            Self::Page(page) => format!("page {}", page.slug),
        }
    }

    /// Where the page comes from, for error messages.
    fn origin(&self) -> String {
        match self {
            Self::Post(post) => post.source_path.display().to_string(),
            Self::Page(page) => page.source_path.display().to_string(),
            _ => format!("the built-in {}", self.describe()),
        }
    }
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo<'a> {
    /// Site-relative URL
    url: String,

    /// Output path
    output_path: PathBuf,

    kind: PageKind<'a>,
}

/// A page after rendering.
struct RenderedPage {
    url: String,
    output_path: PathBuf,
    html: String,
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    kit: Box<dyn Primitives>,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a builder using the stock component kit.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_kit(config, Box::new(BoilerplateKit::new()))
    }

    /// Create a builder rendering partials through `kit`.
    pub fn with_kit(config: BuildConfig, kit: Box<dyn Primitives>) -> Self {
        Self {
            config,
            kit,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let integrations = &self.config.integrations;

        let theme: CodeTheme = integrations.markdown_theme.parse()?;

        let store = ContentStore::load(&self.config.content_dir)?;

        let pages = self.plan_pages(&store)?;

        if !integrations.react_support {
            if let Some(page) = pages.iter().find(|p| p.kind.needs_primitives()) {
                return Err(BuildError::IntegrationRequired {
                    integration: "react_support",
                    needed_by: page.kind.describe(),
                });
            }
        }

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", self.config.output_dir.display(), e)))?;

        let nav_links = self.nav_links(&store);
        let year = Some(chrono::Local::now().year());

        // Render pages in parallel
        let rendered: Vec<RenderedPage> = pages
            .par_iter()
            .map(|page| self.render_page(page, &store, theme, &nav_links, year))
            .collect::<Result<_, _>>()?;

        for page in &rendered {
            if let Some(parent) = page.output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::write(&page.output_path, &page.html)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", page.output_path.display(), e)))?;
            tracing::debug!("Wrote {}", page.url);
        }

        let css_classes = if integrations.utility_css {
            self.generate_stylesheet(&rendered)?
        } else {
            0
        };

        let max_width = integrations
            .image_optimization
            .then_some(self.config.max_image_width);
        let public = AssetPipeline::copy_public(&self.config.public_dir, &self.config.output_dir, max_width)
            .map_err(|e| BuildError::WriteError(format!("public assets: {}", e)))?;

        let sitemap = self.generate_sitemap(&pages)?;
        self.generate_robots(sitemap)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: rendered.len(),
            posts: store.posts.len(),
            css_classes,
            assets: public.copied + public.resized,
            images_resized: public.resized,
            sitemap,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Every page the site consists of, in sitemap order. Two pages claiming
    /// the same URL is an error.
    fn plan_pages<'a>(&self, store: &'a ContentStore) -> Result<Vec<PageInfo<'a>>, BuildError> {
        let mut pages = vec![
            self.page_info("/".to_string(), PageKind::Home),
            self.page_info("/posts/".to_string(), PageKind::PostIndex),
        ];
        pages.extend(
            store
                .posts
                .iter()
                .map(|post| self.page_info(post.url.clone(), PageKind::Post(post))),
        );
        pages.push(self.page_info("/projects/".to_string(), PageKind::Projects));
        pages.extend(
            store
                .pages
                .iter()
                .map(|page| self.page_info(page.url.clone(), PageKind::Page(page))),
        );

        let mut seen: HashMap<&str, &PageKind<'a>> = HashMap::new();
        for page in &pages {
            if let Some(first) = seen.insert(page.url.as_str(), &page.kind) {
                return Err(BuildError::DuplicateUrl {
                    url: page.url.clone(),
                    first: first.origin(),
                    second: page.kind.origin(),
                });
            }
        }

        Ok(pages)
    }

    fn page_info<'a>(&self, url: String, kind: PageKind<'a>) -> PageInfo<'a> {
        let output_path = self.output_path(&url);
        PageInfo {
            url,
            output_path,
            kind,
        }
    }

    /// `/posts/hello/` -> `dist/posts/hello/index.html`
    fn output_path(&self, url: &str) -> PathBuf {
        let mut path = self.config.output_dir.clone();
        for segment in url.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }

    fn nav_links(&self, store: &ContentStore) -> Vec<(String, String)> {
        let mut links = vec![
            ("Home".to_string(), "/".to_string()),
            ("Projects".to_string(), "/projects/".to_string()),
            ("Posts".to_string(), "/posts/".to_string()),
        ];
        links.extend(
            store
                .pages
                .iter()
                .map(|page| (page.frontmatter.title.clone(), page.url.clone())),
        );
        links
    }

    fn render_page(
        &self,
        page: &PageInfo<'_>,
        store: &ContentStore,
        theme: CodeTheme,
        nav_links: &[(String, String)],
        year: Option<i32>,
    ) -> Result<RenderedPage, BuildError> {
        let kit = self.kit.as_ref();
        let config = &self.config;

        let mut context = Context {
            title: config.title.clone(),
            description: config.description.clone(),
            site_title: config.title.clone(),
            author: config.author.clone(),
            nav: navigation(nav_links, &page.url),
            stylesheet: config
                .integrations
                .utility_css
                .then(|| format!("/{STYLESHEET_PATH}")),
            live_reload: config.live_reload.clone(),
            canonical: config.site_url.as_deref().map(|url| absolute_url(url, &page.url)),
            year,
            ..Default::default()
        };

        let layout = match page.kind {
            PageKind::Home => {
                let body = Markup::concat([
                    config.hero.render(kit)?,
                    ProjectList::new(config.projects.clone())
                        .with_view_all("/projects/")
                        .render(kit)?,
                    RecentPosts::new(store.recent_posts(config.recent_posts)).render(kit)?,
                ]);
                context.content = body.into_string();
                Layout::Home
            }
            PageKind::PostIndex => {
                let title = Markup::concat([
                    Markup::text("All "),
                    kit.gradient_text(Markup::text("Posts"))?,
                ]);
                let body = kit.section(Some(title), kit.blog_gallery(&store.posts)?)?;
                context.title = "Posts".to_string();
                context.content = body.into_string();
                Layout::Home
            }
            PageKind::Projects => {
                context.title = "Projects".to_string();
                context.content = ProjectList::new(config.projects.clone())
                    .render(kit)?
                    .into_string();
                Layout::Home
            }
            PageKind::Post(post) => {
                let fm = &post.frontmatter;
                context.title = fm.title.clone();
                context.description = fm.description.clone();
                context.content = post.doc.render_html(theme);
                context.article = Some(ArticleMeta {
                    date: fm.display_date(),
                    iso_date: fm.iso_date(),
                    img_src: fm.img_src.clone(),
                    img_alt: fm.img_alt.clone(),
                });
                Layout::Article
            }
            PageKind::Page(page) => {
                let fm = &page.frontmatter;
                context.title = fm.title.clone();
                if let Some(description) = &fm.description {
                    context.description = description.clone();
                }
                context.content = page.doc.render_html(theme);
                Layout::Markdown
            }
        };

        let html = self
            .templates
            .render_page(layout, &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", page.kind.describe(), e)))?;

        Ok(RenderedPage {
            url: page.url.clone(),
            output_path: page.output_path.clone(),
            html,
        })
    }

    /// Scan rendered pages and style content files, then write the stylesheet.
    fn generate_stylesheet(&self, rendered: &[RenderedPage]) -> Result<usize, BuildError> {
        let mut classes = BTreeSet::new();
        for page in rendered {
            UtilityEngine::scan(&page.html, &mut classes);
        }

        for pattern in &self.config.style.content {
            let glob = GlobPattern::new(pattern).map_err(|e| BuildError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;

            let files = glob.files(&self.config.root);
            if files.is_empty() {
                tracing::debug!("Style content glob {} matched no files", glob.as_str());
            }
            for file in files {
                let text = fs::read_to_string(&file)
                    .map_err(|e| BuildError::ReadError(format!("{}: {}", file.display(), e)))?;
                UtilityEngine::scan(&text, &mut classes);
            }
        }

        let engine = UtilityEngine::new(&self.config.style.plugins);
        let generated = engine.generate(&classes);

        let path = self.config.output_dir.join(STYLESHEET_PATH);
        AssetPipeline::write_stylesheet(&path, &generated.css, self.config.minify)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            "Wrote {} utility classes to {}",
            generated.classes.len(),
            path.display()
        );

        Ok(generated.classes.len())
    }

    /// Returns whether a sitemap was written.
    fn generate_sitemap(&self, pages: &[PageInfo<'_>]) -> Result<bool, BuildError> {
        if !self.config.integrations.sitemap {
            return Ok(false);
        }
        let Some(site_url) = self.config.site_url.as_deref() else {
            tracing::warn!("Skipping sitemap.xml: no site url configured");
            return Ok(false);
        };

        let mut sitemap = Sitemap::default();
        for page in pages {
            let lastmod = match page.kind {
                PageKind::Post(post) => Some(post.frontmatter.iso_date()),
                _ => None,
            };
            sitemap.push(site_url, &page.url, lastmod);
        }

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap.into_xml())?;
        Ok(true)
    }

    fn generate_robots(&self, sitemap_written: bool) -> Result<(), BuildError> {
        if !self.config.integrations.robots_txt {
            return Ok(());
        }

        let sitemap_url = match (sitemap_written, self.config.site_url.as_deref()) {
            (true, Some(url)) => Some(absolute_url(url, "/sitemap.xml")),
            _ => None,
        };

        write_file(
            &self.config.output_dir.join("robots.txt"),
            &robots_txt(sitemap_url.as_deref()),
        )
    }
}

/// Navigation items with the entry for `current` marked active.
///
/// Section links stay active on their sub-pages: `/posts/` is active on
/// `/posts/hello/`.
pub fn navigation(links: &[(String, String)], current: &str) -> Vec<NavItem> {
    links
        .iter()
        .map(|(title, path)| NavItem {
            title: title.clone(),
            path: path.clone(),
            active: if path == "/" {
                current == "/"
            } else {
                current.starts_with(path.as_str())
            },
        })
        .collect()
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const POST: &str = r#"---
title: Building nRF24L01 radios
description: Cheap 2.4GHz links between microcontrollers
pubDate: 2023-03-05
imgSrc: /images/radio.png
imgAlt: A radio module
---
# Wiring

```cpp
radio.begin();
```
"#;

    const OLDER_POST: &str = r#"---
title: Hello World
description: First post
pubDate: Sep 10 2022
imgSrc: /images/hello.png
imgAlt: Hello
---
Hello there.
"#;

    const ABOUT: &str = "---\ntitle: About\n---\nI build things.\n";

    fn site() -> (TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let root = temp.path().to_path_buf();
        fs::create_dir_all(root.join("content/posts")).unwrap();
        fs::create_dir_all(root.join("content/pages")).unwrap();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("content/posts/radios.md"), POST).unwrap();
        fs::write(root.join("content/posts/hello-world.md"), OLDER_POST).unwrap();
        fs::write(root.join("content/pages/about.md"), ABOUT).unwrap();
        fs::write(root.join("public/favicon.svg"), "<svg/>").unwrap();

        let config = BuildConfig {
            content_dir: root.join("content"),
            public_dir: root.join("public"),
            output_dir: root.join("dist"),
            site_url: Some("https://example.com".to_string()),
            root,
            ..Default::default()
        };
        (temp, config)
    }

    #[tokio::test]
    async fn builds_all_pages() {
        let (_temp, config) = site();
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 6);
        assert_eq!(result.posts, 2);
        for page in [
            "index.html",
            "posts/index.html",
            "posts/radios/index.html",
            "posts/hello-world/index.html",
            "projects/index.html",
            "about/index.html",
        ] {
            assert!(out.join(page).exists(), "missing {page}");
        }
        assert_eq!(fs::read_to_string(out.join("favicon.svg")).unwrap(), "<svg/>");
    }

    #[tokio::test]
    async fn home_page_composes_partials() {
        let (_temp, config) = site();
        let out = config.output_dir.clone();

        SiteBuilder::new(config).build().await.unwrap();

        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(home.contains("Vaughan&#39;s Tech</span>"));
        assert!(home.contains("Homemade Radios"));
        assert!(home.contains("View all Projects"));
        assert_eq!(home.matches("data-card=\"post\"").count(), 2);
        let newer = home.find("Building nRF24L01 radios").unwrap();
        let older = home.find("Hello World").unwrap();
        assert!(newer < older);

        let projects = fs::read_to_string(out.join("projects/index.html")).unwrap();
        assert!(!projects.contains("View all Projects"));
        assert_eq!(projects.matches("data-card=\"project\"").count(), 2);
    }

    #[tokio::test]
    async fn renders_posts_with_theme() {
        let (_temp, config) = site();
        let out = config.output_dir.clone();

        SiteBuilder::new(config).build().await.unwrap();

        let post = fs::read_to_string(out.join("posts/radios/index.html")).unwrap();
        assert!(post.contains("<time datetime=\"2023-03-05\">Mar 5, 2023</time>"));
        assert!(post.contains("data-theme=\"monokai\""));
        assert!(post.contains("class=\"language-cpp\""));
        let year = chrono::Local::now().year();
        assert!(post.contains(&format!("&copy; Copyright {year} by Michael Vaughan.")));
    }

    #[tokio::test]
    async fn writes_sitemap_and_robots() {
        let (_temp, config) = site();
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();
        assert!(result.sitemap);

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 6);
        assert!(sitemap.contains("<loc>https://example.com/posts/radios/</loc>"));
        assert!(sitemap.contains("<lastmod>2023-03-05</lastmod>"));
        assert!(sitemap.contains("<loc>https://example.com/about/</loc>"));

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert_eq!(
            robots,
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[tokio::test]
    async fn sitemap_needs_site_url() {
        let (_temp, mut config) = site();
        config.site_url = None;
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert!(!result.sitemap);
        assert!(!out.join("sitemap.xml").exists());
        assert_eq!(
            fs::read_to_string(out.join("robots.txt")).unwrap(),
            "User-agent: *\nAllow: /\n"
        );
    }

    #[tokio::test]
    async fn generates_utility_stylesheet() {
        let (_temp, config) = site();
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        let css = fs::read_to_string(out.join("assets/main.css")).unwrap();
        assert!(result.css_classes > 0);
        assert!(css.contains(".bg-slate-900{"));
        assert!(css.contains(".aspect-w-3"));
        assert!(css.contains("@media (min-width:768px)"));

        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(home.contains("<link rel=\"stylesheet\""));
    }

    #[tokio::test]
    async fn utility_css_can_be_disabled() {
        let (_temp, mut config) = site();
        config.integrations.utility_css = false;
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.css_classes, 0);
        assert!(!out.join("assets/main.css").exists());
        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(!home.contains("<link rel=\"stylesheet\""));
    }

    #[tokio::test]
    async fn partial_pages_require_primitives() {
        let (_temp, mut config) = site();
        config.integrations.react_support = false;

        let err = SiteBuilder::new(config).build().await.unwrap_err();

        assert!(matches!(
            err,
            BuildError::IntegrationRequired {
                integration: "react_support",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_theme() {
        let (_temp, mut config) = site();
        config.integrations.markdown_theme = "vaporwave".to_string();

        let err = SiteBuilder::new(config).build().await.unwrap_err();
        assert!(matches!(err, BuildError::Theme(_)));
    }

    #[tokio::test]
    async fn rejects_bad_style_glob() {
        let (_temp, mut config) = site();
        config.style.content = vec!["content/**/*.{md".to_string()];

        let err = SiteBuilder::new(config).build().await.unwrap_err();
        assert!(matches!(err, BuildError::InvalidGlob { .. }));
    }

    #[tokio::test]
    async fn page_cannot_shadow_builtin_index() {
        let (_temp, config) = site();
        fs::write(
            config.content_dir.join("pages/projects.md"),
            "---\ntitle: Projects\n---\nMine.\n",
        )
        .unwrap();
        let out = config.output_dir.clone();

        let err = SiteBuilder::new(config).build().await.unwrap_err();

        match err {
            BuildError::DuplicateUrl { url, first, second } => {
                assert_eq!(url, "/projects/");
                assert_eq!(first, "the built-in projects page");
                assert!(second.ends_with("projects.md"), "{second}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.join("index.html").exists());
    }

    #[tokio::test]
    async fn posts_in_folders_get_distinct_urls() {
        let (_temp, config) = site();
        let posts = config.content_dir.join("posts");
        for (dir, title) in [("a", "First"), ("b", "Second")] {
            fs::create_dir_all(posts.join(dir)).unwrap();
            fs::write(
                posts.join(dir).join("note.md"),
                format!("---\ntitle: {title}\ndescription: d\npubDate: 2021-06-01\nimgSrc: /n.png\nimgAlt: n\n---\n{title} body\n"),
            )
            .unwrap();
        }
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 8);
        let first = fs::read_to_string(out.join("posts/a/note/index.html")).unwrap();
        let second = fs::read_to_string(out.join("posts/b/note/index.html")).unwrap();
        assert!(first.contains("First body"));
        assert!(second.contains("Second body"));
        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("/posts/a/note/</loc>").count(), 1);
    }

    #[tokio::test]
    async fn recent_posts_are_limited() {
        let (_temp, mut config) = site();
        config.recent_posts = 1;
        let out = config.output_dir.clone();

        SiteBuilder::new(config).build().await.unwrap();

        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert_eq!(home.matches("data-card=\"post\"").count(), 1);
        let index = fs::read_to_string(out.join("posts/index.html")).unwrap();
        assert_eq!(index.matches("data-card=\"post\"").count(), 2);
    }

    #[test]
    fn marks_section_as_active() {
        let links = vec![
            ("Home".to_string(), "/".to_string()),
            ("Posts".to_string(), "/posts/".to_string()),
        ];

        let nav = navigation(&links, "/posts/hello/");

        assert!(!nav[0].active);
        assert!(nav[1].active);
        assert!(navigation(&links, "/")[0].active);
    }
}
