//! Loading posts and pages from a content directory.
//!
//! Layout:
//!
//! ```text
//! content/
//! ├── posts/        # blog posts, one markdown file each
//! └── pages/        # standalone pages (about, ...)
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter::{PageFrontmatter, PostFrontmatter};
use crate::parser::{parse_document, ParseError, ParsedDoc};

/// A published blog post.
#[derive(Debug, Clone)]
pub struct Post {
    /// URL slug derived from the path below `posts/`
    pub slug: String,

    /// Site-relative URL, e.g. `/posts/hello-world/`
    pub url: String,

    /// Typed frontmatter
    pub frontmatter: PostFrontmatter,

    /// Parsed markdown body
    pub doc: ParsedDoc<PostFrontmatter>,

    /// Source file
    pub source_path: PathBuf,
}

/// A standalone markdown page.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL slug derived from the file path
    pub slug: String,

    /// Site-relative URL, e.g. `/about/`
    pub url: String,

    /// Typed frontmatter
    pub frontmatter: PageFrontmatter,

    /// Parsed markdown body
    pub doc: ParsedDoc<PageFrontmatter>,

    /// Source file
    pub source_path: PathBuf,
}

/// Errors that can occur when loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Missing frontmatter in {0}")]
    MissingFrontmatter(String),
}

/// All posts and pages of a site.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    /// Published posts, newest first
    pub posts: Vec<Post>,

    /// Standalone pages, ordered by URL
    pub pages: Vec<Page>,
}

impl ContentStore {
    /// Load all content below `content_dir`.
    ///
    /// A missing directory yields an empty store.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        if !content_dir.exists() {
            tracing::warn!("Content directory not found: {}", content_dir.display());
            return Ok(Self::default());
        }

        let posts_dir = content_dir.join("posts");
        let mut posts = Vec::new();
        for path in markdown_files(&posts_dir) {
            let (doc, frontmatter) = load_document::<PostFrontmatter>(&path)?;
            if frontmatter.draft {
                tracing::debug!("Skipping draft {}", path.display());
                continue;
            }
            let slug = relative_slug(&posts_dir, &path);
            posts.push(Post {
                url: format!("/posts/{}/", slug),
                slug,
                frontmatter,
                doc,
                source_path: path,
            });
        }
        sort_posts(&mut posts);

        let pages_dir = content_dir.join("pages");
        let mut pages = Vec::new();
        for path in markdown_files(&pages_dir) {
            let (doc, frontmatter) = load_document::<PageFrontmatter>(&path)?;
            let slug = relative_slug(&pages_dir, &path);
            pages.push(Page {
                url: format!("/{}/", slug),
                slug,
                frontmatter,
                doc,
                source_path: path,
            });
        }
        pages.sort_by(|a, b| a.url.cmp(&b.url));

        tracing::debug!(
            "Loaded {} posts and {} pages from {}",
            posts.len(),
            pages.len(),
            content_dir.display()
        );

        Ok(Self { posts, pages })
    }

    /// The `limit` most recent posts.
    pub fn recent_posts(&self, limit: usize) -> &[Post] {
        &self.posts[..limit.min(self.posts.len())]
    }
}

/// Sort posts newest first, breaking ties by title.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| match b.frontmatter.pub_date.cmp(&a.frontmatter.pub_date) {
        Ordering::Equal => a.frontmatter.title.cmp(&b.frontmatter.title),
        other => other,
    });
}

fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("md") | Some("mdx")
            )
        })
        .collect();
    files.sort();
    files
}

fn load_document<T: serde::de::DeserializeOwned + Clone>(
    path: &Path,
) -> Result<(ParsedDoc<T>, T), ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let doc = parse_document::<T>(&source).map_err(|source| ContentError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(
        "Parsed {} ({} code blocks, {} headings)",
        path.display(),
        doc.code_blocks.len(),
        doc.toc.len()
    );

    let frontmatter = doc
        .frontmatter
        .clone()
        .ok_or_else(|| ContentError::MissingFrontmatter(path.display().to_string()))?;

    Ok((doc, frontmatter))
}

/// `pages/about.md` -> `about`, `pages/projects/radios.md` -> `projects/radios`,
/// `pages/notes/index.md` -> `notes`.
fn relative_slug(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    let parent = relative
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    match (parent.is_empty(), stem == "index") {
        (true, _) => stem.to_string(),
        (false, true) => parent,
        (false, false) => format!("{}/{}", parent, stem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str, draft: bool) {
        fs::write(
            dir.join(name),
            format!(
                "---\ntitle: {title}\ndescription: About {title}\npubDate: {date}\nimgSrc: /img.png\nimgAlt: cover\ndraft: {draft}\n---\n# {title}\n"
            ),
        )
        .unwrap();
    }

    #[test]
    fn loads_posts_newest_first_without_drafts() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();

        write_post(&posts, "older.md", "Older", "2021-01-05", false);
        write_post(&posts, "newer.md", "Newer", "Sep 10 2022", false);
        write_post(&posts, "secret.md", "Secret", "2023-01-01", true);

        let store = ContentStore::load(temp.path()).unwrap();

        let titles: Vec<_> = store
            .posts
            .iter()
            .map(|p| p.frontmatter.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
        assert_eq!(store.posts[0].url, "/posts/newer/");
        assert_eq!(store.recent_posts(1).len(), 1);
        assert_eq!(store.recent_posts(10).len(), 2);
    }

    #[test]
    fn loads_pages() {
        let temp = tempdir().unwrap();
        let pages = temp.path().join("pages");
        fs::create_dir_all(pages.join("notes")).unwrap();
        fs::write(pages.join("about.md"), "---\ntitle: About\n---\nHi").unwrap();
        fs::write(pages.join("notes/index.md"), "---\ntitle: Notes\n---\n").unwrap();

        let store = ContentStore::load(temp.path()).unwrap();

        let urls: Vec<_> = store.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/about/", "/notes/"]);
    }

    #[test]
    fn nested_posts_keep_their_folder() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(posts.join("a")).unwrap();
        fs::create_dir_all(posts.join("b")).unwrap();
        write_post(&posts.join("a"), "note.md", "First", "2022-01-01", false);
        write_post(&posts.join("b"), "note.md", "Second", "2022-01-02", false);

        let store = ContentStore::load(temp.path()).unwrap();

        let urls: Vec<_> = store.posts.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/posts/b/note/", "/posts/a/note/"]);
        assert_eq!(store.posts[1].slug, "a/note");
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = tempdir().unwrap();
        let store = ContentStore::load(&temp.path().join("nope")).unwrap();
        assert!(store.posts.is_empty());
        assert!(store.pages.is_empty());
    }

    #[test]
    fn errors_on_missing_frontmatter() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("bare.md"), "# No frontmatter").unwrap();

        let result = ContentStore::load(temp.path());

        assert!(matches!(result, Err(ContentError::MissingFrontmatter(_))));
    }

    #[test]
    fn errors_carry_path() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("bad.md"), "---\ntitle: Bad\npubDate: someday\n---\n").unwrap();

        let err = ContentStore::load(temp.path()).unwrap_err();

        assert!(err.to_string().contains("bad.md"));
    }
}
