//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::project_root;

/// Files written by `init`, relative to the project root.
const SCAFFOLD: [(&str, &str); 3] = [
    ("content/posts/hello-world.md", DEFAULT_POST),
    ("content/pages/about.md", DEFAULT_ABOUT),
    ("public/.gitkeep", ""),
];

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let root = project_root(config_path);
    let written = scaffold(&root, config_path, yes)?;

    if written == 0 {
        tracing::warn!("Nothing to do: files already exist. Use --yes to overwrite.");
        return Ok(());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio dev' to start the development server.");

    Ok(())
}

/// Write the config and starter content. Existing files are kept unless
/// `overwrite` is set. Returns how many files were written.
fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<usize> {
    let mut written = 0;

    if write_if_missing(config_path, DEFAULT_CONFIG, overwrite)? {
        written += 1;
    }

    for (relative, contents) in SCAFFOLD {
        if write_if_missing(&root.join(relative), contents, overwrite)? {
            written += 1;
        }
    }

    Ok(written)
}

fn write_if_missing(path: &Path, contents: &str, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(true)
}

const DEFAULT_CONFIG: &str = r#"# Folio configuration

[site]
title = "Vaughan's Tech"
description = "Portfolio and blog of Michael Vaughan"
author = "Michael Vaughan"
# Absolute URL of the deployed site; needed for sitemap.xml
# url = "https://example.com"

[integrations]
react_support = true
utility_css = true
sitemap = true
robots_txt = true
image_optimization = true
markdown_theme = "monokai"

[style]
content = ["content/**/*.{md,mdx,html}"]
plugins = ["aspect-ratio", "typography"]

[build]
content = "content"
public = "public"
output = "dist"
minify = true
recent_posts = 3
max_image_width = 1600

[hero]
about = "/about/"

# Uncomment to replace the built-in project cards
# [[projects]]
# name = "Homemade Radios"
# description = "Talking between microcontrollers with nRF24L01 modules"
# link = "/projects/nrf24l01"
# image = { src = "/images/projects/nrf24l01.png", alt = "nRF24L01 radio module" }
# category = [{ label = "Arduino", color = "fuchsia" }, { label = "C++", color = "rose" }]
"#;

const DEFAULT_POST: &str = r#"---
title: Hello World
description: The first post on this site
pubDate: 2024-01-01
imgSrc: /images/hello-world.png
imgAlt: A terminal printing hello world
---

# Hello World

This post lives in `content/posts/hello-world.md`. Every markdown file in
`content/posts/` becomes a post under `/posts/`.

```rust
fn main() {
    println!("Hello, world!");
}
```

Set `draft: true` in the frontmatter to keep a post out of the build.
"#;

const DEFAULT_ABOUT: &str = r#"---
title: About
description: Who runs this site
---

Hi, I'm Michael. I write about electronics, embedded systems and the web.
"#;
