//! Asset pipeline for the stylesheet and public files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lightningcss::targets::{Browsers, Targets};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::images::{is_optimizable, optimize_image, ImageOutcome};

/// Counts from copying the public directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicAssets {
    pub copied: usize,
    pub resized: usize,
}

/// Oldest browsers the generated stylesheet supports.
///
/// Safari 14 predates media query range syntax (16.4).
pub fn browser_targets() -> Targets {
    Targets::from(Browsers {
        chrome: Some(version(90)),
        edge: Some(version(90)),
        firefox: Some(version(88)),
        safari: Some(version(14)),
        ios_saf: Some(version(14)),
        ..Browsers::default()
    })
}

/// lightningcss packs versions as `major << 16 | minor << 8 | patch`.
const fn version(major: u32) -> u32 {
    major << 16
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Minify CSS using lightningcss.
    ///
    /// Output stays valid for [`browser_targets`], so media queries keep the
    /// `min-width` form instead of range syntax.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                targets: browser_targets(),
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Write a stylesheet, minified when asked. A stylesheet lightningcss
    /// rejects is written unminified.
    pub fn write_stylesheet(path: &Path, css: &str, minify: bool) -> io::Result<usize> {
        let css = if minify {
            match Self::minify_css(css) {
                Ok(min) => min,
                Err(e) => {
                    tracing::warn!("Writing {} unminified: {}", path.display(), e);
                    css.to_string()
                }
            }
        } else {
            css.to_string()
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &css)?;
        Ok(css.len())
    }

    /// Mirror `public_dir` into `output_dir`. With `max_image_width` set,
    /// oversized raster images are downscaled on the way.
    pub fn copy_public(
        public_dir: &Path,
        output_dir: &Path,
        max_image_width: Option<u32>,
    ) -> io::Result<PublicAssets> {
        if !public_dir.exists() {
            tracing::debug!("No public directory at {}", public_dir.display());
            return Ok(PublicAssets::default());
        }

        let files: Vec<PathBuf> = WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();

        let resized: Vec<bool> = files
            .par_iter()
            .map(|source| {
                let relative = source.strip_prefix(public_dir).unwrap_or(source);
                let dest = output_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                copy_one(source, &dest, max_image_width)
            })
            .collect::<io::Result<_>>()?;

        let resized = resized.iter().filter(|r| **r).count();
        Ok(PublicAssets {
            copied: files.len() - resized,
            resized,
        })
    }
}

/// Returns whether the file was resized rather than copied.
fn copy_one(source: &Path, dest: &Path, max_width: Option<u32>) -> io::Result<bool> {
    if let Some(max_width) = max_width.filter(|_| is_optimizable(source)) {
        match optimize_image(source, dest, max_width) {
            Ok(ImageOutcome::Resized { .. }) => return Ok(true),
            Ok(ImageOutcome::Unchanged) => {}
            Err(e) => {
                tracing::warn!("Copying {} unprocessed: {}", source.display(), e);
            }
        }
    }

    fs::copy(source, dest)?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn minifies_css() {
        let css = r#"
.px-3 {
    padding-left: 0.75rem;
    padding-right: 0.75rem;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".px-3"));
    }

    #[test]
    fn keeps_min_width_media_queries() {
        let css = "@media (min-width: 768px) {\n  .md\\:flex {\n    display: flex;\n  }\n}\n";

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert_eq!(minified, "@media (min-width:768px){.md\\:flex{display:flex}}");
    }

    #[test]
    fn writes_stylesheet_into_nested_dir() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("assets/main.css");

        AssetPipeline::write_stylesheet(&path, ".flex {\n  display: flex;\n}\n", true).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), ".flex{display:flex}");
    }

    #[test]
    fn copies_public_tree() {
        let temp = tempdir().unwrap();
        let public = temp.path().join("public");
        let out = temp.path().join("dist");
        fs::create_dir_all(public.join("images/projects")).unwrap();
        fs::write(public.join("favicon.svg"), "<svg/>").unwrap();
        RgbaImage::from_pixel(32, 16, Rgba([0, 0, 0, 255]))
            .save(public.join("images/projects/radio.png"))
            .unwrap();
        fs::write(public.join("images/broken.png"), b"garbage").unwrap();

        let result = AssetPipeline::copy_public(&public, &out, Some(8)).unwrap();

        assert_eq!(result, PublicAssets { copied: 2, resized: 1 });
        assert_eq!(fs::read_to_string(out.join("favicon.svg")).unwrap(), "<svg/>");
        assert_eq!(fs::read(out.join("images/broken.png")).unwrap(), b"garbage");
        assert_eq!(
            image::image_dimensions(out.join("images/projects/radio.png")).unwrap(),
            (8, 4)
        );
    }

    #[test]
    fn copies_verbatim_without_width_limit() {
        let temp = tempdir().unwrap();
        let public = temp.path().join("public");
        let out = temp.path().join("dist");
        fs::create_dir_all(&public).unwrap();
        RgbaImage::from_pixel(32, 16, Rgba([0, 0, 0, 255]))
            .save(public.join("wide.png"))
            .unwrap();

        let result = AssetPipeline::copy_public(&public, &out, None).unwrap();

        assert_eq!(result, PublicAssets { copied: 1, resized: 0 });
        assert_eq!(image::image_dimensions(out.join("wide.png")).unwrap(), (32, 16));
    }

    #[test]
    fn missing_public_dir_is_empty() {
        let temp = tempdir().unwrap();
        let result =
            AssetPipeline::copy_public(&temp.path().join("nope"), temp.path(), Some(8)).unwrap();
        assert_eq!(result, PublicAssets::default());
    }
}
