//! Downscaling of oversized raster images.

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use image::ImageResult;

/// What happened to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Already within the width limit; the caller copies it as-is.
    Unchanged,
    /// Resized and re-encoded into the destination.
    Resized { from: (u32, u32), to: (u32, u32) },
}

/// Whether the file is a format we re-encode.
pub fn is_optimizable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| matches!(e.as_str(), "png" | "jpg" | "jpeg" | "webp"))
}

/// Resize `input` to at most `max_width` pixels wide and write it to `output`
/// in the same format. Aspect ratio is preserved.
pub fn optimize_image(input: &Path, output: &Path, max_width: u32) -> ImageResult<ImageOutcome> {
    let (width, height) = image::image_dimensions(input)?;
    if width <= max_width || max_width == 0 {
        return Ok(ImageOutcome::Unchanged);
    }

    let new_height = scaled_height(width, height, max_width);
    let resized = image::open(input)?.resize_exact(max_width, new_height, FilterType::Lanczos3);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    resized.save(output)?;

    tracing::debug!(
        "Resized {} from {}x{} to {}x{}",
        input.display(),
        width,
        height,
        max_width,
        new_height
    );

    Ok(ImageOutcome::Resized {
        from: (width, height),
        to: (max_width, new_height),
    })
}

fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    let scaled = u64::from(height) * u64::from(max_width) / u64::from(width.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}
