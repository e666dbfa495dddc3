//! Input preprocessing. Scales the source image to cover the target
//! canvas before conversion so the character grid samples the whole
//! frame instead of a letterboxed or stretched one.

use crate::resolution::Dimensions;
use image::imageops::FilterType;
use image::ImageFormat;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("Failed to open input image '{path}': {source}", path = .path.display())]
    Open {
        path: std::path::PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to stage resized image: {0}")]
    Stage(#[from] std::io::Error),
    #[error("Failed to encode resized image: {0}")]
    Encode(image::ImageError),
}

/// Resize `input` to cover `canvas`, cropping the overflow, and stage
/// the result as a temporary PNG. The staged file is deleted when the
/// returned handle drops.
pub fn fit_to_canvas(input: &Path, canvas: Dimensions) -> Result<NamedTempFile, PrepError> {
    let source = image::open(input).map_err(|e| PrepError::Open {
        path: input.to_path_buf(),
        source: e,
    })?;
    let fitted = source.resize_to_fill(canvas.width, canvas.height, FilterType::Lanczos3);

    let staged = tempfile::Builder::new()
        .prefix("ascii-backdrop-")
        .suffix(".png")
        .tempfile()?;
    fitted
        .save_with_format(staged.path(), ImageFormat::Png)
        .map_err(PrepError::Encode)?;
    log::debug!(
        "staged {} cover fit of {} at {}",
        canvas,
        input.display(),
        staged.path().display()
    );
    Ok(staged)
}
