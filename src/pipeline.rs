//! Render pipeline for ascii-backdrop.
//!
//! This module sequences one render: validate paths, load the font, fit
//! the grid, stage the preprocessed input, run the converter, draw the
//! canvas, and write the PNG.

use crate::canvas;
use crate::converter::{AsciiSource, ConvertError, ExternalConverter};
use crate::font::{FontError, FontFace};
use crate::palette::Palette;
use crate::prep::{self, PrepError};
use crate::resolution::{Dimensions, GridSize, ResolutionError};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Errors that can occur during a render run.
///
/// Stage errors already name their stage in their own message, so the
/// wrappers pass them through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input file '{}' does not exist", .0.display())]
    InputMissing(PathBuf),
    #[error("Input path '{}' is not a file", .0.display())]
    InputNotAFile(PathBuf),
    #[error("Output directory '{}' does not exist", .0.display())]
    OutputDirMissing(PathBuf),
    #[error("Output path '{}' is a directory", .0.display())]
    OutputIsDirectory(PathBuf),
    #[error("{0}")]
    Resolution(#[from] ResolutionError),
    #[error("{0}")]
    Font(#[from] FontError),
    #[error("{0}")]
    Prep(#[from] PrepError),
    #[error("{0}")]
    Convert(#[from] ConvertError),
    #[error("Failed to encode PNG: {0}")]
    Encode(image::ImageError),
    #[error("Failed to write output file '{path}': {source}", path = .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything one render needs, merged from CLI, config, and defaults
/// before the pipeline starts.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub canvas: Dimensions,
    pub font: PathBuf,
    pub size: u32,
    pub palette: Palette,
    pub braille: bool,
    pub converter_command: String,
}

/// What a successful render produced.
#[derive(Debug)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub image_size: Dimensions,
    pub grid: GridSize,
}

/// Run the full pipeline with the external converter.
pub fn run(options: &RenderOptions) -> Result<RenderSummary, PipelineError> {
    let converter = ExternalConverter::new(options.converter_command.clone(), options.braille);
    run_with_source(options, &converter)
}

/// Run the pipeline against any ASCII source. Used directly by tests to
/// render without the converter binary installed.
pub fn run_with_source(
    options: &RenderOptions,
    source: &dyn AsciiSource,
) -> Result<RenderSummary, PipelineError> {
    validate_paths(&options.input, &options.output)?;

    let face = FontFace::load(&options.font, options.size)?;
    let cell = face.cell();
    let grid = GridSize::fit(options.canvas, cell)?;
    log::debug!(
        "font {} at {}pt: cell {}x{}px, grid {} for canvas {}",
        face.path().display(),
        options.size,
        cell.width,
        cell.height,
        grid,
        options.canvas
    );

    let staged = prep::fit_to_canvas(&options.input, options.canvas)?;
    let block = source.convert(staged.path(), grid)?;

    let image = canvas::render(&block, &face, cell, &options.palette);
    let image_size = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    write_png(&image, &options.output)?;

    Ok(RenderSummary {
        output: options.output.clone(),
        image_size,
        grid,
    })
}

/// Check both endpoints of the pipeline before any work happens.
fn validate_paths(input: &Path, output: &Path) -> Result<(), PipelineError> {
    if !input.exists() {
        return Err(PipelineError::InputMissing(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(PipelineError::InputNotAFile(input.to_path_buf()));
    }
    if output.is_dir() {
        return Err(PipelineError::OutputIsDirectory(output.to_path_buf()));
    }
    // A bare filename has an empty parent, which means the current
    // directory.
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(PipelineError::OutputDirMissing(parent));
    }
    Ok(())
}

/// Encode the image fully in memory, then write it in one call so an
/// interrupted run never leaves a truncated file behind.
fn write_png(image: &RgbImage, output: &Path) -> Result<(), PipelineError> {
    let mut encoded = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .map_err(PipelineError::Encode)?;
    std::fs::write(output, &encoded).map_err(|e| PipelineError::WriteFailed {
        path: output.to_path_buf(),
        source: e,
    })
}
