//! Resolution presets, custom WIDTHxHEIGHT parsing, and grid sizing.

use clap::ValueEnum;

use crate::font::GlyphCell;

/// Named resolution shorthand accepted by `-p/--preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 1920x1080
    #[value(name = "1080p")]
    P1080,
    /// 1280x720
    #[value(name = "720p")]
    P720,
    /// 3840x2160
    #[value(name = "4k")]
    K4,
}

impl Preset {
    /// The pixel dimensions this preset stands for.
    pub fn dimensions(self) -> Dimensions {
        match self {
            Preset::P1080 => Dimensions { width: 1920, height: 1080 },
            Preset::P720 => Dimensions { width: 1280, height: 720 },
            Preset::K4 => Dimensions { width: 3840, height: 2160 },
        }
    }
}

/// Target canvas size in pixels. Both sides are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Character grid derived from a canvas and a glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    /// Character cells that fit the canvas, floor-rounded per axis.
    pub fn fit(canvas: Dimensions, cell: GlyphCell) -> Result<Self, ResolutionError> {
        let columns = canvas.width.checked_div(cell.width).unwrap_or(0);
        let rows = canvas.height.checked_div(cell.height).unwrap_or(0);
        if columns == 0 || rows == 0 {
            return Err(ResolutionError::TooSmall {
                width: canvas.width,
                height: canvas.height,
                cell_width: cell.width,
                cell_height: cell.height,
            });
        }
        Ok(GridSize { columns, rows })
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Errors from resolving a target resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("Invalid resolution format '{0}'. Use WIDTHxHEIGHT (e.g., 1920x1080)")]
    Malformed(String),
    #[error("Invalid width '{0}' in resolution")]
    BadWidth(String),
    #[error("Invalid height '{0}' in resolution")]
    BadHeight(String),
    #[error("Resolution width and height must be greater than 0")]
    Zero,
    #[error("A resolution preset and a custom resolution cannot both be given")]
    BothGiven,
    #[error("Either a resolution preset or a custom WIDTHxHEIGHT resolution is required")]
    NeitherGiven,
    #[error("Resolution {width}x{height} is smaller than one {cell_width}x{cell_height} glyph cell")]
    TooSmall {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

/// Parse a custom WIDTHxHEIGHT resolution string.
pub fn parse_custom(s: &str) -> Result<Dimensions, ResolutionError> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(ResolutionError::Malformed(s.to_string()));
    }
    let width: u32 = parts[0]
        .parse()
        .map_err(|_| ResolutionError::BadWidth(parts[0].to_string()))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| ResolutionError::BadHeight(parts[1].to_string()))?;
    if width == 0 || height == 0 {
        return Err(ResolutionError::Zero);
    }
    Ok(Dimensions { width, height })
}

/// Resolve the target canvas from exactly one of a preset or a custom
/// resolution. Giving both or neither is an error, mirroring the CLI's
/// mutually exclusive flags for callers that bypass clap.
pub fn resolve(
    preset: Option<Preset>,
    custom: Option<Dimensions>,
) -> Result<Dimensions, ResolutionError> {
    match (preset, custom) {
        (Some(_), Some(_)) => Err(ResolutionError::BothGiven),
        (Some(p), None) => Ok(p.dimensions()),
        (None, Some(d)) => Ok(d),
        (None, None) => Err(ResolutionError::NeitherGiven),
    }
}
