//! Font loading and monospace glyph cell metrics.

use ab_glyph::{Font, FontVec, OutlinedGlyph, PxScale, ScaleFont};
use std::path::{Path, PathBuf};

/// Default point size when neither the CLI nor the config gives one.
pub const DEFAULT_SIZE_PT: u32 = 12;

/// Glyph measured for the cell footprint. Every glyph of a monospace
/// face shares the same advance, so which one is arbitrary.
const REFERENCE_GLYPH: char = 'M';

/// Well-known monospace font locations, probed in order when no font
/// is configured. Covers the common Debian/Fedora/Arch layouts plus
/// the macOS system font directory.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/TTF/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
    "/usr/share/fonts/gnu-free/FreeMono.otf",
    "/System/Library/Fonts/Monaco.ttf",
];

/// Pixel footprint of one character cell at a fixed font and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub width: u32,
    pub height: u32,
}

/// Errors from locating or loading a font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font file '{path}': {source}", path = .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{}' is not a valid font file", .0.display())]
    Invalid(PathBuf),
    #[error("Font '{path}' has no unit scale for {size}pt", path = .path.display())]
    Unscalable { path: PathBuf, size: u32 },
    #[error(
        "No monospace font found. Pass one with --font or set one in the config file. Searched:\n  {}",
        .searched.join("\n  ")
    )]
    NoDefaultFont { searched: Vec<String> },
}

/// A font loaded at a fixed point size.
#[derive(Debug)]
pub struct FontFace {
    font: FontVec,
    scale: PxScale,
    path: PathBuf,
}

impl FontFace {
    /// Load a font file at the given point size.
    ///
    /// The point size is converted to a pixel scale through the font's
    /// own unit system rather than a hard-coded DPI constant.
    pub fn load(path: &Path, size: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|e| FontError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        let font =
            FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.to_path_buf()))?;
        let scale = font
            .pt_to_px_scale(size as f32)
            .ok_or_else(|| FontError::Unscalable {
                path: path.to_path_buf(),
                size,
            })?;
        Ok(FontFace {
            font,
            scale,
            path: path.to_path_buf(),
        })
    }

    /// Pixel footprint of one character cell at this face's scale.
    ///
    /// Width is the advance of the reference glyph, height the scaled
    /// line height (ascent minus descent). Sub-pixel values round up so
    /// adjacent cells never overlap.
    pub fn cell(&self) -> GlyphCell {
        let scaled = self.font.as_scaled(self.scale);
        let width = scaled.h_advance(self.font.glyph_id(REFERENCE_GLYPH)).ceil() as u32;
        let height = scaled.height().ceil() as u32;
        GlyphCell {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Distance from the top of a cell down to the glyph baseline.
    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    /// Rasterizable outline of `ch` positioned at the given baseline
    /// point. None for glyphs with no ink (spaces, unmapped characters).
    pub fn outline(&self, ch: char, x: f32, baseline_y: f32) -> Option<OutlinedGlyph> {
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(self.scale, ab_glyph::point(x, baseline_y));
        self.font.outline_glyph(glyph)
    }

    /// The file this face was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolve which font file to use. An explicitly given path always wins
/// and is never substituted; without one, the first readable system
/// candidate is picked.
pub fn resolve_font_path(explicit: Option<&Path>) -> Result<PathBuf, FontError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.is_file() {
            log::debug!("using system font {}", path.display());
            return Ok(path.to_path_buf());
        }
    }
    Err(FontError::NoDefaultFont {
        searched: FONT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
    })
}
