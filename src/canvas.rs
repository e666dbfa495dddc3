//! Rasterizes a character grid onto an RGB canvas. The canvas snaps to
//! the glyph grid, so its size is always columns by rows in cells with
//! no partial cell at the edges.

use crate::converter::AsciiBlock;
use crate::font::{FontFace, GlyphCell};
use crate::palette::Palette;
use image::RgbImage;

/// Coverage below this renders as background. Binarizing keeps every
/// output pixel at exactly the foreground or background color instead
/// of an antialiased blend.
const INK_THRESHOLD: f32 = 0.3;

/// Draw `block` with `face`, one glyph per cell, over a solid
/// background.
pub fn render(block: &AsciiBlock, face: &FontFace, cell: GlyphCell, palette: &Palette) -> RgbImage {
    let width = block.columns() as u32 * cell.width;
    let height = block.rows() as u32 * cell.height;
    let mut image = RgbImage::from_pixel(width, height, palette.background);

    let ascent = face.ascent();
    for (row, line) in block.lines().enumerate() {
        let baseline_y = row as f32 * cell.height as f32 + ascent;
        for (col, &ch) in line.iter().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                continue;
            }
            let cell_x = col as f32 * cell.width as f32;
            let Some(outlined) = face.outline(ch, cell_x, baseline_y) else {
                continue;
            };
            // Pixel bounds can start left of the cell or spill past the
            // canvas for glyphs with overhang, so each pixel is placed
            // from the signed bounds and clipped.
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                if coverage < INK_THRESHOLD {
                    return;
                }
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                image.put_pixel(px as u32, py as u32, palette.foreground);
            });
        }
    }
    image
}
