//! Two-color palette parsing from hex strings.

use image::Rgb;

/// Foreground and background colors used on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Default for Palette {
    /// White text on a black background.
    fn default() -> Self {
        Palette {
            foreground: Rgb([255, 255, 255]),
            background: Rgb([0, 0, 0]),
        }
    }
}

/// Errors from parsing a hex color string.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid color '{0}'. Use 3 or 6 hex digits (e.g., ff0000 or f00)")]
    BadLength(String),
    #[error("Invalid hex digit in color '{0}'")]
    BadDigit(String),
}

/// Parse a 3- or 6-digit hex color, with or without a leading '#'.
/// 3-digit colors expand each digit (f0a becomes ff00aa).
pub fn parse_hex(s: &str) -> Result<Rgb<u8>, ColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::BadDigit(s.to_string()));
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::BadLength(s.to_string())),
    };
    // All chars are ASCII hex digits at this point, so byte slicing is safe
    // and the radix parse cannot fail.
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| ColorError::BadDigit(s.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
