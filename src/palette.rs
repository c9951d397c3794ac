//! Slide color handling: hex parsing, the background/text lookup table and
//! the gradient used by the built-in deck.

use image::Rgb;
use serde::Deserialize;

use crate::error::SlideError;

/// Plain white, used for text on the fixed-offset layout.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// One background color paired with the text color drawn on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaletteEntry {
    /// Background color as `#rrggbb`.
    pub background: String,
    /// Text and ring color as `#rrggbb`.
    pub foreground: String,
}

impl PaletteEntry {
    fn new(background: &str, foreground: &str) -> Self {
        Self { background: background.to_string(), foreground: foreground.to_string() }
    }
}

/// Default background/text pairs: blue, purple, pink, orange, green, red,
/// cyan, indigo.
#[must_use]
pub fn default_palette() -> Vec<PaletteEntry> {
    [
        "#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#ef4444", "#06b6d4", "#8b5cf6",
    ]
    .into_iter()
    .map(|bg| PaletteEntry::new(bg, "#ffffff"))
    .collect()
}

/// A palette whose hex strings have been parsed.
#[derive(Debug, Clone)]
pub struct Palette {
    pairs: Vec<(Rgb<u8>, Rgb<u8>)>,
}

impl Palette {
    /// Parse every entry of the lookup table.
    ///
    /// # Errors
    ///
    /// Returns an error if a color is malformed or the table is empty.
    pub fn from_entries(entries: &[PaletteEntry]) -> Result<Self, SlideError> {
        if entries.is_empty() {
            return Err(SlideError::Settings("palette must contain at least one entry".into()));
        }
        let pairs = entries
            .iter()
            .map(|e| -> Result<_, SlideError> {
                Ok((parse_hex(&e.background)?, parse_hex(&e.foreground)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs })
    }

    /// Background and text color for the `n`th slide, cycling through the table.
    #[must_use]
    pub fn pick(&self, n: usize) -> (Rgb<u8>, Rgb<u8>) {
        self.pairs[n % self.pairs.len()]
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) hex string.
///
/// # Errors
///
/// Returns [`SlideError::InvalidColor`] if the string is not six hex digits.
pub fn parse_hex(input: &str) -> Result<Rgb<u8>, SlideError> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SlideError::InvalidColor(input.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| SlideError::InvalidColor(input.into()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Clamp an integer triple into a color; out-of-range channels saturate.
#[must_use]
pub fn clamp_rgb(r: i32, g: i32, b: i32) -> Rgb<u8> {
    let c = |v: i32| u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX);
    Rgb([c(r), c(g), c(b)])
}

/// Color of the `i`th (0-based) slide of the built-in deck.
#[must_use]
pub fn gradient_color(i: usize) -> Rgb<u8> {
    let i = i32::try_from(i).unwrap_or(i32::MAX);
    clamp_rgb(
        i.saturating_mul(7).saturating_add(50),
        i.saturating_mul(5).saturating_add(100),
        200_i32.saturating_sub(i.saturating_mul(3)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!(parse_hex("#3b82f6").unwrap(), Rgb([0x3b, 0x82, 0xf6]));
        assert_eq!(parse_hex("FFFFFF").unwrap(), WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn palette_cycles() {
        let palette = Palette::from_entries(&default_palette()).unwrap();
        assert_eq!(palette.pick(0), palette.pick(8));
        assert_eq!(palette.pick(0).0, Rgb([0x3b, 0x82, 0xf6]));
        assert_eq!(palette.pick(3).1, WHITE);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::from_entries(&[]).is_err());
    }

    #[test]
    fn gradient_saturates() {
        assert_eq!(gradient_color(0), Rgb([50, 100, 200]));
        assert_eq!(gradient_color(1), Rgb([57, 105, 197]));
        // Red passes 255 at the 31st slide.
        assert_eq!(gradient_color(30), Rgb([255, 250, 110]));
        assert_eq!(gradient_color(33), Rgb([255, 255, 101]));
    }
}
