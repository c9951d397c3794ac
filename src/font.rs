//! Font resolution and text drawing.
//!
//! A [`FontHandle`] is either an outline font loaded from one of the
//! candidate files or the built-in 5x7 bitmap face, which is always
//! available. Both measure and draw single lines onto an `RgbImage`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::ports::FontSource;

/// Glyph rows of the built-in face, five columns wide.
const BITMAP_ROWS: u32 = 7;
const BITMAP_COLS: u32 = 5;

#[derive(Debug, Clone)]
enum Face {
    Outline { font: Arc<FontVec>, origin: PathBuf },
    Builtin,
}

/// A font face bound to a point size.
#[derive(Debug, Clone)]
pub struct FontHandle {
    face: Face,
    point_size: f32,
}

/// Pick the first candidate that exists and parses, loaded at `point_size`.
///
/// Falls back to the built-in bitmap face when none qualifies; this never
/// fails.
#[must_use]
pub fn resolve_font(
    source: &dyn FontSource,
    candidates: &[PathBuf],
    point_size: f32,
) -> FontHandle {
    for path in candidates {
        if !source.exists(path) {
            tracing::debug!(path = %path.display(), "font candidate missing");
            continue;
        }
        let data = match source.read(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "font candidate unreadable");
                continue;
            }
        };
        // Index 0 picks the first face of a .ttc collection.
        match FontVec::try_from_vec_and_index(data, 0) {
            Ok(font) => {
                tracing::debug!(path = %path.display(), point_size, "using font");
                return FontHandle {
                    face: Face::Outline { font: Arc::new(font), origin: path.clone() },
                    point_size,
                };
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "font candidate invalid");
            }
        }
    }
    tracing::debug!(point_size, "no font candidate usable, using built-in face");
    FontHandle::builtin(point_size)
}

impl FontHandle {
    /// The built-in bitmap face at the given size.
    #[must_use]
    pub fn builtin(point_size: f32) -> Self {
        Self { face: Face::Builtin, point_size }
    }

    /// Whether this handle fell back to the built-in face.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// File the outline face was loaded from.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        match &self.face {
            Face::Outline { origin, .. } => Some(origin.as_path()),
            Face::Builtin => None,
        }
    }

    /// The size this handle was resolved at.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Height of one line of glyphs, ascent to descent.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        match &self.face {
            Face::Outline { font, .. } => {
                let scaled = font.as_scaled(self.px_scale(font));
                scaled.ascent() - scaled.descent()
            }
            Face::Builtin => (BITMAP_ROWS * self.dot()) as f32,
        }
    }

    /// Vertical distance between consecutive baselines.
    #[must_use]
    pub fn line_advance(&self) -> f32 {
        match &self.face {
            Face::Outline { font, .. } => {
                let scaled = font.as_scaled(self.px_scale(font));
                scaled.height() + scaled.line_gap()
            }
            Face::Builtin => ((BITMAP_ROWS + 2) * self.dot()) as f32,
        }
    }

    /// Advance width of `line` in pixels.
    #[must_use]
    pub fn measure(&self, line: &str) -> f32 {
        match &self.face {
            Face::Outline { font, .. } => {
                let scaled = font.as_scaled(self.px_scale(font));
                let mut caret = 0.0;
                let mut prev = None;
                for ch in line.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        caret += scaled.kern(prev, id);
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
                caret
            }
            Face::Builtin => {
                let count = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
                if count == 0 {
                    0.0
                } else {
                    (count.saturating_mul(BITMAP_COLS + 1) - 1).saturating_mul(self.dot()) as f32
                }
            }
        }
    }

    /// Draw `line` with its top-left corner at (`x`, `top`).
    pub fn draw_line(&self, canvas: &mut RgbImage, x: f32, top: f32, color: Rgb<u8>, line: &str) {
        match &self.face {
            Face::Outline { font, .. } => {
                let scale = self.px_scale(font);
                let scaled = font.as_scaled(scale);
                let baseline = top + scaled.ascent();
                let mut caret = x;
                let mut prev = None;
                for ch in line.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        caret += scaled.kern(prev, id);
                    }
                    let glyph = id.with_scale_and_position(scale, point(caret, baseline));
                    caret += scaled.h_advance(id);
                    prev = Some(id);

                    let Some(outlined) = font.outline_glyph(glyph) else { continue };
                    let bounds = outlined.px_bounds();
                    outlined.draw(|gx, gy, coverage| {
                        let px = bounds.min.x as i64 + i64::from(gx);
                        let py = bounds.min.y as i64 + i64::from(gy);
                        blend(canvas, px, py, color, coverage);
                    });
                }
            }
            Face::Builtin => {
                let dot = i64::from(self.dot());
                let mut left = x.round() as i64;
                let top = top.round() as i64;
                for ch in line.chars() {
                    let rows = bitmap_glyph(ch);
                    for (row, bits) in (0_i64..).zip(rows) {
                        for col in 0..i64::from(BITMAP_COLS) {
                            if bits & (1 << (4 - col)) == 0 {
                                continue;
                            }
                            for dy in 0..dot {
                                let y = top + row * dot + dy;
                                for dx in 0..dot {
                                    blend(canvas, left + col * dot + dx, y, color, 1.0);
                                }
                            }
                        }
                    }
                    left += i64::from(BITMAP_COLS + 1) * dot;
                }
            }
        }
    }

    /// Scale matching a point size measured per em, as most raster
    /// libraries interpret it.
    fn px_scale(&self, font: &FontVec) -> PxScale {
        let height = font.height_unscaled();
        match font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(self.point_size * height / upem),
            _ => PxScale::from(self.point_size),
        }
    }

    /// Size of one bitmap dot; the 5x7 face is roughly 8 dots per em.
    fn dot(&self) -> u32 {
        (self.point_size / 8.0).round().max(1.0) as u32
    }
}

/// Mix `color` into the pixel at (`x`, `y`) by `coverage`, ignoring
/// out-of-bounds positions.
fn blend(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else { return };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x, y);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        let mixed = f32::from(*dst) * (1.0 - alpha) + f32::from(src) * alpha;
        *dst = mixed.round().clamp(0.0, 255.0) as u8;
    }
}

/// Rows of the built-in 5x7 face, most significant of five bits leftmost.
/// Lowercase shares the uppercase shapes; anything unknown is a hollow box.
fn bitmap_glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0x00; 7],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '*' => [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '@' => [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}
