//! Canvas drawing, PNG encoding and batch rendering.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::SlideError;
use crate::font::{resolve_font, FontHandle};
use crate::ports::FontSource;
use crate::settings::GeneratorConfig;
use crate::slide::{Layout, SlideSpec};

/// Vertical shift of the centered title and ring above the canvas middle.
const CENTER_LIFT: i64 = 50;
/// Distance from the canvas middle down to the centered subtitle.
const CENTER_SUBTITLE_DROP: i64 = 80;
/// Top-left anchors for the fixed-offset layout.
const OFFSET_TITLE: (f32, f32) = (50.0, 350.0);
const OFFSET_SUBTITLE: (f32, f32) = (50.0, 420.0);
const RING_RADIUS: f32 = 150.0;
const RING_STROKE: f32 = 5.0;

/// Title and subtitle fonts for one layout.
#[derive(Debug, Clone)]
struct Typography {
    title: FontHandle,
    subtitle: FontHandle,
}

/// Renders [`SlideSpec`]s to PNG files.
#[derive(Debug, Clone)]
pub struct SlideGenerator {
    width: u32,
    height: u32,
    draw_ring: bool,
    centered: Typography,
    offset: Typography,
}

/// Outcome of rendering one spec in a batch.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Where the spec was meant to be written.
    pub output_path: PathBuf,
    /// `Ok` once the file is on disk.
    pub result: Result<(), SlideError>,
}

/// Per-spec results of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per rendered spec.
    pub outcomes: Vec<RenderOutcome>,
}

impl BatchReport {
    /// Number of files written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RenderOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

impl SlideGenerator {
    /// Resolve fonts for both layouts from `settings` using `fonts`.
    #[must_use]
    pub fn new(settings: &GeneratorConfig, fonts: &dyn FontSource) -> Self {
        let f = &settings.fonts;
        let centered = Typography {
            title: resolve_font(fonts, &f.title, f.centered_title_size),
            subtitle: resolve_font(fonts, &f.subtitle, f.centered_subtitle_size),
        };
        let offset = Typography {
            title: resolve_font(fonts, &f.title, f.offset_title_size),
            subtitle: resolve_font(fonts, &f.subtitle, f.offset_subtitle_size),
        };
        if centered.title.is_builtin() {
            tracing::debug!("no title font found among candidates, using built-in face");
        }
        for handle in [&centered.title, &centered.subtitle, &offset.title, &offset.subtitle] {
            let origin = handle.origin().map(Path::display);
            let font = origin.map_or_else(|| "built-in".into(), |p| p.to_string());
            tracing::debug!(%font, size = handle.point_size(), "resolved font");
        }
        Self {
            width: settings.width,
            height: settings.height,
            draw_ring: settings.draw_ring,
            centered,
            offset,
        }
    }

    /// Draw `spec` onto a fresh canvas without touching the filesystem.
    #[must_use]
    pub fn paint(&self, spec: &SlideSpec) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, spec.background);
        let subtitle = spec.subtitle();
        let fg = spec.foreground;

        match spec.layout {
            Layout::Centered => {
                let cx = i64::from(self.width / 2) as f32;
                let focus_y = (i64::from(self.height / 2) - CENTER_LIFT) as f32;
                let sub_y = (i64::from(self.height / 2) + CENTER_SUBTITLE_DROP) as f32;
                let fonts = &self.centered;
                draw_centered(&mut canvas, &fonts.title, cx, focus_y, fg, &spec.display_text);
                draw_centered(&mut canvas, &fonts.subtitle, cx, sub_y, fg, &subtitle);
                if self.draw_ring {
                    draw_ring(&mut canvas, (cx, focus_y), RING_RADIUS, RING_STROKE, fg);
                }
            }
            Layout::FixedOffset => {
                let fonts = &self.offset;
                draw_left(&mut canvas, &fonts.title, OFFSET_TITLE, fg, &spec.display_text);
                draw_left(&mut canvas, &fonts.subtitle, OFFSET_SUBTITLE, fg, &subtitle);
            }
        }
        canvas
    }

    /// Render one spec and write it as PNG, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be encoded or written.
    pub fn render(&self, spec: &SlideSpec) -> Result<(), SlideError> {
        let canvas = self.paint(spec);
        write_png(&canvas, &spec.output_path)
    }

    /// Render every spec in order; a failure never stops the batch.
    pub fn render_batch(&self, specs: &[SlideSpec]) -> BatchReport {
        let outcomes = specs
            .iter()
            .map(|spec| {
                let result = self.render(spec);
                let path = spec.output_path.display();
                match &result {
                    Ok(()) => eprintln!("Saved: {path}"),
                    Err(e) => tracing::debug!(%path, error = %e, "render failed"),
                }
                RenderOutcome { output_path: spec.output_path.clone(), result }
            })
            .collect();
        BatchReport { outcomes }
    }
}

/// Draw possibly multi-line text whose block is centered on (`cx`, `cy`).
fn draw_centered(
    canvas: &mut RgbImage,
    font: &FontHandle,
    cx: f32,
    cy: f32,
    color: Rgb<u8>,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let lines: Vec<&str> = text.lines().collect();
    let advance = font.line_advance();
    let block = font.line_height() + advance * (lines.len().saturating_sub(1)) as f32;
    let mut top = cy - block / 2.0;
    for line in lines {
        let x = cx - font.measure(line) / 2.0;
        font.draw_line(canvas, x, top, color, line);
        top += advance;
    }
}

/// Draw possibly multi-line text starting at the top-left `anchor`.
fn draw_left(
    canvas: &mut RgbImage,
    font: &FontHandle,
    anchor: (f32, f32),
    color: Rgb<u8>,
    text: &str,
) {
    let (x, mut top) = anchor;
    for line in text.lines() {
        font.draw_line(canvas, x, top, color, line);
        top += font.line_advance();
    }
}

/// Unfilled circle of the given stroke width, antialiased on both edges.
fn draw_ring(canvas: &mut RgbImage, center: (f32, f32), radius: f32, stroke: f32, color: Rgb<u8>) {
    let (cx, cy) = center;
    let inner = radius - stroke;
    let min_x = (cx - radius - 1.0).floor().max(0.0) as u32;
    let min_y = (cy - radius - 1.0).floor().max(0.0) as u32;
    let max_x = ((cx + radius + 1.0).ceil() as u32).min(canvas.width());
    let max_y = ((cy + radius + 1.0).ceil() as u32).min(canvas.height());

    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - d + 0.5).clamp(0.0, 1.0) * (d - inner + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let pixel = canvas.get_pixel_mut(x, y);
                for (dst, src) in pixel.0.iter_mut().zip(color.0) {
                    let mixed = f32::from(*dst) * (1.0 - coverage) + f32::from(src) * coverage;
                    *dst = mixed.round() as u8;
                }
            }
        }
    }
}

/// Encode `canvas` and move it into place through a sibling temp file, so a
/// failed write leaves any previous image intact.
fn write_png(canvas: &RgbImage, path: &Path) -> Result<(), SlideError> {
    let write_err = |source| SlideError::RenderWrite { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| SlideError::Encode { path: path.to_path_buf(), source })?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    let discard_tmp = |source| {
        let _ = std::fs::remove_file(&tmp);
        write_err(source)
    };
    std::fs::write(&tmp, &bytes).map_err(discard_tmp)?;
    std::fs::rename(&tmp, path).map_err(discard_tmp)
}
