//! Single-line layout: integer vertical metrics, glyph resolution and pen
//! positions.

use crate::rasterizer::font_driver::{FontDriver, GlyphBox, LineMetrics};
use crate::style::StyleFlags;
use log::trace;
use serde::Serialize;

/// Integer vertical metrics of a face at one pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalMetrics {
    /// Rows above the baseline; also the baseline's row index in a surface.
    pub ascent: i32,
    /// Signed extent below the baseline, always negative.
    pub descent: i32,
    /// Height of every rendered surface.
    pub height: i32,
    /// Baseline-to-baseline distance reported by the backend.
    pub linesize: i32,
}

impl VerticalMetrics {
    pub fn from_line(line: &LineMetrics) -> Self {
        let ascent = (line.ascent.ceil() as i32).max(1);
        let descent = (line.descent.floor() as i32).min(-1);
        VerticalMetrics {
            ascent,
            descent,
            height: ascent.saturating_sub(descent).saturating_add(1),
            linesize: (line.new_line_size.ceil() as i32).max(1),
        }
    }
}

/// Per-character metrics as returned by `Font::metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlyphMetric {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub advance: i32,
}

impl GlyphMetric {
    pub(crate) fn from_box(bbox: &GlyphBox, bold_overhang: i32) -> Self {
        let ink = bbox.width > 0 && bbox.height > 0;
        let width = i32::try_from(bbox.width).unwrap_or(i32::MAX);
        let height = i32::try_from(bbox.height).unwrap_or(i32::MAX);
        GlyphMetric {
            min_x: bbox.xmin,
            max_x: bbox
                .xmin
                .saturating_add(width)
                .saturating_add(if ink { bold_overhang } else { 0 }),
            min_y: bbox.ymin,
            max_y: bbox.ymin.saturating_add(height),
            advance: (bbox.advance.round() as i32).saturating_add(bold_overhang),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph<G> {
    pub ch: char,
    pub glyph: G,
    /// Pen position of the glyph origin, in pixels from the left edge.
    pub pen_x: i32,
    pub metric: GlyphMetric,
}

#[derive(Debug, Clone)]
pub struct LineLayout<G> {
    pub glyphs: Vec<PlacedGlyph<G>>,
    /// Surface width: the sum of advances, never below one pixel.
    pub width: usize,
}

/// Glyph for `ch`; line breaks, other control characters and anything the
/// face lacks resolve to the placeholder glyph.
pub fn resolve_glyph<D: FontDriver>(driver: &D, face: &D::Face, ch: char) -> D::GlyphId {
    if ch.is_control() {
        return driver.placeholder_glyph(face);
    }
    driver.find_glyph(face, ch).unwrap_or_else(|| {
        trace!("layout: no glyph for '{}' (U+{:04X}), using placeholder", ch, ch as u32);
        driver.placeholder_glyph(face)
    })
}

/// Lay out `text` left to right without kerning. The bold overhang is only
/// applied when `style` carries `BOLD`.
pub fn layout_line<D: FontDriver>(
    driver: &D,
    face: &D::Face,
    text: &str,
    px: f32,
    style: StyleFlags,
    bold_overhang: i32,
) -> LineLayout<D::GlyphId> {
    let overhang = if style.bold() { bold_overhang } else { 0 };
    let mut pen_x = 0i32;
    let mut glyphs = Vec::with_capacity(text.len());

    for ch in text.chars() {
        let glyph = resolve_glyph(driver, face, ch);
        let metric = GlyphMetric::from_box(&driver.glyph_metrics(face, glyph, px), overhang);
        glyphs.push(PlacedGlyph {
            ch,
            glyph,
            pen_x,
            metric,
        });
        pen_x = pen_x.saturating_add(metric.advance);
    }

    LineLayout {
        glyphs,
        width: pen_x.max(1) as usize,
    }
}
