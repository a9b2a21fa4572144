//! `FontDriver` backed by the `fontdue` scan converter.

use crate::error::{FontError, Result};
use crate::rasterizer::font_driver::{FontDriver, GlyphBitmap, GlyphBox, LineMetrics};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct FontdueDriver;

impl FontdueDriver {
    pub fn new() -> Self {
        Self
    }
}

fn to_box(m: &fontdue::Metrics) -> GlyphBox {
    GlyphBox {
        xmin: m.xmin,
        ymin: m.ymin,
        width: m.width,
        height: m.height,
        advance: m.advance_width,
    }
}

impl FontDriver for FontdueDriver {
    type Face = fontdue::Font;
    type GlyphId = u16;

    fn load_face(&self, source_name: &str, data: &[u8], face_index: u32) -> Result<Self::Face> {
        let settings = fontdue::FontSettings {
            collection_index: face_index,
            ..fontdue::FontSettings::default()
        };
        let face = fontdue::Font::from_bytes(data, settings)
            .map_err(|msg| FontError::parse(source_name, msg))?;
        debug!(
            "FontdueDriver: loaded '{}' (face {}, {} glyphs)",
            source_name,
            face_index,
            face.glyph_count()
        );
        Ok(face)
    }

    fn find_glyph(&self, face: &Self::Face, ch: char) -> Option<Self::GlyphId> {
        match face.lookup_glyph_index(ch) {
            0 => None,
            index => Some(index),
        }
    }

    fn placeholder_glyph(&self, _face: &Self::Face) -> Self::GlyphId {
        0
    }

    fn line_metrics(&self, face: &Self::Face, px: f32) -> LineMetrics {
        match face.horizontal_line_metrics(px) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
                line_gap: m.line_gap,
                new_line_size: m.new_line_size,
            },
            None => {
                trace!("FontdueDriver: face has no horizontal metrics, using em box");
                LineMetrics {
                    ascent: px * 0.8,
                    descent: -px * 0.2,
                    line_gap: 0.0,
                    new_line_size: px,
                }
            }
        }
    }

    fn glyph_metrics(&self, face: &Self::Face, glyph: Self::GlyphId, px: f32) -> GlyphBox {
        to_box(&face.metrics_indexed(glyph, px))
    }

    fn rasterize_glyph(&self, face: &Self::Face, glyph: Self::GlyphId, px: f32) -> GlyphBitmap {
        let (metrics, coverage) = face.rasterize_indexed(glyph, px);
        GlyphBitmap {
            bbox: to_box(&metrics),
            coverage,
        }
    }
}
