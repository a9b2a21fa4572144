//! Backend font loading and glyph rasterization primitives.
//!
//! This module defines the `FontDriver` trait, the seam between the font
//! handle and whatever library decodes outlines and scan-converts glyphs.
//! The only production implementation is `FontdueDriver`; tests plug in
//! drivers that produce synthetic glyphs.

use crate::error::Result;

/// Vertical metrics of a face at one pixel size, straight from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line box (positive).
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box (negative).
    pub descent: f32,
    pub line_gap: f32,
    /// Recommended baseline-to-baseline distance.
    pub new_line_size: f32,
}

/// Pixel-aligned bounding box and advance of one glyph.
///
/// `ymin` is the offset of the bottom edge from the baseline, positive up,
/// so the top row of the bitmap sits at `ymin + height` above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphBox {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
}

/// A rasterized glyph: 8-bit coverage, row-major, top row first.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub bbox: GlyphBox,
    /// `bbox.width * bbox.height` bytes, 0 = empty, 255 = fully covered.
    pub coverage: Vec<u8>,
}

/// Backend font driver trait.
///
/// Implementors provide thin wrappers around a rasterization library:
/// - Face loading from raw bytes
/// - Glyph lookup for characters
/// - Line and glyph metrics at a pixel size
/// - Glyph rasterization to coverage
pub trait FontDriver {
    /// Backend face handle type.
    type Face;

    /// Backend glyph ID type.
    type GlyphId: Copy;

    /// Parse `data` into a face. `source_name` only labels errors.
    fn load_face(&self, source_name: &str, data: &[u8], face_index: u32) -> Result<Self::Face>;

    /// Find the glyph for `ch`, or `None` if the face has no mapping for it.
    fn find_glyph(&self, face: &Self::Face, ch: char) -> Option<Self::GlyphId>;

    /// The face's placeholder glyph (`.notdef`), drawn for unsupported chars.
    fn placeholder_glyph(&self, face: &Self::Face) -> Self::GlyphId;

    fn line_metrics(&self, face: &Self::Face, px: f32) -> LineMetrics;

    fn glyph_metrics(&self, face: &Self::Face, glyph: Self::GlyphId, px: f32) -> GlyphBox;

    /// Rasterize a glyph to coverage at `px` pixels per em.
    fn rasterize_glyph(&self, face: &Self::Face, glyph: Self::GlyphId, px: f32) -> GlyphBitmap;
}
