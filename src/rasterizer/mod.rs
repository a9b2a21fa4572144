//! Text rasterization.
//!
//! A font handle hands a [`LineRenderer`] its face, pixel size, style and
//! metrics; the renderer lays the string out, rasterizes glyphs through a
//! [`FontDriver`] and composites them onto a coverage [`Canvas`]:
//!
//! ```text
//! text → [layout_line] → PlacedGlyph[] → [FontDriver::rasterize_glyph]
//!      → [Canvas::blit_glyph + draw_rule] → [Canvas::into_surface] → Surface
//! ```
//!
//! Synthetic styles are applied on the canvas, so they work for any backend.

pub mod canvas;
pub mod font_driver;
pub mod fontdue_driver;
pub mod layout;

use crate::color::{Rgb, Rgba};
use crate::rasterizer::canvas::Canvas;
use crate::rasterizer::font_driver::FontDriver;
use crate::rasterizer::layout::{layout_line, GlyphMetric, LineLayout, VerticalMetrics};
use crate::style::StyleFlags;
use crate::surface::Surface;
use log::trace;

/// Underline placement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderlineRule {
    /// Row index of the rule's first row.
    pub top: i32,
    pub thickness: i32,
}

impl UnderlineRule {
    /// Place the rule from face metrics in font units (`position` is the
    /// distance of the rule's top from the baseline, negative below it).
    /// Without face metrics the rule is one pixel-ish line just under the
    /// baseline. The rule always fits inside the line box.
    pub fn new(vm: &VerticalMetrics, px: f32, face_rule: Option<(f32, f32)>) -> Self {
        let (top, thickness) = match face_rule {
            Some((position, thickness)) => (
                vm.ascent + (-position).round() as i32,
                (thickness.round() as i32).max(1),
            ),
            None => (vm.ascent + 1, ((px / 14.0).round() as i32).max(1)),
        };
        let thickness = thickness.min(1 - vm.descent);
        UnderlineRule {
            top: top.clamp(vm.ascent, vm.height - thickness),
            thickness,
        }
    }
}

/// Everything needed to measure or draw one line with one face.
pub struct LineRenderer<'a, D: FontDriver> {
    pub driver: &'a D,
    pub face: &'a D::Face,
    pub px: f32,
    pub vmetrics: VerticalMetrics,
    pub underline: UnderlineRule,
    pub style: StyleFlags,
    pub bold_overhang: i32,
    pub italic_shear: f32,
}

impl<'a, D: FontDriver> LineRenderer<'a, D> {
    pub fn layout(&self, text: &str) -> LineLayout<D::GlyphId> {
        layout_line(
            self.driver,
            self.face,
            text,
            self.px,
            self.style,
            self.bold_overhang,
        )
    }

    /// `(width, height)` of the surface `render` would produce.
    pub fn size(&self, text: &str) -> (usize, usize) {
        (self.layout(text).width, self.vmetrics.height as usize)
    }

    pub fn metrics(&self, text: &str) -> Vec<GlyphMetric> {
        self.layout(text)
            .glyphs
            .into_iter()
            .map(|g| g.metric)
            .collect()
    }

    pub fn render(&self, text: &str, antialias: bool, fg: Rgba, background: Option<Rgb>) -> Surface {
        let layout = self.layout(text);
        let mut canvas = Canvas::new(layout.width, self.vmetrics.height as usize);

        if !text.is_empty() {
            let overhang = if self.style.bold() { self.bold_overhang } else { 0 };
            let shear = if self.style.italic() { self.italic_shear } else { 0.0 };
            for placed in &layout.glyphs {
                let bitmap = self.driver.rasterize_glyph(self.face, placed.glyph, self.px);
                canvas.blit_glyph(&bitmap, placed.pen_x, self.vmetrics.ascent, overhang, shear);
            }
            if self.style.underline() {
                canvas.draw_rule(self.underline.top, self.underline.thickness);
            }
        }

        trace!(
            "rasterizer: rendered {} chars into {}x{} (aa={}, style={:?})",
            layout.glyphs.len(),
            layout.width,
            self.vmetrics.height,
            antialias,
            self.style
        );
        canvas.into_surface(antialias, fg, background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FontError, Result};
    use crate::rasterizer::font_driver::{GlyphBitmap, GlyphBox, LineMetrics};
    use crate::surface::PixelFormat;
    use std::collections::HashMap;

    // --- Mock Implementation ---

    /// Glyphs are solid rectangles; glyph 0 is a hollow placeholder box.
    #[derive(Debug)]
    struct MockFace {
        glyphs: HashMap<char, u16>,
        boxes: Vec<GlyphBox>,
    }

    struct MockFontDriver;

    fn rect(xmin: i32, ymin: i32, width: usize, height: usize, advance: f32) -> GlyphBox {
        GlyphBox {
            xmin,
            ymin,
            width,
            height,
            advance,
        }
    }

    fn setup_face() -> MockFace {
        let boxes = vec![
            rect(1, 0, 4, 8, 6.0),  // 0: placeholder
            rect(0, 0, 5, 8, 6.0),  // 1: 'X'
            rect(0, -3, 5, 8, 6.0), // 2: 'g'
            rect(0, 0, 0, 0, 4.0),  // 3: ' '
            rect(1, 0, 2, 2, 3.0),  // 4: '.'
        ];
        let glyphs = [('X', 1), ('g', 2), (' ', 3), ('.', 4)]
            .into_iter()
            .collect();
        MockFace { glyphs, boxes }
    }

    impl FontDriver for MockFontDriver {
        type Face = MockFace;
        type GlyphId = u16;

        fn load_face(&self, source_name: &str, _data: &[u8], _index: u32) -> Result<MockFace> {
            Err(FontError::parse(source_name, "mock driver cannot load"))
        }

        fn find_glyph(&self, face: &MockFace, ch: char) -> Option<u16> {
            face.glyphs.get(&ch).copied()
        }

        fn placeholder_glyph(&self, _face: &MockFace) -> u16 {
            0
        }

        fn line_metrics(&self, _face: &MockFace, _px: f32) -> LineMetrics {
            LineMetrics {
                ascent: 10.0,
                descent: -3.0,
                line_gap: 1.0,
                new_line_size: 14.0,
            }
        }

        fn glyph_metrics(&self, face: &MockFace, glyph: u16, _px: f32) -> GlyphBox {
            face.boxes[glyph as usize]
        }

        fn rasterize_glyph(&self, face: &MockFace, glyph: u16, _px: f32) -> GlyphBitmap {
            let bbox = face.boxes[glyph as usize];
            let mut coverage = vec![255u8; bbox.width * bbox.height];
            if glyph == 0 {
                for y in 1..bbox.height.saturating_sub(1) {
                    for x in 1..bbox.width.saturating_sub(1) {
                        coverage[y * bbox.width + x] = 0;
                    }
                }
            }
            GlyphBitmap { bbox, coverage }
        }
    }

    fn renderer<'a>(face: &'a MockFace, style: StyleFlags) -> LineRenderer<'a, MockFontDriver> {
        let vmetrics = VerticalMetrics::from_line(&MockFontDriver.line_metrics(face, 12.0));
        LineRenderer {
            driver: &MockFontDriver,
            face,
            px: 12.0,
            vmetrics,
            underline: UnderlineRule::new(&vmetrics, 12.0, None),
            style,
            bold_overhang: 1,
            italic_shear: 0.207,
        }
    }

    fn ink(surface: &Surface) -> usize {
        (0..surface.height())
            .flat_map(|y| (0..surface.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.get_at(x, y).map_or(false, |c| c.a > 0))
            .count()
    }

    const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    // --- Test Cases ---

    #[test]
    fn test_size_is_sum_of_advances() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::empty());
        assert_eq!(r.size("Xg"), (12, 14));
        assert_eq!(r.size("X g"), (16, 14));
    }

    #[test]
    fn test_render_matches_size() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::empty());
        for text in ["X", "Xg", "  ", "X.g"] {
            assert_eq!(r.render(text, false, WHITE, None).size(), r.size(text));
            assert_eq!(r.render(text, true, WHITE, None).size(), r.size(text));
        }
    }

    #[test]
    fn test_empty_text_is_one_pixel_wide_and_transparent() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::UNDERLINE);
        let s = r.render("", true, WHITE, None);
        assert_eq!(s.size(), (1, 14));
        assert_eq!(ink(&s), 0);
        let s = r.render("", false, WHITE, Some(Rgb::new(0, 0, 0)));
        assert_eq!(s.width(), 1);
    }

    #[test]
    fn test_newline_draws_placeholder() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::empty());
        let s = r.render("\n", false, WHITE, None);
        assert_eq!(s.width(), 6);
        assert!(ink(&s) > 0);
        // Hollow box: centre stays empty.
        assert_eq!(s.get_at(3, 6).unwrap().a, 0);
    }

    #[test]
    fn test_bold_widens_size_and_ink() {
        let face = setup_face();
        let plain = renderer(&face, StyleFlags::empty());
        let bold = renderer(&face, StyleFlags::BOLD);
        assert_eq!(bold.size("XX").0, plain.size("XX").0 + 2);
        let plain_ink = ink(&plain.render("XX", false, WHITE, None));
        let bold_ink = ink(&bold.render("XX", false, WHITE, None));
        assert!(bold_ink > plain_ink);
    }

    #[test]
    fn test_italic_changes_pixels_not_size() {
        let face = setup_face();
        let plain = renderer(&face, StyleFlags::empty());
        let italic = renderer(&face, StyleFlags::ITALIC);
        assert_eq!(plain.size("X"), italic.size("X"));
        let a = plain.render("X", false, WHITE, None);
        let b = italic.render("X", false, WHITE, None);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_underline_spans_whole_width() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::UNDERLINE);
        let s = r.render("X X", false, WHITE, None);
        let row = r.underline.top as usize;
        assert!((0..s.width()).all(|x| s.index_at(x, row) == Some(1)));
        assert!(row as i32 >= r.vmetrics.ascent);
    }

    #[test]
    fn test_metrics_one_entry_per_char() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::empty());
        let m = r.metrics("Xg?");
        assert_eq!(m.len(), 3);
        assert_eq!(m[1].min_y, -3);
        // '?' is missing: placeholder metrics.
        assert_eq!(m[2].min_x, 1);
        assert_eq!(m[2].advance, 6);
    }

    #[test]
    fn test_surface_formats() {
        let face = setup_face();
        let r = renderer(&face, StyleFlags::empty());
        let bg = Some(Rgb::new(0, 0, 0));
        assert!(matches!(
            r.render("X", false, WHITE, None).format(),
            PixelFormat::Indexed8 { colorkey: Some(0), .. }
        ));
        assert!(matches!(
            r.render("X", false, WHITE, bg).format(),
            PixelFormat::Indexed8 { colorkey: None, .. }
        ));
        assert_eq!(r.render("X", true, WHITE, None).format(), &PixelFormat::Rgba32);
        assert_eq!(r.render("X", true, WHITE, bg).format(), &PixelFormat::Rgb24);
    }

    #[test]
    fn test_underline_rule_from_face_metrics() {
        let vm = VerticalMetrics::from_line(&LineMetrics {
            ascent: 15.0,
            descent: -4.0,
            line_gap: 0.0,
            new_line_size: 19.0,
        });
        let rule = UnderlineRule::new(&vm, 20.0, Some((-1.8, 1.2)));
        assert_eq!(rule, UnderlineRule { top: 17, thickness: 1 });
        // A rule positioned far below the box is pulled back inside.
        let rule = UnderlineRule::new(&vm, 20.0, Some((-30.0, 2.0)));
        assert_eq!(rule.top + rule.thickness, vm.height);
    }
}
