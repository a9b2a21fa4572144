//! Coverage canvas: glyph compositing with synthetic styles and conversion to
//! an output surface.

use crate::color::{Rgb, Rgba};
use crate::rasterizer::font_driver::GlyphBitmap;
use crate::surface::{PixelFormat, Surface};

/// Coverage at or above this value is "ink" in monochrome output.
pub const MONO_THRESHOLD: u8 = 128;

/// An 8-bit coverage buffer the size of the output surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width * height],
        }
    }

    pub fn coverage_at(&self, x: usize, y: usize) -> u8 {
        self.coverage[y * self.width + x]
    }

    /// Composite one glyph whose origin sits at `(pen_x, baseline)`.
    ///
    /// `bold_overhang > 0` dilates every row horizontally by that many
    /// pixels. `shear > 0` shifts each row right by `shear` pixels per pixel
    /// above the baseline, splitting coverage between the two nearest columns.
    /// Overlapping glyphs combine by maximum coverage.
    pub fn blit_glyph(
        &mut self,
        bitmap: &GlyphBitmap,
        pen_x: i32,
        baseline: i32,
        bold_overhang: i32,
        shear: f32,
    ) {
        let w = bitmap.bbox.width;
        let h = bitmap.bbox.height;
        if w == 0 || h == 0 {
            return;
        }
        let overhang = bold_overhang.max(0) as usize;
        let top = baseline - (bitmap.bbox.ymin + h as i32);
        let left = pen_x + bitmap.bbox.xmin;

        let mut widened = vec![0u8; w + overhang];
        let mut sheared = vec![0u16; w + overhang + 1];

        for row in 0..h {
            let y = top + row as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            let src = &bitmap.coverage[row * w..(row + 1) * w];

            widened.iter_mut().for_each(|c| *c = 0);
            for (x, &c) in src.iter().enumerate() {
                if c == 0 {
                    continue;
                }
                for k in 0..=overhang {
                    let slot = &mut widened[x + k];
                    *slot = (*slot).max(c);
                }
            }

            let shift = if shear > 0.0 {
                (baseline as f32 - (y as f32 + 0.5)) * shear
            } else {
                0.0
            };
            let whole = shift.floor();
            let frac = shift - whole;

            sheared.iter_mut().for_each(|c| *c = 0);
            for (x, &c) in widened.iter().enumerate() {
                if c == 0 {
                    continue;
                }
                let right = (c as f32 * frac).round() as u16;
                sheared[x] += c as u16 - right.min(c as u16);
                sheared[x + 1] += right;
            }

            let row_start = left + whole as i32;
            let dst_row = y as usize * self.width;
            for (x, &c) in sheared.iter().enumerate() {
                let dx = row_start + x as i32;
                if c == 0 || dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let slot = &mut self.coverage[dst_row + dx as usize];
                *slot = (*slot).max(c.min(255) as u8);
            }
        }
    }

    /// Fill `thickness` full-width rows starting at `top`, clipped.
    pub fn draw_rule(&mut self, top: i32, thickness: i32) {
        let start = top.max(0) as usize;
        let end = (top + thickness).clamp(0, self.height as i32) as usize;
        for y in start..end {
            let row = &mut self.coverage[y * self.width..(y + 1) * self.width];
            row.iter_mut().for_each(|c| *c = 255);
        }
    }

    /// Convert coverage to a surface.
    ///
    /// - no antialiasing: two-entry palette, background index 0 keyed out
    ///   when `background` is `None`;
    /// - antialiasing, no background: RGBA with coverage-scaled alpha;
    /// - antialiasing with background: opaque RGB blend.
    pub fn into_surface(self, antialias: bool, fg: Rgba, background: Option<Rgb>) -> Surface {
        let Canvas {
            width,
            height,
            coverage,
        } = self;

        if !antialias {
            let (bg, colorkey) = match background {
                Some(bg) => (bg, None),
                None => (fg.inverted(), Some(0)),
            };
            let pixels = coverage
                .iter()
                .map(|&c| u8::from(c >= MONO_THRESHOLD))
                .collect();
            let format = PixelFormat::Indexed8 {
                palette: [bg, fg.rgb()],
                colorkey,
            };
            return Surface::from_raw(width, height, format, pixels);
        }

        match background {
            None => {
                let mut pixels = Vec::with_capacity(coverage.len() * 4);
                for &c in &coverage {
                    let alpha = (c as u16 * fg.a as u16 + 127) / 255;
                    pixels.extend_from_slice(&[fg.r, fg.g, fg.b, alpha as u8]);
                }
                Surface::from_raw(width, height, PixelFormat::Rgba32, pixels)
            }
            Some(bg) => {
                let mut pixels = Vec::with_capacity(coverage.len() * 3);
                for &c in &coverage {
                    let alpha = c as f32 / 255.0 * fg.a as f32 / 255.0;
                    // Blend foreground and background based on glyph coverage
                    let r = (fg.r as f32 * alpha + bg.r as f32 * (1.0 - alpha)).round() as u8;
                    let g = (fg.g as f32 * alpha + bg.g as f32 * (1.0 - alpha)).round() as u8;
                    let b = (fg.b as f32 * alpha + bg.b as f32 * (1.0 - alpha)).round() as u8;
                    pixels.extend_from_slice(&[r, g, b]);
                }
                Surface::from_raw(width, height, PixelFormat::Rgb24, pixels)
            }
        }
    }
}
