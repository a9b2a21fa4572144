// src/surface.rs

//! Minimal bitmap container returned by `Font::render`.
//!
//! Only what callers need to inspect or blit rendered text: dimensions, pixel
//! format, palette/colour key and per-pixel reads.

use crate::color::{Rgb, Rgba};

/// Pixel storage of a [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    /// One byte per pixel indexing a two-entry palette.
    Indexed8 {
        palette: [Rgb; 2],
        /// Palette index treated as fully transparent.
        colorkey: Option<u8>,
    },
    /// Three bytes per pixel, opaque.
    Rgb24,
    /// Four bytes per pixel, straight alpha.
    Rgba32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Indexed8 { .. } => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Surface {
    /// Wrap raw pixel data. `pixels` must hold exactly
    /// `width * height * bytes_per_pixel` bytes.
    pub(crate) fn from_raw(width: usize, height: usize, format: PixelFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * format.bytes_per_pixel());
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn format(&self) -> &PixelFormat {
        &self.format
    }

    pub fn palette(&self) -> Option<&[Rgb; 2]> {
        match &self.format {
            PixelFormat::Indexed8 { palette, .. } => Some(palette),
            _ => None,
        }
    }

    pub fn colorkey(&self) -> Option<Rgb> {
        match &self.format {
            PixelFormat::Indexed8 {
                palette,
                colorkey: Some(key),
            } => Some(palette[*key as usize]),
            _ => None,
        }
    }

    pub fn has_per_pixel_alpha(&self) -> bool {
        self.format == PixelFormat::Rgba32
    }

    /// Raw pixel bytes, row-major with no padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Palette index at `(x, y)` for indexed surfaces.
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        match self.format {
            PixelFormat::Indexed8 { .. } if x < self.width && y < self.height => {
                Some(self.pixels[y * self.width + x])
            }
            _ => None,
        }
    }

    /// Colour at `(x, y)`, or `None` outside the surface. Colour-keyed
    /// pixels read back with zero alpha.
    pub fn get_at(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * self.format.bytes_per_pixel();
        let px = &self.pixels[offset..offset + self.format.bytes_per_pixel()];
        Some(match &self.format {
            PixelFormat::Indexed8 { palette, colorkey } => {
                let index = px[0];
                let alpha = if *colorkey == Some(index) { 0 } else { 255 };
                palette[index as usize].with_alpha(alpha)
            }
            PixelFormat::Rgb24 => Rgba::opaque(px[0], px[1], px[2]),
            PixelFormat::Rgba32 => Rgba::new(px[0], px[1], px[2], px[3]),
        })
    }
}
