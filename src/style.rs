// src/style.rs

//! Text style flags applied by a font handle at render time.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Style flags of a font handle or face.
    ///
    /// On a handle these are the *synthetic* styles the rasterizer applies.
    /// On a face (see `Font::native_style`) they describe what the file
    /// itself provides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StyleFlags: u8 {
        const BOLD      = 1 << 0; // Stroke widening.
        const ITALIC    = 1 << 1; // Oblique shear.
        const UNDERLINE = 1 << 2; // Rule under the baseline.
    }
}

impl StyleFlags {
    /// Build from the `(bold, italic)` pair used by the matching API.
    pub fn from_bold_italic(bold: bool, italic: bool) -> Self {
        let mut flags = StyleFlags::empty();
        flags.set(StyleFlags::BOLD, bold);
        flags.set(StyleFlags::ITALIC, italic);
        flags
    }

    pub fn bold(self) -> bool {
        self.contains(StyleFlags::BOLD)
    }

    pub fn italic(self) -> bool {
        self.contains(StyleFlags::ITALIC)
    }

    pub fn underline(self) -> bool {
        self.contains(StyleFlags::UNDERLINE)
    }
}
