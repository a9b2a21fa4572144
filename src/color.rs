// src/color.rs

//! Colour values accepted by `Font::render` and produced by `Surface::get_at`.

use crate::error::FontError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Opaque RGB colour, used for backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// RGBA colour in 32-bit format (8 bits per channel, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Bitwise complement of the colour channels. Used for the colour-keyed
    /// background entry so it can never collide with the foreground.
    pub const fn inverted(self) -> Rgb {
        Rgb::new(!self.r, !self.g, !self.b)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba::opaque(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Rgba::new(r, g, b, a)
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::opaque(r, g, b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba::new(r, g, b, a)
    }
}

/// Colour tuples of unknown arity, e.g. parsed from user input.
impl TryFrom<&[u8]> for Rgba {
    type Error = FontError;

    fn try_from(channels: &[u8]) -> Result<Self, Self::Error> {
        match *channels {
            [r, g, b] => Ok(Rgba::opaque(r, g, b)),
            [r, g, b, a] => Ok(Rgba::new(r, g, b, a)),
            _ => Err(FontError::InvalidArgument(format!(
                "colour needs 3 or 4 channels, got {}",
                channels.len()
            ))),
        }
    }
}

impl TryFrom<&[u8]> for Rgb {
    type Error = FontError;

    fn try_from(channels: &[u8]) -> Result<Self, Self::Error> {
        match *channels {
            [r, g, b] => Ok(Rgb::new(r, g, b)),
            _ => Err(FontError::InvalidArgument(format!(
                "background colour needs 3 channels, got {}",
                channels.len()
            ))),
        }
    }
}

/// Parses `#rgb`, `#rrggbb` and `#rrggbbaa` (the `#` is optional).
impl FromStr for Rgba {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || FontError::InvalidArgument(format!("malformed colour '{}'", s));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Rgb {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c: Rgba = s.parse()?;
        if c.a != 255 {
            return Err(FontError::InvalidArgument(format!(
                "background colour '{}' cannot carry alpha",
                s
            )));
        }
        Ok(c.rgb())
    }
}
