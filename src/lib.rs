// src/lib.rs

//! System font discovery and single-line text rendering.
//!
//! ```no_run
//! sysfont::init();
//! let mut font = sysfont::sys_font("DejaVu Sans, sans", 24, false, false)?;
//! font.set_underline(true);
//! let surface = font.render("Hello", true, sysfont::Rgba::opaque(255, 255, 255), None)?;
//! assert_eq!(surface.height(), font.get_height() as usize);
//! sysfont::quit();
//! # Ok::<(), sysfont::FontError>(())
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod face;
pub mod font;
pub mod rasterizer;
pub mod style;
pub mod subsystem;
pub mod surface;

pub use catalog::{FontCatalog, FontDescriptor};
pub use color::{Rgb, Rgba};
pub use error::{FontError, LoadFailure, Result};
pub use font::{Font, FontSource};
pub use rasterizer::layout::GlyphMetric;
pub use style::StyleFlags;
pub use subsystem::{
    catalog_snapshot, get_default_font, get_fonts, get_init, init, match_font, quit, sys_font,
};
pub use surface::{PixelFormat, Surface};
