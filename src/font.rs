// src/font.rs

//! Font handles: one face at one point size, with style flags, metrics and
//! single-line rendering.

use crate::color::{Rgb, Rgba};
use crate::config::CONFIG;
use crate::error::{FontError, Result};
use crate::face::{face_count, FaceInfo};
use crate::rasterizer::font_driver::FontDriver;
use crate::rasterizer::fontdue_driver::FontdueDriver;
use crate::rasterizer::layout::{GlyphMetric, VerticalMetrics};
use crate::rasterizer::{LineRenderer, UnderlineRule};
use crate::style::StyleFlags;
use crate::subsystem::{backend_lock, ensure_init, DEFAULT_FONT_DATA, DEFAULT_FONT_NAME};
use crate::surface::Surface;
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest width or height `render` will allocate.
pub const MAX_SURFACE_DIM: usize = 32_767;

/// Largest accepted point size; keeps the line height of any sane face
/// below [`MAX_SURFACE_DIM`].
pub const MAX_POINT_SIZE: u32 = 16_384;

/// Where a handle's face came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// The bundled default font.
    Default,
    File { path: PathBuf, face_index: u32 },
    /// Bytes supplied by the caller; only their length is kept.
    Memory { len: usize },
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Default => write!(f, "{} (bundled)", DEFAULT_FONT_NAME),
            FontSource::File { path, face_index: 0 } => write!(f, "{}", path.display()),
            FontSource::File { path, face_index } => {
                write!(f, "{}#{}", path.display(), face_index)
            }
            FontSource::Memory { len } => write!(f, "<{} bytes in memory>", len),
        }
    }
}

/// A loaded font at a fixed point size.
///
/// Pixel size equals point size. The handle owns its parsed face, so it stays
/// usable after the subsystem is shut down.
#[derive(Clone)]
pub struct Font {
    source: FontSource,
    point_size: u32,
    style: StyleFlags,
    driver: FontdueDriver,
    face: fontdue::Font,
    info: FaceInfo,
    vmetrics: VerticalMetrics,
    underline: UnderlineRule,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("source", &self.source)
            .field("point_size", &self.point_size)
            .field("style", &self.style)
            .field("family", &self.info.family)
            .field("vmetrics", &self.vmetrics)
            .finish_non_exhaustive()
    }
}

fn check_size(point_size: u32) -> Result<()> {
    if point_size == 0 {
        return Err(FontError::InvalidArgument(
            "point size must be positive".to_string(),
        ));
    }
    if point_size > MAX_POINT_SIZE {
        return Err(FontError::InvalidArgument(format!(
            "point size {} exceeds {}",
            point_size, MAX_POINT_SIZE
        )));
    }
    Ok(())
}

impl Font {
    /// Load the file at `path`, or the bundled default when `path` is `None`.
    pub fn new(path: Option<&Path>, point_size: u32) -> Result<Font> {
        match path {
            Some(path) => Self::with_face_index(path, 0, point_size),
            None => Self::default_font(point_size),
        }
    }

    /// Load face `face_index` of a font file or collection.
    pub fn with_face_index(path: &Path, face_index: u32, point_size: u32) -> Result<Font> {
        ensure_init()?;
        check_size(point_size)?;
        let name = path.display().to_string();
        let data = fs::read(path).map_err(|e| FontError::load(name.as_str(), e))?;
        let source = FontSource::File {
            path: path.to_path_buf(),
            face_index,
        };
        Self::load(source, &name, &data, face_index, point_size)
    }

    /// Load the first face of an in-memory font file.
    pub fn from_bytes(data: &[u8], point_size: u32) -> Result<Font> {
        ensure_init()?;
        check_size(point_size)?;
        let source = FontSource::Memory { len: data.len() };
        Self::load(source, "<memory>", data, 0, point_size)
    }

    pub fn default_font(point_size: u32) -> Result<Font> {
        ensure_init()?;
        check_size(point_size)?;
        Self::load(
            FontSource::Default,
            DEFAULT_FONT_NAME,
            DEFAULT_FONT_DATA,
            0,
            point_size,
        )
    }

    fn load(
        source: FontSource,
        name: &str,
        data: &[u8],
        face_index: u32,
        point_size: u32,
    ) -> Result<Font> {
        let faces = face_count(data);
        if face_index >= faces {
            return Err(FontError::parse(
                name,
                format!("face index {} out of range ({} faces)", face_index, faces),
            ));
        }
        let driver = FontdueDriver::new();
        let face = driver.load_face(name, data, face_index)?;
        let info = FaceInfo::parse(data, face_index)
            .map_err(|e| FontError::parse(name, e.to_string()))?;

        let px = point_size as f32;
        let vmetrics = VerticalMetrics::from_line(&driver.line_metrics(&face, px));
        let underline = UnderlineRule::new(&vmetrics, px, info.underline_px(px));
        debug!(
            "Font: loaded {} at {}pt ({:?}, native {:?})",
            source,
            point_size,
            vmetrics,
            info.native_style()
        );

        Ok(Font {
            source,
            point_size,
            style: StyleFlags::empty(),
            driver,
            face,
            info,
            vmetrics,
            underline,
        })
    }

    fn renderer(&self) -> LineRenderer<'_, FontdueDriver> {
        let synthesis = &CONFIG.synthesis;
        let px = self.point_size as f32;
        LineRenderer {
            driver: &self.driver,
            face: &self.face,
            px,
            vmetrics: self.vmetrics,
            underline: self.underline,
            style: self.style,
            bold_overhang: synthesis.bold_overhang(px),
            italic_shear: synthesis.italic_shear,
        }
    }

    pub fn get_bold(&self) -> bool {
        self.style.bold()
    }

    /// Toggle synthetic bold.
    pub fn set_bold(&mut self, on: bool) {
        self.style.set(StyleFlags::BOLD, on);
    }

    pub fn get_italic(&self) -> bool {
        self.style.italic()
    }

    /// Toggle synthetic italic.
    pub fn set_italic(&mut self, on: bool) {
        self.style.set(StyleFlags::ITALIC, on);
    }

    pub fn get_underline(&self) -> bool {
        self.style.underline()
    }

    pub fn set_underline(&mut self, on: bool) {
        self.style.set(StyleFlags::UNDERLINE, on);
    }

    /// All synthetic style flags currently set.
    pub fn style(&self) -> StyleFlags {
        self.style
    }

    /// Pixels above the baseline.
    pub fn get_ascent(&self) -> i32 {
        self.vmetrics.ascent
    }

    /// Signed extent below the baseline; negative.
    pub fn get_descent(&self) -> i32 {
        self.vmetrics.descent
    }

    /// Height of every surface `render` returns.
    pub fn get_height(&self) -> i32 {
        self.vmetrics.height
    }

    /// Recommended distance between consecutive baselines.
    pub fn get_linesize(&self) -> i32 {
        self.vmetrics.linesize
    }

    /// `(width, height)` of the surface `render(text, ..)` would produce.
    pub fn size(&self, text: &str) -> (usize, usize) {
        let _backend = backend_lock();
        self.renderer().size(text)
    }

    /// One entry per character of `text`.
    pub fn metrics(&self, text: &str) -> Vec<GlyphMetric> {
        let _backend = backend_lock();
        self.renderer().metrics(text)
    }

    /// Render one line of text.
    ///
    /// Without a background the result is transparent outside the ink: a
    /// colour-keyed palette surface when `antialias` is false, an RGBA
    /// surface otherwise. With a background the surface is opaque.
    pub fn render(
        &self,
        text: &str,
        antialias: bool,
        foreground: impl Into<Rgba>,
        background: Option<Rgb>,
    ) -> Result<Surface> {
        let foreground = foreground.into();
        let _backend = backend_lock();
        let renderer = self.renderer();
        let (width, height) = renderer.size(text);
        if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
            return Err(FontError::InvalidArgument(format!(
                "text surface of {}x{} exceeds {} pixels",
                width, height, MAX_SURFACE_DIM
            )));
        }
        Ok(renderer.render(text, antialias, foreground, background))
    }

    pub fn point_size(&self) -> u32 {
        self.point_size
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn family_name(&self) -> Option<&str> {
        self.info.family.as_deref()
    }

    pub fn is_fixed_width(&self) -> bool {
        self.info.is_monospaced
    }

    /// Bold/italic carried by the face itself.
    pub fn native_style(&self) -> StyleFlags {
        self.info.native_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystem::{init, quit, test_guard};
    use test_log::test;

    #[test]
    fn test_construction_requires_init() {
        let _guard = test_guard();
        quit();
        assert!(matches!(Font::default_font(12), Err(FontError::NotInitialized)));
        assert!(matches!(
            Font::from_bytes(DEFAULT_FONT_DATA, 12),
            Err(FontError::NotInitialized)
        ));
    }

    #[test]
    fn test_zero_point_size_rejected() {
        let _guard = test_guard();
        init();
        assert!(matches!(Font::default_font(0), Err(FontError::InvalidArgument(_))));
        assert!(matches!(
            Font::from_bytes(DEFAULT_FONT_DATA, 0),
            Err(FontError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_point_size_rejected() {
        let _guard = test_guard();
        init();
        for size in [MAX_POINT_SIZE + 1, 3_000_000_000, u32::MAX] {
            assert!(matches!(
                Font::default_font(size),
                Err(FontError::InvalidArgument(_))
            ));
        }
        let font = Font::default_font(MAX_POINT_SIZE).unwrap();
        assert!(font.get_height() as usize <= MAX_SURFACE_DIM);
    }

    #[test]
    fn test_face_index_out_of_range() {
        let _guard = test_guard();
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.ttf");
        fs::write(&path, DEFAULT_FONT_DATA).unwrap();
        let err = Font::with_face_index(&path, 1, 12).unwrap_err();
        assert!(matches!(err, FontError::FontLoad { .. }));

        let mut bogus = b"ttcf".to_vec();
        bogus.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(
            Font::from_bytes(&bogus, 12),
            Err(FontError::FontLoad { .. })
        ));
    }

    #[test]
    fn test_load_failures() {
        let _guard = test_guard();
        init();
        let missing = Font::new(Some(Path::new("some-fictional-font.ttf")), 20).unwrap_err();
        assert!(missing.is_not_found());

        let garbage = Font::from_bytes(b"certainly not a font", 20).unwrap_err();
        assert!(matches!(garbage, FontError::FontLoad { .. }));
        assert!(!garbage.is_not_found());
    }

    #[test]
    fn test_default_font_identity() {
        let _guard = test_guard();
        init();
        let font = Font::new(None, 24).unwrap();
        assert_eq!(font.source(), &FontSource::Default);
        assert_eq!(font.point_size(), 24);
        assert_eq!(font.family_name(), Some("DejaVu Sans"));
        assert_eq!(font.native_style(), StyleFlags::BOLD);
        assert!(!font.is_fixed_width());
        assert!(font.style().is_empty());
        assert!(format!("{:?}", font).contains("DejaVu Sans"));
    }

    #[test]
    fn test_huge_text_is_rejected() {
        let _guard = test_guard();
        init();
        let font = Font::default_font(72).unwrap();
        let text = "W".repeat(2_000);
        assert!(font.size(&text).0 > MAX_SURFACE_DIM);
        assert!(matches!(
            font.render(&text, false, Rgba::opaque(0, 0, 0), None),
            Err(FontError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_source_display() {
        let file = FontSource::File {
            path: PathBuf::from("/fonts/a.ttc"),
            face_index: 2,
        };
        assert_eq!(file.to_string(), "/fonts/a.ttc#2");
        assert_eq!(FontSource::Memory { len: 10 }.to_string(), "<10 bytes in memory>");
    }
}
