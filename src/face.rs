// src/face.rs

//! Face metadata read straight from the font tables: family name, style,
//! weight/width classes and underline placement.
//!
//! Used both by the catalog scan (naming and style of every installed face)
//! and by font handles (native style, underline rule).

use crate::style::StyleFlags;
use ttf_parser::{name_id, Face, FaceParsingError, Language};

/// Weight class from which a face counts as bold.
pub const BOLD_WEIGHT_THRESHOLD: u16 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct FaceInfo {
    /// Legacy family name (name ID 1), or the typographic family (ID 16)
    /// when the legacy one is missing.
    pub family: Option<String>,
    pub weight: u16,
    /// OS/2 width class, 5 = normal.
    pub width: u16,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_monospaced: bool,
    pub units_per_em: u16,
    /// `post` underline `(position, thickness)` in font units.
    pub underline: Option<(i16, i16)>,
}

impl FaceInfo {
    pub fn parse(data: &[u8], face_index: u32) -> Result<Self, FaceParsingError> {
        let face = Face::parse(data, face_index)?;
        let weight = face.weight().to_number();
        Ok(FaceInfo {
            family: family_name(&face, name_id::FAMILY)
                .or_else(|| family_name(&face, name_id::TYPOGRAPHIC_FAMILY)),
            weight,
            width: face.width().to_number(),
            is_bold: face.is_bold() || weight >= BOLD_WEIGHT_THRESHOLD,
            is_italic: face.is_italic() || face.is_oblique(),
            is_monospaced: face.is_monospaced(),
            units_per_em: face.units_per_em(),
            underline: face
                .underline_metrics()
                .map(|m| (m.position, m.thickness)),
        })
    }

    pub fn native_style(&self) -> StyleFlags {
        StyleFlags::from_bold_italic(self.is_bold, self.is_italic)
    }

    /// Underline `(position, thickness)` scaled to `px` pixels per em.
    pub fn underline_px(&self, px: f32) -> Option<(f32, f32)> {
        if self.units_per_em == 0 {
            return None;
        }
        let scale = px / self.units_per_em as f32;
        self.underline
            .map(|(pos, thick)| (pos as f32 * scale, thick as f32 * scale))
    }
}

/// Size of a collection header before its offset table.
const COLLECTION_HEADER_LEN: usize = 12;

/// Number of faces in a file: the collection size for `.ttc`/`.otc`, else 1.
///
/// A collection whose offset table does not fit in `data` has no usable
/// faces and yields 0; its face count must never reach the table parser.
pub fn face_count(data: &[u8]) -> u32 {
    let Some(count) = ttf_parser::fonts_in_collection(data) else {
        return 1;
    };
    let fits = (count as usize)
        .checked_mul(4)
        .and_then(|table| table.checked_add(COLLECTION_HEADER_LEN))
        .is_some_and(|end| end <= data.len());
    if fits {
        count
    } else {
        0
    }
}

/// True for errors that concern the whole file rather than one face, after
/// which no other face index can succeed.
pub fn is_file_level_error(err: &FaceParsingError) -> bool {
    matches!(
        err,
        FaceParsingError::UnknownMagic | FaceParsingError::FaceIndexOutOfBounds
    )
}

/// The first Unicode-decodable name with `id`, preferring US English.
fn family_name(face: &Face<'_>, id: u16) -> Option<String> {
    let mut fallback = None;
    for name in face.names() {
        if name.name_id != id {
            continue;
        }
        let Some(text) = name.to_string() else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        if name.language() == Language::English_UnitedStates {
            return Some(text);
        }
        fallback.get_or_insert(text);
    }
    fallback
}
