//! Directory scan producing one descriptor per usable face.

use super::{normalize_name, FontDescriptor};
use crate::config::CatalogConfig;
use crate::face::{face_count, is_file_level_error, FaceInfo};
use log::{debug, trace, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk every directory in `dirs` and describe every face found.
///
/// Missing directories are skipped. Files are visited in sorted order and a
/// file reachable through two roots is read once.
pub fn scan_dirs(dirs: &[PathBuf], config: &CatalogConfig) -> Vec<FontDescriptor> {
    let mut files = Vec::new();
    for dir in dirs {
        let root = match fs::canonicalize(dir) {
            Ok(root) => root,
            Err(e) => {
                debug!("catalog: skipping font dir {}: {}", dir.display(), e);
                continue;
            }
        };
        trace!("catalog: walking {}", root.display());
        for entry in WalkDir::new(&root).follow_links(true) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && config.is_font_file(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => debug!("catalog: walk error under {}: {}", root.display(), e),
            }
        }
    }
    files.sort();
    files.dedup();

    files.iter().flat_map(|path| scan_file(path)).collect()
}

/// Describe every face in one font file. Unreadable files and faces without
/// a usable family name yield nothing.
pub fn scan_file(path: &Path) -> Vec<FontDescriptor> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("catalog: cannot read {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for face_index in 0..face_count(&data) {
        let info = match FaceInfo::parse(&data, face_index) {
            Ok(info) => info,
            Err(e) if is_file_level_error(&e) => {
                debug!("catalog: skipping {}: {}", path.display(), e);
                break;
            }
            Err(e) => {
                debug!(
                    "catalog: skipping {} face {}: {}",
                    path.display(),
                    face_index,
                    e
                );
                continue;
            }
        };
        let logical_name = info
            .family
            .as_deref()
            .map(normalize_name)
            .unwrap_or_default();
        if logical_name.is_empty() {
            debug!(
                "catalog: {} face {} has no usable family name",
                path.display(),
                face_index
            );
            continue;
        }
        found.push(FontDescriptor {
            logical_name,
            file_path: path.to_path_buf(),
            face_index,
            is_bold: info.is_bold,
            is_italic: info.is_italic,
            weight: info.weight,
            width: info.width,
        });
    }
    found
}
