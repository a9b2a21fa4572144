// src/subsystem.rs

//! Process-wide font subsystem state.
//!
//! `init()` scans the installed fonts into a [`FontCatalog`] and `quit()` drops
//! it. Catalog lookups and font construction fail with
//! [`FontError::NotInitialized`] in between; nothing initializes implicitly.
//! Font handles own their face data, so handles created before `quit()` keep
//! working afterwards.
//!
//! Two locks are involved:
//! - the state lock, held for the whole of `init()`/`quit()` and for every
//!   catalog lookup;
//! - the backend lock, taken by every render, size and metrics call.

use crate::catalog::{FontCatalog, FontDescriptor};
use crate::config::CONFIG;
use crate::error::{FontError, Result};
use crate::font::Font;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Name reported by [`get_default_font`].
pub const DEFAULT_FONT_NAME: &str = "freesansbold.ttf";

/// The bundled default face (DejaVu Sans Bold).
pub static DEFAULT_FONT_DATA: &[u8] = include_bytes!("../assets/freesansbold.ttf");

static STATE: Mutex<Option<FontCatalog>> = Mutex::new(None);
static BACKEND: Mutex<()> = Mutex::new(());

fn lock_state() -> MutexGuard<'static, Option<FontCatalog>> {
    STATE.lock().unwrap_or_else(|e| e.into_inner())
}

/// Serializes rasterization. The guarded state is stateless, so a poisoned
/// lock is simply taken over.
pub(crate) fn backend_lock() -> MutexGuard<'static, ()> {
    BACKEND.lock().unwrap_or_else(|e| e.into_inner())
}

/// Build the catalog. Does nothing when already initialized.
pub fn init() {
    let mut state = lock_state();
    if state.is_some() {
        debug!("subsystem: init() while initialized, keeping catalog");
        return;
    }
    let catalog = FontCatalog::build(&CONFIG.catalog);
    info!(
        "subsystem: initialized with {} font families",
        catalog.families().count()
    );
    *state = Some(catalog);
}

/// Drop the catalog. Does nothing when not initialized.
pub fn quit() {
    if lock_state().take().is_some() {
        info!("subsystem: shut down");
    }
}

pub fn get_init() -> bool {
    lock_state().is_some()
}

pub(crate) fn ensure_init() -> Result<()> {
    if get_init() {
        Ok(())
    } else {
        Err(FontError::NotInitialized)
    }
}

fn with_catalog<T>(f: impl FnOnce(&FontCatalog) -> T) -> Result<T> {
    let state = lock_state();
    let catalog = state.as_ref().ok_or(FontError::NotInitialized)?;
    Ok(f(catalog))
}

/// Logical names of every installed family, sorted.
pub fn get_fonts() -> Result<Vec<String>> {
    with_catalog(|c| c.families().map(str::to_owned).collect())
}

/// Path of the installed face best matching `name` (a family or a
/// comma-separated list of families) and the requested style.
pub fn match_font(name: &str, bold: bool, italic: bool) -> Result<Option<PathBuf>> {
    with_catalog(|c| c.match_font(name, bold, italic))
}

/// A copy of the current catalog.
pub fn catalog_snapshot() -> Result<FontCatalog> {
    with_catalog(FontCatalog::clone)
}

/// File name of the bundled default font.
pub fn get_default_font() -> &'static str {
    DEFAULT_FONT_NAME
}

/// Where `sys_font` takes its face from.
#[derive(Debug, Clone)]
enum Resolution {
    Catalog(FontDescriptor),
    Default,
}

/// Load an installed font by family name, falling back to the bundled
/// default when nothing matches.
///
/// Bold and italic requests the loaded face does not carry natively are
/// turned on as synthetic styles.
pub fn sys_font(name: &str, point_size: u32, bold: bool, italic: bool) -> Result<Font> {
    let resolution = with_catalog(|c| match c.resolve(name, bold, italic) {
        Some(desc) => Resolution::Catalog(desc.clone()),
        None => Resolution::Default,
    })?;

    let mut font = match resolution {
        Resolution::Catalog(desc) => {
            match Font::with_face_index(&desc.file_path, desc.face_index, point_size) {
                Ok(font) => font,
                Err(e @ FontError::FontLoad { .. }) => {
                    warn!(
                        "subsystem: catalogued font {} failed to load ({}), using default",
                        desc.file_path.display(),
                        e
                    );
                    Font::default_font(point_size)?
                }
                Err(e) => return Err(e),
            }
        }
        Resolution::Default => {
            debug!("subsystem: no installed match for '{}', using default", name);
            Font::default_font(point_size)?
        }
    };

    let native = font.native_style();
    font.set_bold(bold && !native.bold());
    font.set_italic(italic && !native.italic());
    Ok(font)
}

/// Serializes unit tests that flip the global state.
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
pub(crate) fn test_guard() -> MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
