//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};
use sysfont::config::EXTRA_DIRS_ENV;
use sysfont::{Font, Rgba};

/// The bundled default face, for tests that need font bytes on disk.
pub const FONT_BYTES: &[u8] = include_bytes!("../../assets/freesansbold.ttf");

pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
pub const RED: Rgba = Rgba::opaque(255, 0, 0);

/// Logical name of the family installed into [`font_dir`].
pub const INSTALLED_FAMILY: &str = "dejavusans";

static LOCK: Mutex<()> = Mutex::new(());
static INSTALL: Once = Once::new();

/// A directory holding a copy of the bundled face, added to the catalog's
/// search path so every test binary sees at least one installed family.
pub fn font_dir() -> PathBuf {
    Path::new(env!("CARGO_TARGET_TMPDIR")).join("sysfont-test-fonts")
}

fn install_test_fonts() {
    INSTALL.call_once(|| {
        let dir = font_dir();
        fs::create_dir_all(&dir).expect("create test font dir");
        fs::write(dir.join("SysfontTestSans.ttf"), FONT_BYTES).expect("write test font");
        env::set_var(EXTRA_DIRS_ENV, &dir);
    });
}

/// Serialize against other tests in this binary and make sure the subsystem
/// is up with the test fonts installed.
pub fn setup() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    install_test_fonts();
    sysfont::init();
    guard
}

pub fn default_font(size: u32) -> Font {
    Font::default_font(size).expect("bundled font loads")
}
