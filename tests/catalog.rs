mod common;

use common::{font_dir, setup, FONT_BYTES, INSTALLED_FAMILY};
use std::fs;
use sysfont::catalog::scan;
use sysfont::config::CatalogConfig;
use sysfont::{FontCatalog, FontError, FontSource, StyleFlags};
use test_log::test;

const FABRICATED: &str = "zzqqxnotarealfont";

#[test]
fn test_font_names_are_normalized_and_sorted() {
    let _guard = setup();
    let names = sysfont::get_fonts().unwrap();
    assert!(names.iter().any(|name| name == INSTALLED_FAMILY));
    for name in &names {
        assert!(!name.is_empty());
        assert!(
            name.chars().all(|c| c.is_alphanumeric() && !c.is_uppercase()),
            "bad logical name {:?}",
            name
        );
    }
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, names);
}

#[test]
fn test_every_listed_name_matches_an_absolute_path() {
    let _guard = setup();
    let names = sysfont::get_fonts().unwrap();
    assert!(!names.is_empty());
    for name in names {
        let path = sysfont::match_font(&name, false, false)
            .unwrap()
            .unwrap_or_else(|| panic!("{} listed but not matched", name));
        assert!(path.is_absolute(), "{}", path.display());
        assert!(path.exists(), "{}", path.display());
    }
}

#[test]
fn test_match_font_name_lists() {
    let _guard = setup();
    assert_eq!(sysfont::match_font("thisisnotafont", false, false).unwrap(), None);
    assert_eq!(
        sysfont::match_font("thisisnotafont,thisisnotafonteither,andanotherone", false, false)
            .unwrap(),
        None
    );

    for real in sysfont::get_fonts().unwrap() {
        let query = format!("thisisnotafont, {}, anothernonfont", real);
        assert!(sysfont::match_font(&query, false, false).unwrap().is_some(), "{}", query);
    }
    let spaced = sysfont::match_font("thisisnotafont, DejaVu Sans, anothernonfont", true, false)
        .unwrap()
        .unwrap();
    assert!(spaced.is_absolute());
}

#[test]
fn test_installed_test_font_is_catalogued() {
    let _guard = setup();
    let snapshot = sysfont::catalog_snapshot().unwrap();
    let variants = snapshot.descriptors(INSTALLED_FAMILY);
    assert!(!variants.is_empty());
    assert!(variants.iter().all(|d| d.file_path.is_absolute()));
    // A host copy of the same face may win the variant slot, but the test
    // copy itself must be scannable.
    let copy = fs::canonicalize(font_dir().join("SysfontTestSans.ttf")).unwrap();
    let scanned = scan::scan_file(&copy);
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].logical_name, INSTALLED_FAMILY);
}

#[test]
fn test_match_font_is_deterministic() {
    let _guard = setup();
    for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
        let first = sysfont::match_font("sans,serif,monospace", bold, italic).unwrap();
        let second = sysfont::match_font("sans,serif,monospace", bold, italic).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_sys_font_always_returns_a_handle() {
    let _guard = setup();
    let font = sysfont::sys_font(FABRICATED, 20, false, false).unwrap();
    assert_eq!(font.source(), &FontSource::Default);
    assert!(font.render("ok", true, common::WHITE, None).is_ok());

    let names = sysfont::get_fonts().unwrap();
    assert!(!names.is_empty());
    for name in names.iter().take(5) {
        let font = sysfont::sys_font(name, 14, false, false).unwrap();
        assert!(font.get_height() > 0);
    }
}

#[test]
fn test_sys_font_only_synthesizes_missing_styles() {
    let _guard = setup();
    // The bundled face is bold already, so only italic is synthesized.
    let font = sysfont::sys_font(FABRICATED, 20, true, true).unwrap();
    assert_eq!(font.native_style(), StyleFlags::BOLD);
    assert!(!font.get_bold());
    assert!(font.get_italic());
    assert!(!font.get_underline());
}

#[test]
fn test_sys_font_rejects_zero_size() {
    let _guard = setup();
    assert!(matches!(
        sysfont::sys_font(FABRICATED, 0, false, false),
        Err(FontError::InvalidArgument(_))
    ));
}

#[test]
fn test_lookups_before_init_fail() {
    let _guard = setup();
    sysfont::quit();
    assert!(matches!(sysfont::get_fonts(), Err(FontError::NotInitialized)));
    assert!(matches!(
        sysfont::match_font("sans", false, false),
        Err(FontError::NotInitialized)
    ));
    assert_eq!(sysfont::get_default_font(), "freesansbold.ttf");
    sysfont::init();
    assert!(sysfont::get_init());
}

#[test]
fn test_snapshot_agrees_with_get_fonts() {
    let _guard = setup();
    let snapshot = sysfont::catalog_snapshot().unwrap();
    let names: Vec<String> = snapshot.families().map(str::to_owned).collect();
    assert_eq!(names, sysfont::get_fonts().unwrap());
    assert!(snapshot.len() >= names.len());
}

#[test]
fn test_catalog_from_private_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("deep")).unwrap();
    fs::write(dir.path().join("deep").join("Bundled.ttf"), FONT_BYTES).unwrap();
    fs::write(dir.path().join("garbage.otf"), b"OTTO but not really").unwrap();

    let config = CatalogConfig {
        search_dirs: vec![dir.path().to_path_buf()],
        extra_alias_groups: vec![vec!["DejaVu Sans".into(), "House Style".into()]],
        ..CatalogConfig::default()
    };
    // Scan only the private directory; `build` would also pick up the
    // shared test font directory from the environment.
    let catalog = FontCatalog::from_descriptors(
        scan::scan_dirs(&config.search_dirs, &config),
        &config,
    );
    assert!(catalog.families().any(|name| name == "dejavusans"));

    let exact = catalog.match_font("DejaVu Sans", false, false).unwrap();
    assert!(exact.ends_with("deep/Bundled.ttf"));
    assert!(exact.is_absolute());

    // Only a bold face exists, so every style request lands on it.
    assert_eq!(catalog.match_font("dejavusans", true, true), Some(exact.clone()));
    assert_eq!(catalog.match_font("Helvetica", false, false), Some(exact.clone()));
    assert_eq!(catalog.match_font("house style", false, false), Some(exact.clone()));
    assert_eq!(catalog.match_font("javu", false, false), Some(exact));
    assert!(!catalog.families().any(|name| name == "helvetica"));
}
