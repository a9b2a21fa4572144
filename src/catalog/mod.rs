// src/catalog/mod.rs

//! Installed-font catalog and name/style matching.
//!
//! A [`FontCatalog`] is built once from a directory scan and never mutated
//! afterwards. Lookups go through [`FontCatalog::resolve`]:
//!
//! 1. the query is split on commas and each candidate normalized;
//! 2. candidates are tried in order against family names, then aliases;
//! 3. failing that, each candidate is tried as a substring of family names;
//! 4. within the chosen family the variant closest to the requested style wins.

pub mod aliases;
pub mod scan;

use crate::config::CatalogConfig;
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Shortest candidate considered for substring matching.
pub const MIN_FUZZY_LEN: usize = 3;

/// Lowercase `name` and drop everything that is not alphanumeric.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// One installed face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    pub logical_name: String,
    pub file_path: PathBuf,
    pub face_index: u32,
    pub is_bold: bool,
    pub is_italic: bool,
    pub weight: u16,
    pub width: u16,
}

impl FontDescriptor {
    fn variant(&self) -> Variant {
        (self.is_bold, self.is_italic)
    }

    /// Ordering key among faces competing for the same variant; lower wins.
    fn preference(&self) -> (bool, u16, &Path, u32) {
        let target: i32 = if self.is_bold { 700 } else { 400 };
        (
            self.width != 5,
            (self.weight as i32 - target).unsigned_abs() as u16,
            self.file_path.as_path(),
            self.face_index,
        )
    }
}

/// `(bold, italic)`
type Variant = (bool, bool);

/// Ranking of an available variant against a request; lower is better.
fn variant_rank(have: Variant, want: Variant) -> (u8, u8, u8) {
    let mismatched = u8::from(have.0 != want.0) + u8::from(have.1 != want.1);
    let unrequested = u8::from(have.0 && !want.0) + u8::from(have.1 && !want.1);
    let order = u8::from(have.0) + 2 * u8::from(have.1);
    (mismatched, unrequested, order)
}

#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    families: BTreeMap<String, BTreeMap<Variant, FontDescriptor>>,
    aliases: BTreeMap<String, String>,
    fuzzy_matching: bool,
}

impl FontCatalog {
    /// Scan the configured directories and build the catalog.
    pub fn build(config: &CatalogConfig) -> FontCatalog {
        let dirs = config.effective_dirs();
        info!("catalog: scanning {} font directories", dirs.len());
        let catalog = Self::from_descriptors(scan::scan_dirs(&dirs, config), config);
        info!(
            "catalog: {} families, {} faces, {} aliases",
            catalog.families.len(),
            catalog.len(),
            catalog.aliases.len()
        );
        catalog
    }

    /// Build from already-described faces. Duplicated variants are settled
    /// by width class, weight, path and face index.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = FontDescriptor>,
        config: &CatalogConfig,
    ) -> FontCatalog {
        let mut families: BTreeMap<String, BTreeMap<Variant, FontDescriptor>> = BTreeMap::new();
        for desc in descriptors {
            let variants = families.entry(desc.logical_name.clone()).or_default();
            if let Some(existing) = variants.get(&desc.variant()) {
                if existing.preference() <= desc.preference() {
                    debug!(
                        "catalog: {} shadowed by {} for '{}'",
                        desc.file_path.display(),
                        existing.file_path.display(),
                        desc.logical_name
                    );
                    continue;
                }
            }
            variants.insert(desc.variant(), desc);
        }

        let installed: BTreeSet<String> = families.keys().cloned().collect();
        let aliases = aliases::build_aliases(&installed, &config.extra_alias_groups);

        FontCatalog {
            families,
            aliases,
            fuzzy_matching: config.fuzzy_matching,
        }
    }

    /// Installed logical names, sorted. Aliases are not included.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Every variant of one family, regular first.
    pub fn descriptors(&self, name: &str) -> Vec<&FontDescriptor> {
        let mut found: Vec<_> = self
            .families
            .get(&normalize_name(name))
            .map(|variants| variants.values().collect())
            .unwrap_or_default();
        found.sort_by_key(|d| variant_rank(d.variant(), (false, false)).2);
        found
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Number of catalogued faces.
    pub fn len(&self) -> usize {
        self.families.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Find the face best matching `query` (one name or a comma-separated
    /// list) and the requested style.
    pub fn resolve(&self, query: &str, bold: bool, italic: bool) -> Option<&FontDescriptor> {
        let candidates: Vec<String> = query
            .split(',')
            .map(normalize_name)
            .filter(|c| !c.is_empty())
            .collect();

        let family = self
            .find_exact(&candidates)
            .or_else(|| self.find_fuzzy(&candidates))?;
        let variants = self.families.get(family)?;
        variants
            .values()
            .min_by_key(|d| variant_rank(d.variant(), (bold, italic)))
    }

    /// Path of the best match, if any.
    pub fn match_font(&self, query: &str, bold: bool, italic: bool) -> Option<PathBuf> {
        self.resolve(query, bold, italic)
            .map(|d| d.file_path.clone())
    }

    fn find_exact(&self, candidates: &[String]) -> Option<&str> {
        candidates.iter().find_map(|c| {
            if let Some((name, _)) = self.families.get_key_value(c) {
                return Some(name.as_str());
            }
            self.aliases
                .get(c)
                .filter(|target| self.families.contains_key(*target))
                .map(String::as_str)
        })
    }

    fn find_fuzzy(&self, candidates: &[String]) -> Option<&str> {
        if !self.fuzzy_matching {
            return None;
        }
        candidates
            .iter()
            .filter(|c| c.chars().count() >= MIN_FUZZY_LEN)
            .find_map(|c| {
                self.families
                    .keys()
                    .filter(|name| name.contains(c.as_str()))
                    .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
                    .map(String::as_str)
            })
    }
}
