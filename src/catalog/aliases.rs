//! Generic family aliases.
//!
//! Each group lists interchangeable family names. The first member of a group
//! that is actually installed becomes the target for every member that is not.

use super::normalize_name;
use std::collections::{BTreeMap, BTreeSet};

/// Built-in alias groups. The first entry is the generic name.
pub const BUILTIN_ALIAS_GROUPS: &[&[&str]] = &[
    &[
        "monospace",
        "misc-fixed",
        "courier",
        "couriernew",
        "console",
        "fixed",
        "mono",
        "freemono",
        "bitstreamverasansmono",
        "verasansmono",
        "monotype",
        "lucidaconsole",
        "consolas",
        "dejavusansmono",
        "liberationmono",
    ],
    &[
        "sans",
        "arial",
        "helvetica",
        "swiss",
        "freesans",
        "bitstreamverasans",
        "verasans",
        "verdana",
        "tahoma",
        "calibri",
        "gillsans",
        "segoeui",
        "trebuchetms",
        "ubuntu",
        "dejavusans",
        "liberationsans",
    ],
    &[
        "serif",
        "times",
        "freeserif",
        "bitstreamveraserif",
        "roman",
        "timesroman",
        "timesnewroman",
        "dutch",
        "veraserif",
        "georgia",
        "cambria",
        "constantia",
        "dejavuserif",
        "liberationserif",
    ],
    &["wingdings", "wingbats"],
    &["comicsansms", "comicsans"],
];

/// Compute `alias → installed family` for the built-in groups followed by
/// `extra_groups`. Installed names are never aliased; the first group that
/// claims an alias keeps it.
pub fn build_aliases(
    installed: &BTreeSet<String>,
    extra_groups: &[Vec<String>],
) -> BTreeMap<String, String> {
    let builtin = BUILTIN_ALIAS_GROUPS
        .iter()
        .map(|group| group.iter().map(|s| normalize_name(s)).collect::<Vec<_>>());
    let extra = extra_groups
        .iter()
        .map(|group| group.iter().map(|s| normalize_name(s)).collect::<Vec<_>>());

    let mut aliases = BTreeMap::new();
    for group in builtin.chain(extra) {
        let Some(target) = group.iter().find(|name| installed.contains(*name)) else {
            continue;
        };
        for name in &group {
            if name.is_empty() || installed.contains(name) {
                continue;
            }
            aliases
                .entry(name.clone())
                .or_insert_with(|| target.clone());
        }
    }
    aliases
}
