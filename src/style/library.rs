//! Registry of named style sheets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, warn};
use once_cell::sync::Lazy;

use super::error::StyleError;
use super::sheet::StyleSheet;
use crate::rc::RcParams;

/// Recognized style sheet file extensions in priority order.
///
/// When a directory holds several files with the same base name, the
/// extension appearing earlier in this list wins.
pub const STYLE_EXTENSIONS: &[&str] = &[".mplstyle", ".yaml", ".yml"];

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("dark_background", include_str!("builtin/dark_background.yaml")),
    ("ggplot", include_str!("builtin/ggplot.yaml")),
    ("grayscale", include_str!("builtin/grayscale.yaml")),
];

static BUILTIN: Lazy<StyleLibrary> = Lazy::new(|| {
    let mut library = StyleLibrary::new();
    library.insert(StyleSheet::new("default", RcParams::defaults()));
    for (name, source) in BUILTIN_SOURCES {
        match StyleSheet::from_yaml(name, source) {
            Ok(sheet) => {
                library.insert(sheet);
            }
            Err(e) => error!("built-in style '{}' is invalid: {}", name, e),
        }
    }
    library
});

/// A collection of style sheets addressable by name.
#[derive(Debug, Clone, Default)]
pub struct StyleLibrary {
    sheets: BTreeMap<String, StyleSheet>,
}

impl StyleLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in styles: `default`, `dark_background`, `ggplot`
    /// and `grayscale`.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Registers a sheet, returning the one it replaced.
    pub fn insert(&mut self, sheet: StyleSheet) -> Option<StyleSheet> {
        self.sheets.insert(sheet.name().to_string(), sheet)
    }

    pub fn get(&self, name: &str) -> Option<&StyleSheet> {
        self.sheets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Style names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Loads every style sheet in `dir` (not recursive).
    ///
    /// Sheets replace library entries of the same name, so directories
    /// loaded later take precedence. Returns the number of sheets loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, StyleError> {
        let dir = dir.as_ref();
        let found = collect_style_files(dir)?;
        let count = found.len();

        for (name, path) in found {
            let source = fs::read_to_string(&path).map_err(|e| StyleError::io(&path, e))?;
            let sheet = StyleSheet::from_yaml(&name, &source)?;
            if self.insert(sheet).is_some() {
                warn!(
                    "style '{}' from {} replaces a previously registered style",
                    name,
                    path.display()
                );
            }
        }

        Ok(count)
    }
}

/// Maps style names to files, keeping the highest priority extension for
/// each name.
fn collect_style_files(dir: &Path) -> Result<BTreeMap<String, PathBuf>, StyleError> {
    let entries = fs::read_dir(dir).map_err(|e| StyleError::io(dir, e))?;
    let mut found: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();

    for entry in entries {
        let path = entry.map_err(|e| StyleError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((priority, ext)) = STYLE_EXTENSIONS
            .iter()
            .enumerate()
            .find(|(_, ext)| file_name.ends_with(**ext))
        else {
            continue;
        };

        let name = file_name[..file_name.len() - ext.len()].to_string();
        if name.is_empty() {
            continue;
        }
        if let Some((existing, _)) = found.get(&name) {
            if *existing <= priority {
                continue;
            }
        }
        found.insert(name, (priority, path.clone()));
    }

    Ok(found
        .into_iter()
        .map(|(name, (_, path))| (name, path))
        .collect())
}
