//! Package-description parsing for README lookup.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// The subset of `swift package describe --type json` output we consume.
/// Every other field is ignored.
#[derive(Debug, Default, Deserialize)]
struct PackageDescription {
    /// Absolute package root; target paths are relative to it.
    #[serde(default)]
    path: Option<PathBuf>,

    #[serde(default)]
    targets: Vec<TargetDescription>,
}

#[derive(Debug, Deserialize)]
struct TargetDescription {
    name: String,
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Module-name to source-directory mapping taken from a package
/// description. Used to locate per-module `README.md` files.
#[derive(Debug, Default)]
pub(crate) struct SourcePaths {
    roots: HashMap<String, PathBuf>,
}

impl SourcePaths {
    /// A mapping that knows no source paths.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a package-description JSON file.
    ///
    /// A missing or malformed file degrades to an empty mapping with a
    /// warning; generation proceeds without README splicing.
    pub fn load(file: &Path) -> Self {
        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    path = %file.display(),
                    error = %err,
                    "cannot read package description"
                );
                return Self::empty();
            }
        };
        let description: PackageDescription =
            match serde_json::from_str(&text) {
                Ok(description) => description,
                Err(err) => {
                    warn!(
                        path = %file.display(),
                        error = %err,
                        "cannot parse package description"
                    );
                    return Self::empty();
                }
            };

        let package_root = description.path.unwrap_or_default();
        let roots: HashMap<String, PathBuf> = description
            .targets
            .into_iter()
            .filter_map(|target| {
                let path = target.path?;
                let absolute = if path.is_absolute() {
                    path
                } else {
                    package_root.join(path)
                };
                Some((target.name, absolute))
            })
            .collect();

        debug!(targets = roots.len(), "loaded package description");
        Self { roots }
    }

    /// Returns the source directory recorded for `module`, if any.
    pub fn source_root(&self, module: &str) -> Option<&Path> {
        self.roots.get(module).map(PathBuf::as_path)
    }

    /// Returns where `module`'s README would live: `<source root>/README.md`.
    pub fn readme_path(&self, module: &str) -> Option<PathBuf> {
        self.source_root(module).map(|root| root.join("README.md"))
    }
}
