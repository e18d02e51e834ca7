//! Option-set library loading and validation.
//!
//! Each language directory carries the full set of preference options
//! available to content authors in that language, split across one YAML
//! file per preference *type*, plus an allowlist per type constraining
//! which option ids the files may declare:
//!
//! ```text
//! prefs/en/
//! ├── allowlists/
//! │   ├── color.yaml           # permitted option ids for type "color"
//! │   └── finish.yaml
//! └── options/
//!     ├── color.yaml           # options-set id → option records
//!     └── finish.yaml
//! ```
//!
//! An allowlist file is a YAML sequence of option ids. An options file maps
//! options-set ids to option records:
//!
//! ```yaml
//! color_options:
//!   - id: blue
//!     display_name: Blue
//!     default: true
//!   - id: red
//!     display_name: Red
//! ```
//!
//! ## Validation
//!
//! Loading is fail-fast: a malformed library makes every downstream
//! resolution meaningless, so the first violation aborts with a [`LoadError`]
//! naming the offending file, set, or id. Enforced rules:
//!
//! - every option id in a file belongs to the allowlist of the same type
//!   (the type is the file stem)
//! - every options file has a matching allowlist
//! - no options-set id is declared twice, within or across files
//! - every option set marks exactly one option `default: true`
//!
//! The merged [`PrefOptionsConfig`] is built once per language at startup
//! and shared immutably across every per-file manifest build; nothing
//! mutates it after construction, so parallel resolution needs no locking.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("prefs directory does not exist: {0}")]
    MissingDir(PathBuf),
    #[error("no allowlist found for preference type '{type_name}' (required by {path})")]
    MissingAllowlist { type_name: String, path: PathBuf },
    #[error("option id '{id}' is not allowed for preference type '{type_name}' in {path}")]
    NotAllowed {
        id: String,
        type_name: String,
        path: PathBuf,
    },
    #[error("options set '{set_id}' in {path} is already declared elsewhere")]
    DuplicateOptionsSet { set_id: String, path: PathBuf },
    #[error("options set '{set_id}' in {path} has no option marked default")]
    NoDefault { set_id: String, path: PathBuf },
    #[error("options set '{set_id}' in {path} has more than one option marked default")]
    MultipleDefaults { set_id: String, path: PathBuf },
}

/// A single permissible value within an option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefOption {
    /// Value identifier, used in options-set keys and template variables.
    pub id: String,
    /// Human-readable label shown to readers.
    pub display_name: String,
    /// Whether this option is the set's default. Exactly one per set.
    #[serde(default)]
    pub default: bool,
}

/// The merged option-set library for one language.
///
/// Maps options-set ids to their ordered option lists. Constructed by
/// [`load_prefs_config_from_lang_dir`] (which enforces the one-default
/// invariant) or from literal sets in tests via [`PrefOptionsConfig::from_sets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefOptionsConfig(BTreeMap<String, Vec<PrefOption>>);

impl PrefOptionsConfig {
    /// Build a library directly from `(set id, options)` pairs.
    pub fn from_sets<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<PrefOption>)>,
        S: Into<String>,
    {
        Self(sets.into_iter().map(|(id, opts)| (id.into(), opts)).collect())
    }

    /// Look up an option set by id.
    pub fn get(&self, set_id: &str) -> Option<&[PrefOption]> {
        self.0.get(set_id).map(Vec::as_slice)
    }

    /// The id of the option marked `default` in the given set.
    ///
    /// Returns `None` if the set does not exist. The loader guarantees
    /// exactly one default per set; hand-built test configs may violate
    /// that, in which case the first default wins.
    pub fn default_value(&self, set_id: &str) -> Option<&str> {
        self.0
            .get(set_id)?
            .iter()
            .find(|opt| opt.default)
            .map(|opt| opt.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(set id, options)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<PrefOption>)> {
        self.0.iter()
    }
}

/// Load the per-type allowlists from a language directory.
///
/// Returns a map from preference type (file stem) to the set of option ids
/// permitted in that type's options file. Fatal if the directory is missing
/// or any file is unreadable; runs once at startup, never per content file.
pub fn load_allowlists_from_lang_dir(
    dir: &Path,
) -> Result<BTreeMap<String, BTreeSet<String>>, LoadError> {
    let allowlists_dir = dir.join("allowlists");
    if !allowlists_dir.is_dir() {
        return Err(LoadError::MissingDir(allowlists_dir));
    }

    let mut allowlists = BTreeMap::new();
    for path in yaml_files_sorted(&allowlists_dir)? {
        let type_name = file_stem(&path);
        let contents = fs::read_to_string(&path)?;
        let ids: Vec<String> = serde_yaml::from_str(&contents).map_err(|source| {
            LoadError::Yaml {
                path: path.clone(),
                source,
            }
        })?;
        allowlists.insert(type_name, ids.into_iter().collect());
    }

    Ok(allowlists)
}

/// Load and merge every per-type options file from a language directory.
///
/// Validates each file against the allowlist of the same type and enforces
/// the library invariants (unique set ids, exactly one default per set).
/// Fails fast on the first violation — see the module docs.
pub fn load_prefs_config_from_lang_dir(
    dir: &Path,
    allowlists_by_type: &BTreeMap<String, BTreeSet<String>>,
) -> Result<PrefOptionsConfig, LoadError> {
    let options_dir = dir.join("options");
    if !options_dir.is_dir() {
        return Err(LoadError::MissingDir(options_dir));
    }

    let mut merged: BTreeMap<String, Vec<PrefOption>> = BTreeMap::new();
    for path in yaml_files_sorted(&options_dir)? {
        let type_name = file_stem(&path);
        let allowlist =
            allowlists_by_type
                .get(&type_name)
                .ok_or_else(|| LoadError::MissingAllowlist {
                    type_name: type_name.clone(),
                    path: path.clone(),
                })?;

        let contents = fs::read_to_string(&path)?;
        let sets: BTreeMap<String, Vec<PrefOption>> = serde_yaml::from_str(&contents)
            .map_err(|source| LoadError::Yaml {
                path: path.clone(),
                source,
            })?;

        for (set_id, options) in sets {
            if merged.contains_key(&set_id) {
                return Err(LoadError::DuplicateOptionsSet {
                    set_id,
                    path: path.clone(),
                });
            }
            validate_option_set(&set_id, &options, allowlist, &type_name, &path)?;
            merged.insert(set_id, options);
        }
    }

    Ok(PrefOptionsConfig(merged))
}

fn validate_option_set(
    set_id: &str,
    options: &[PrefOption],
    allowlist: &BTreeSet<String>,
    type_name: &str,
    path: &Path,
) -> Result<(), LoadError> {
    for option in options {
        if !allowlist.contains(&option.id) {
            return Err(LoadError::NotAllowed {
                id: option.id.clone(),
                type_name: type_name.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let defaults = options.iter().filter(|opt| opt.default).count();
    match defaults {
        1 => Ok(()),
        0 => Err(LoadError::NoDefault {
            set_id: set_id.to_string(),
            path: path.to_path_buf(),
        }),
        _ => Err(LoadError::MultipleDefaults {
            set_id: set_id.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// YAML files in a directory, sorted by path for deterministic merge order.
fn yaml_files_sorted(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
