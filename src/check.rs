//! Per-file preference validation across a content tree.
//!
//! The orchestration layer around the resolution engine: discovers `.mdoc`
//! files under a language's content directory, builds each file's
//! preference manifest against the already-loaded option-set library, and
//! collects the soft errors per file.
//!
//! Files are independent — each check reads one file and operates on its
//! own manifest, with the library shared immutably — so the sweep runs the
//! files through rayon's thread pool. Results are re-sorted by path after
//! the parallel pass so reports are deterministic.
//!
//! A file that cannot be read or has malformed frontmatter is reported
//! through the same per-file error channel as resolution errors; only
//! filesystem traversal failure aborts the sweep.

use crate::frontmatter::{self, FrontmatterError};
use crate::manifest::{PagePrefsManifest, build_page_prefs_manifest};
use crate::options::PrefOptionsConfig;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Outcome of checking one content tree.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Total number of `.mdoc` files found and checked.
    pub files_checked: usize,
    /// Errors per file, path-sorted. Files with no errors have no entry.
    pub errors_by_file_path: BTreeMap<PathBuf, Vec<String>>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        !self.errors_by_file_path.is_empty()
    }
}

/// Find every `.mdoc` file under `dir`, sorted by path.
pub fn find_content_files(dir: &Path) -> Result<Vec<PathBuf>, CheckError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("mdoc"))
                .unwrap_or(false)
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Check every content file under `dir` against the option-set library.
pub fn check_content_dir(
    dir: &Path,
    pref_options_config: &PrefOptionsConfig,
) -> Result<CheckReport, CheckError> {
    let files = find_content_files(dir)?;

    let results: Vec<(PathBuf, Vec<String>)> = files
        .par_iter()
        .map(|path| (path.clone(), check_file(path, pref_options_config)))
        .collect();

    let mut report = CheckReport {
        files_checked: files.len(),
        ..CheckReport::default()
    };
    for (path, errors) in results {
        if !errors.is_empty() {
            report.errors_by_file_path.insert(path, errors);
        }
    }

    Ok(report)
}

/// Validate a single file, funneling read and frontmatter failures into
/// the same per-file error list as resolution errors.
fn check_file(path: &Path, pref_options_config: &PrefOptionsConfig) -> Vec<String> {
    match build_manifest_for_file(path, pref_options_config) {
        Ok(manifest) => manifest.errors,
        Err(error) => vec![error.to_string()],
    }
}

/// Read one content file and build its preference manifest.
///
/// Also the backing for the `manifest` CLI command, which dumps the result
/// as JSON for debugging.
pub fn build_manifest_for_file(
    path: &Path,
    pref_options_config: &PrefOptionsConfig,
) -> Result<PagePrefsManifest, CheckError> {
    let contents = fs::read_to_string(path)?;
    let frontmatter = frontmatter::parse_frontmatter(&contents)?;
    Ok(build_page_prefs_manifest(&frontmatter, pref_options_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{paint_colors_config, paint_colors_frontmatter_yaml, write_mdoc};
    use tempfile::TempDir;

    #[test]
    fn finds_mdoc_files_recursively_and_sorted() {
        let tmp = TempDir::new().unwrap();
        write_mdoc(&tmp.path().join("b.mdoc"), "title: B\n");
        write_mdoc(&tmp.path().join("nested/a.mdoc"), "title: A\n");
        fs::write(tmp.path().join("ignored.md"), "not mdoc").unwrap();

        let files = find_content_files(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("b.mdoc"), tmp.path().join("nested/a.mdoc")]
        );
    }

    #[test]
    fn valid_tree_reports_no_errors() {
        let tmp = TempDir::new().unwrap();
        write_mdoc(
            &tmp.path().join("paint.mdoc"),
            paint_colors_frontmatter_yaml(),
        );
        write_mdoc(&tmp.path().join("plain.mdoc"), "title: No prefs here\n");

        let report = check_content_dir(tmp.path(), &paint_colors_config()).unwrap();
        assert_eq!(report.files_checked, 2);
        assert!(!report.has_errors());
    }

    #[test]
    fn bad_file_is_reported_without_blocking_others() {
        let tmp = TempDir::new().unwrap();
        write_mdoc(
            &tmp.path().join("good.mdoc"),
            paint_colors_frontmatter_yaml(),
        );
        write_mdoc(
            &tmp.path().join("bad.mdoc"),
            "\
page_preferences:
  - id: paint
    display_name: Paint color
    options_source: <FINISH>_<COLOUR>_paint_options
",
        );

        let report = check_content_dir(tmp.path(), &paint_colors_config()).unwrap();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.errors_by_file_path.len(), 1);

        let errors = &report.errors_by_file_path[&tmp.path().join("bad.mdoc")];
        // FINISH is also unresolvable here: bad.mdoc declares no earlier prefs
        assert_eq!(
            errors,
            &vec![
                "Invalid placeholder: FINISH".to_string(),
                "Invalid placeholder: COLOUR".to_string(),
            ]
        );
    }

    #[test]
    fn missing_frontmatter_is_a_per_file_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("raw.mdoc"), "# No frontmatter at all\n").unwrap();

        let report = check_content_dir(tmp.path(), &paint_colors_config()).unwrap();
        assert_eq!(report.files_checked, 1);
        let errors = &report.errors_by_file_path[&tmp.path().join("raw.mdoc")];
        assert!(errors[0].contains("missing frontmatter"));
    }

    #[test]
    fn empty_tree_is_a_clean_report() {
        let tmp = TempDir::new().unwrap();
        let report = check_content_dir(tmp.path(), &paint_colors_config()).unwrap();
        assert_eq!(report.files_checked, 0);
        assert!(!report.has_errors());
    }

    #[test]
    fn build_manifest_for_file_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("paint.mdoc");
        write_mdoc(&path, paint_colors_frontmatter_yaml());

        let manifest = build_manifest_for_file(&path, &paint_colors_config()).unwrap();
        assert!(manifest.errors.is_empty());
        assert_eq!(
            manifest.prefs_by_id["paint"].initial_value.as_deref(),
            Some("elegant_royal")
        );
    }
}
