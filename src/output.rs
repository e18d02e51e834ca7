//! CLI output formatting for check runs.
//!
//! # Information-First Display
//!
//! Output is organized around the content author's unit of work — the
//! file — not around error categories. Each offending file gets a header
//! line with its path relative to the content root, followed by its errors
//! indented underneath, in the order the resolver found them:
//!
//! ```text
//! [en] 12 files checked, 2 with errors
//!
//! reference/agent.mdoc
//!     Invalid placeholder: COLOUR
//! reference/paint.mdoc
//!     Invalid options source: matte_blue_paint_options
//! ```
//!
//! A clean run is a single summary line.
//!
//! # Architecture
//!
//! [`format_check_output`] returns `Vec<String>` for testability;
//! [`print_check_output`] is the stdout wrapper. Format functions are
//! pure — no I/O, no side effects.

use crate::check::CheckReport;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to the content root, for readable headers.
fn display_path(path: &Path, content_root: &Path) -> String {
    path.strip_prefix(content_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Format one language's check report as output lines.
pub fn format_check_output(report: &CheckReport, content_root: &Path, lang: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {} files checked, {} with errors",
        lang,
        report.files_checked,
        report.errors_by_file_path.len()
    )];

    if report.has_errors() {
        lines.push(String::new());
        for (path, errors) in &report.errors_by_file_path {
            lines.push(display_path(path, content_root));
            for error in errors {
                lines.push(format!("{}{}", indent(1), error));
            }
        }
    }

    lines
}

/// Print a check report to stdout.
pub fn print_check_output(report: &CheckReport, content_root: &Path, lang: &str) {
    for line in format_check_output(report, content_root, lang) {
        println!("{}", line);
    }
}
