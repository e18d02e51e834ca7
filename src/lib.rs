//! # mdoc-prefs
//!
//! Page-preference resolution and validation for Markdoc-flavored Hugo
//! content. Content authors declare "page preferences" — reader-facing
//! toggles like color or finish — in the YAML frontmatter of `.mdoc` files;
//! this crate resolves every preference against a per-language option-set
//! library and reports every malformed declaration before the site is
//! compiled.
//!
//! # Architecture: Load Once, Resolve Per File
//!
//! ```text
//! 1. Load      prefs/<lang>/  →  PrefOptionsConfig   (allowlists + option sets)
//! 2. Resolve   frontmatter    →  PagePrefsManifest   (one per content file)
//! 3. Report    manifests      →  console             (errors grouped by file)
//! ```
//!
//! The option-set library is loaded once per language at startup and never
//! mutated afterwards, so any number of per-file resolutions can share it
//! by reference across a thread pool. Each resolution keeps all of its
//! state local and produces a fresh manifest; nothing persists between
//! files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | Allowlist + option-set loading, merged per-language library |
//! | [`placeholders`] | Token extraction, substitution, combination expansion |
//! | [`manifest`] | Per-page resolution: default values across every context |
//! | [`frontmatter`] | YAML frontmatter extraction from `.mdoc` files |
//! | [`check`] | Per-file validation sweep across a content tree |
//! | [`config`] | Project `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting — per-file error reports |
//!
//! # Design Decisions
//!
//! ## Two-Tier Errors
//!
//! Configuration problems and content problems fail differently:
//!
//! - **Load-time errors are fatal.** A disallowed option id, a duplicate
//!   options-set id, or a set without exactly one default makes every
//!   downstream resolution meaningless, so the loaders return `Err` on the
//!   first violation and the run aborts before any file is touched.
//! - **Resolution errors accumulate.** `build_page_prefs_manifest` never
//!   fails; `Invalid placeholder:` and `Invalid options source:` messages
//!   collect in the manifest so a single pass reports everything wrong
//!   with a file. Those two prefixes are a contract — downstream tooling
//!   pattern-matches on them.
//!
//! ## Explicit Lookup Keys
//!
//! Templated options sources are resolved in two visible steps: substitute
//! the placeholder bindings into the template, then test the resulting
//! string against the library. The "not found" branch is a first-class,
//! tested path rather than a missing-key fallthrough.
//!
//! ## Combinations in Declaration Order
//!
//! The cross product over referenced preferences enumerates combinations
//! with the first token varying slowest, so `<FINISH>_<COLOR>` expands in
//! exactly the nested-loop order an author would write by hand. Combined
//! with sorted maps everywhere, two runs over the same inputs produce
//! byte-identical reports.

pub mod check;
pub mod config;
pub mod frontmatter;
pub mod manifest;
pub mod options;
pub mod output;
pub mod placeholders;

#[cfg(test)]
pub(crate) mod test_helpers;
