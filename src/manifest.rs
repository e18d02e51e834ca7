//! Per-page preference manifest building.
//!
//! Given a page's ordered preference declarations and the loaded option-set
//! library, [`build_page_prefs_manifest`] resolves every preference to its
//! default value in every reachable context and reports every malformed
//! reference along the way.
//!
//! ## Resolution Model
//!
//! Preferences are processed in declaration order. A preference whose
//! options source embeds tokens (`<FINISH>_<COLOR>_paint_options`) is
//! expanded across the cross product of the referenced preferences' option
//! values: each combination is substituted into the template and looked up
//! in the library, producing one `default_values_by_options_set_id` entry
//! per combination that names a real option set.
//!
//! The `initial_value` of a preference is its default in the "all defaults"
//! context — the combination where every referenced preference takes its
//! own `initial_value`.
//!
//! ## Error Model
//!
//! The builder never fails. Soft errors accumulate in the manifest:
//!
//! - `Invalid placeholder: <TOKEN>` — the token names no earlier, resolved
//!   preference (unknown id, forward/self reference, or a reference to a
//!   preference that itself failed). The preference contributes no values,
//!   so anything referencing it later fails the same way; cascading errors
//!   are intentional so one pass reports everything wrong with a file.
//! - `Invalid options source: <string>` — a substituted identifier has no
//!   entry in the library. Only that combination is dropped; the remaining
//!   combinations still resolve.
//!
//! These message prefixes are a contract — downstream reporting tooling
//! pattern-matches on them.
//!
//! The pass is a single deterministic sweep: identical inputs produce
//! structurally identical manifests, including error order. All state is
//! local to the call, so any number of builds may share one library
//! reference concurrently.

use crate::frontmatter::{Frontmatter, PrefDefinition};
use crate::options::{PrefOption, PrefOptionsConfig};
use crate::placeholders::{cross_product, find_tokens, substitute};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A soft, per-file resolution error. Rendered into the manifest's error
/// list via `Display`; the exact strings are part of the output contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),
    #[error("Invalid options source: {0}")]
    InvalidOptionsSource(String),
}

/// The fully-resolved preference data for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PagePrefsManifest {
    /// Resolution result per preference id, including partially-failed ones.
    pub prefs_by_id: BTreeMap<String, PrefResolution>,
    /// The option sets actually referenced while resolving this page — a
    /// subset of the library, copied so the manifest is self-contained.
    pub option_sets_by_id: BTreeMap<String, Vec<PrefOption>>,
    /// Accumulated soft errors in resolution order; empty on full success.
    pub errors: Vec<String>,
}

impl PagePrefsManifest {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Resolution result for a single preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefResolution {
    /// The declaration as written in the frontmatter.
    pub config: PrefDefinition,
    /// Default value in the all-defaults context. `None` when the
    /// preference failed to resolve for this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<String>,
    /// Default option id per resolved options-set id, one entry per
    /// combination whose substituted identifier names a real option set.
    pub default_values_by_options_set_id: BTreeMap<String, String>,
}

/// A successfully resolved preference, as seen by later preferences that
/// reference it: the values it can take and the one it starts on.
struct ResolvedRef {
    initial_value: String,
    option_ids: Vec<String>,
}

/// Resolve a page's preferences against the option-set library.
///
/// Processes `page_preferences` in declared order, maintaining a running
/// table of already-resolved preferences that later templates may
/// reference. Never fails; problems accumulate in `manifest.errors`.
pub fn build_page_prefs_manifest(
    frontmatter: &Frontmatter,
    pref_options_config: &PrefOptionsConfig,
) -> PagePrefsManifest {
    let mut manifest = PagePrefsManifest::default();
    // Keyed by upper-cased preference id — the token form. Only
    // successfully resolved preferences enter the table.
    let mut resolved: BTreeMap<String, ResolvedRef> = BTreeMap::new();

    for pref in frontmatter.preferences() {
        let (resolution, initial_key) =
            resolve_pref(pref, pref_options_config, &resolved, &mut manifest);

        if let Some(initial_value) = &resolution.initial_value {
            let option_ids = pref_options_config
                .get(&initial_key)
                .map(|set| set.iter().map(|opt| opt.id.clone()).collect())
                .unwrap_or_default();
            resolved.insert(
                pref.id.to_uppercase(),
                ResolvedRef {
                    initial_value: initial_value.clone(),
                    option_ids,
                },
            );
        }

        manifest.prefs_by_id.insert(pref.id.clone(), resolution);
    }

    manifest
}

/// Resolve one preference: expand combinations, look each up in the
/// library, compute the initial value. Appends soft errors to the manifest.
/// Also returns the all-defaults options-set key, which names the option
/// set later preferences draw candidate values from.
fn resolve_pref(
    pref: &PrefDefinition,
    library: &PrefOptionsConfig,
    resolved: &BTreeMap<String, ResolvedRef>,
    manifest: &mut PagePrefsManifest,
) -> (PrefResolution, String) {
    let tokens = find_tokens(&pref.options_source);

    // Every token must name an earlier, successfully resolved preference.
    // Report each bad token, then give up on this preference — it cannot
    // contribute values without its references.
    let mut all_tokens_resolved = true;
    for token in &tokens {
        if !resolved.contains_key(token) {
            manifest
                .errors
                .push(ResolutionError::InvalidPlaceholder(token.clone()).to_string());
            all_tokens_resolved = false;
        }
    }
    if !all_tokens_resolved {
        return (
            PrefResolution {
                config: pref.clone(),
                initial_value: None,
                default_values_by_options_set_id: BTreeMap::new(),
            },
            String::new(),
        );
    }

    // Candidate values per token, in token order. Zero tokens yields a
    // single empty combination: the literal options source.
    let lists_by_token: Vec<(String, Vec<String>)> = tokens
        .iter()
        .map(|token| (token.clone(), resolved[token].option_ids.clone()))
        .collect();

    let mut default_values = BTreeMap::new();
    for combination in cross_product(&lists_by_token) {
        let set_id = substitute(&pref.options_source, &combination);
        match library.get(&set_id) {
            Some(option_set) => {
                if let Some(default) = library.default_value(&set_id) {
                    default_values.insert(set_id.clone(), default.to_string());
                }
                // Repeated combinations overwrite with identical data.
                manifest
                    .option_sets_by_id
                    .insert(set_id, option_set.to_vec());
            }
            None => {
                manifest
                    .errors
                    .push(ResolutionError::InvalidOptionsSource(set_id).to_string());
            }
        }
    }

    // The all-defaults context: substitute each referenced preference's own
    // initial value. Absent from the map only when that specific
    // combination was just reported as an invalid options source, in which
    // case the preference is failed for this page.
    let initial_bindings: BTreeMap<String, String> = tokens
        .iter()
        .map(|token| (token.clone(), resolved[token].initial_value.clone()))
        .collect();
    let initial_key = substitute(&pref.options_source, &initial_bindings);
    let initial_value = default_values.get(&initial_key).cloned();

    (
        PrefResolution {
            config: pref.clone(),
            initial_value,
            default_values_by_options_set_id: default_values,
        },
        initial_key,
    )
}
