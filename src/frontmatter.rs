//! YAML frontmatter extraction from `.mdoc` content files.
//!
//! Content files open with a `---`-delimited YAML block:
//!
//! ```text
//! ---
//! title: Paint your house
//! page_preferences:
//!   - id: color
//!     display_name: Color
//!     options_source: color_options
//! ---
//!
//! Document body...
//! ```
//!
//! Only the fields this tool cares about are deserialized; everything else
//! in the block belongs to other tooling (Hugo, the renderer) and is
//! ignored. Declaration order of `page_preferences` is load-bearing — a
//! preference may only reference preferences declared before it — so the
//! list is kept in document order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("missing frontmatter (expected a leading '---' delimited YAML block)")]
    MissingDelimiters,
    #[error("YAML parse error in frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One author-declared page preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefDefinition {
    /// Preference id; its upper-cased form is the placeholder token other
    /// preferences use to reference it.
    pub id: String,
    /// Human-readable label shown in the preference picker.
    pub display_name: String,
    /// Options-set id, possibly templated with `<TOKEN>` placeholders.
    pub options_source: String,
}

/// The frontmatter fields this tool consumes. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordered preference declarations; `None` when the page has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_preferences: Option<Vec<PrefDefinition>>,
}

impl Frontmatter {
    /// The declared preferences in document order, empty if absent.
    pub fn preferences(&self) -> &[PrefDefinition] {
        self.page_preferences.as_deref().unwrap_or_default()
    }
}

/// Extract and parse the frontmatter block from file contents.
///
/// The file must begin with a `---` line; the block ends at the next `---`
/// line. An empty block yields the default (empty) frontmatter.
pub fn parse_frontmatter(contents: &str) -> Result<Frontmatter, FrontmatterError> {
    let mut lines = contents.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return Err(FrontmatterError::MissingDelimiters);
    }

    let mut yaml = String::new();
    for line in lines {
        if line.trim_end() == "---" {
            if yaml.trim().is_empty() {
                return Ok(Frontmatter::default());
            }
            return Ok(serde_yaml::from_str(&yaml)?);
        }
        yaml.push_str(line);
        yaml.push('\n');
    }

    // Opening delimiter without a closing one
    Err(FrontmatterError::MissingDelimiters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_preferences() {
        let fm = parse_frontmatter(
            "---\ntitle: My Page\npage_preferences:\n  - id: color\n    display_name: Color\n    options_source: color_options\n---\n\nBody.\n",
        )
        .unwrap();

        assert_eq!(fm.title.as_deref(), Some("My Page"));
        assert_eq!(fm.preferences().len(), 1);
        assert_eq!(fm.preferences()[0].id, "color");
        assert_eq!(fm.preferences()[0].options_source, "color_options");
    }

    #[test]
    fn preserves_declaration_order() {
        let fm = parse_frontmatter(
            "---\npage_preferences:\n  - id: b\n    display_name: B\n    options_source: b_options\n  - id: a\n    display_name: A\n    options_source: a_options\n---\n",
        )
        .unwrap();

        let ids: Vec<&str> = fm.preferences().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let fm = parse_frontmatter(
            "---\ntitle: Page\ndraft: true\naliases:\n  - /old-url\n---\n",
        )
        .unwrap();
        assert_eq!(fm.title.as_deref(), Some("Page"));
        assert!(fm.page_preferences.is_none());
    }

    #[test]
    fn empty_block_is_default() {
        let fm = parse_frontmatter("---\n---\nBody.\n").unwrap();
        assert_eq!(fm, Frontmatter::default());
    }

    #[test]
    fn missing_opening_delimiter_is_error() {
        let result = parse_frontmatter("# Just markdown\n");
        assert!(matches!(result, Err(FrontmatterError::MissingDelimiters)));
    }

    #[test]
    fn unclosed_block_is_error() {
        let result = parse_frontmatter("---\ntitle: Page\n");
        assert!(matches!(result, Err(FrontmatterError::MissingDelimiters)));
    }

    #[test]
    fn invalid_yaml_is_error() {
        let result = parse_frontmatter("---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn body_dashes_do_not_confuse_the_parser() {
        let fm = parse_frontmatter("---\ntitle: Page\n---\n\nSome text\n\n---\n\nMore text\n")
            .unwrap();
        assert_eq!(fm.title.as_deref(), Some("Page"));
    }
}
