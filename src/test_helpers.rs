//! Shared test fixtures for the mdoc-prefs test suite.
//!
//! The canonical fixture is the "paint colors" page: two plain preferences
//! (`color`, `finish`) and one templated preference (`paint`) whose options
//! source expands across all six finish/color combinations. Provided both
//! as in-memory values (for resolver tests) and as an on-disk language
//! directory (for loader and end-to-end tests).

use std::fs;
use std::path::Path;

use crate::frontmatter::{Frontmatter, PrefDefinition};
use crate::options::{PrefOption, PrefOptionsConfig};

/// Shorthand for a preference declaration.
pub fn pref(id: &str, display_name: &str, options_source: &str) -> PrefDefinition {
    PrefDefinition {
        id: id.to_string(),
        display_name: display_name.to_string(),
        options_source: options_source.to_string(),
    }
}

/// Shorthand for an option record.
pub fn opt(id: &str, display_name: &str, default: bool) -> PrefOption {
    PrefOption {
        id: id.to_string(),
        display_name: display_name.to_string(),
        default,
    }
}

/// Frontmatter declaring `color`, `finish`, and the templated `paint`.
pub fn paint_colors_frontmatter() -> Frontmatter {
    Frontmatter {
        title: Some("Paint your house".to_string()),
        page_preferences: Some(vec![
            pref("color", "Color", "color_options"),
            pref("finish", "Finish", "finish_options"),
            pref("paint", "Paint color", "<FINISH>_<COLOR>_paint_options"),
        ]),
    }
}

/// The full paint-colors option-set library: two base sets plus one set
/// per finish/color combination.
pub fn paint_colors_config() -> PrefOptionsConfig {
    PrefOptionsConfig::from_sets([
        (
            "color_options",
            vec![opt("blue", "Blue", true), opt("red", "Red", false)],
        ),
        (
            "finish_options",
            vec![
                opt("matte", "Matte", false),
                opt("eggshell", "Eggshell", true),
                opt("gloss", "Gloss", false),
            ],
        ),
        (
            "matte_blue_paint_options",
            vec![opt("powder_blue", "Powder Blue", true)],
        ),
        (
            "matte_red_paint_options",
            vec![opt("brick", "Brick", true), opt("scarlet", "Scarlet", false)],
        ),
        (
            "eggshell_blue_paint_options",
            vec![
                opt("elegant_royal", "Elegant Royal", true),
                opt("robins_egg", "Robin's Egg", false),
            ],
        ),
        (
            "eggshell_red_paint_options",
            vec![opt("rose", "Rose", true), opt("ruby", "Ruby", false)],
        ),
        (
            "gloss_blue_paint_options",
            vec![opt("sky_blue", "Sky Blue", true), opt("navy", "Navy", false)],
        ),
        (
            "gloss_red_paint_options",
            vec![
                opt("fire_engine", "Fire Engine", true),
                opt("crimson", "Crimson", false),
            ],
        ),
    ])
}

/// Write the paint-colors library as a valid on-disk language directory:
/// `allowlists/{color,finish,paint}.yaml` + `options/{color,finish,paint}.yaml`.
pub fn write_paint_colors_lang_dir(dir: &Path) {
    let allowlists = dir.join("allowlists");
    let options = dir.join("options");
    fs::create_dir_all(&allowlists).unwrap();
    fs::create_dir_all(&options).unwrap();

    fs::write(allowlists.join("color.yaml"), "- blue\n- red\n").unwrap();
    fs::write(
        allowlists.join("finish.yaml"),
        "- matte\n- eggshell\n- gloss\n",
    )
    .unwrap();
    fs::write(
        allowlists.join("paint.yaml"),
        "- powder_blue\n- brick\n- scarlet\n- elegant_royal\n- robins_egg\n- rose\n- ruby\n- sky_blue\n- navy\n- fire_engine\n- crimson\n",
    )
    .unwrap();

    fs::write(
        options.join("color.yaml"),
        "\
color_options:
  - id: blue
    display_name: Blue
    default: true
  - id: red
    display_name: Red
",
    )
    .unwrap();
    fs::write(
        options.join("finish.yaml"),
        "\
finish_options:
  - id: matte
    display_name: Matte
  - id: eggshell
    display_name: Eggshell
    default: true
  - id: gloss
    display_name: Gloss
",
    )
    .unwrap();
    fs::write(
        options.join("paint.yaml"),
        "\
matte_blue_paint_options:
  - id: powder_blue
    display_name: Powder Blue
    default: true
matte_red_paint_options:
  - id: brick
    display_name: Brick
    default: true
  - id: scarlet
    display_name: Scarlet
eggshell_blue_paint_options:
  - id: elegant_royal
    display_name: Elegant Royal
    default: true
  - id: robins_egg
    display_name: Robin's Egg
eggshell_red_paint_options:
  - id: rose
    display_name: Rose
    default: true
  - id: ruby
    display_name: Ruby
gloss_blue_paint_options:
  - id: sky_blue
    display_name: Sky Blue
    default: true
  - id: navy
    display_name: Navy
gloss_red_paint_options:
  - id: fire_engine
    display_name: Fire Engine
    default: true
  - id: crimson
    display_name: Crimson
",
    )
    .unwrap();
}

/// Write a `.mdoc` content file with the given frontmatter YAML body.
pub fn write_mdoc(path: &Path, frontmatter_yaml: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        path,
        format!("---\n{frontmatter_yaml}---\n\nDocument body.\n"),
    )
    .unwrap();
}

/// Frontmatter YAML for the paint-colors page, as written in a content file.
pub fn paint_colors_frontmatter_yaml() -> &'static str {
    "\
title: Paint your house
page_preferences:
  - id: color
    display_name: Color
    options_source: color_options
  - id: finish
    display_name: Finish
    options_source: finish_options
  - id: paint
    display_name: Paint color
    options_source: <FINISH>_<COLOR>_paint_options
"
}
