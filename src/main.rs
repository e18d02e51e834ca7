use clap::{Parser, Subcommand};
use mdoc_prefs::{check, config, options, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdoc-prefs")]
#[command(about = "Validate page preferences in Markdoc-flavored Hugo content")]
#[command(long_about = "\
Validate page preferences in Markdoc-flavored Hugo content

Content authors declare page preferences in the frontmatter of .mdoc files;
this tool resolves every preference against the per-language option-set
library and reports every invalid placeholder or options source, grouped by
file.

Project structure:

  project/
  ├── config.toml                  # Tool config (optional)
  ├── content/
  │   └── en/
  │       └── guides/paint.mdoc    # Frontmatter declares page_preferences
  └── prefs/
      └── en/
          ├── allowlists/          # Permitted option ids per preference type
          │   └── color.yaml
          └── options/             # Option sets per preference type
              └── color.yaml

Run 'mdoc-prefs gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project directory (holds config.toml, content/, prefs/)
    #[arg(long, default_value = ".", global = true)]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every content file's preferences against the option library
    Check,
    /// Print one file's resolved preference manifest as JSON
    Manifest {
        /// Content file to resolve
        file: PathBuf,
        /// Language whose option library to resolve against
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            let site = config::load_config(&cli.project_dir)?;
            init_thread_pool(&site.processing);

            let mut any_errors = false;
            for lang in &site.languages {
                let library = load_library(&cli.project_dir, &site, lang)?;
                let content_dir = cli.project_dir.join(&site.content_dir).join(lang);
                let report = check::check_content_dir(&content_dir, &library)?;
                output::print_check_output(&report, &content_dir, lang);
                any_errors |= report.has_errors();
            }

            if any_errors {
                std::process::exit(1);
            }
        }
        Command::Manifest { file, lang } => {
            let site = config::load_config(&cli.project_dir)?;
            let library = load_library(&cli.project_dir, &site, &lang)?;
            let manifest = check::build_manifest_for_file(&file, &library)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load one language's option-set library: allowlists first, then the
/// per-type option files validated against them. Any failure here is fatal.
fn load_library(
    project_dir: &std::path::Path,
    site: &config::SiteConfig,
    lang: &str,
) -> Result<options::PrefOptionsConfig, options::LoadError> {
    let lang_dir = project_dir.join(&site.prefs_dir).join(lang);
    let allowlists = options::load_allowlists_from_lang_dir(&lang_dir)?;
    options::load_prefs_config_from_lang_dir(&lang_dir, &allowlists)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
