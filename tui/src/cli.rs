//! CLI argument definitions for the Ladle tag picker demo.

use clap::Parser;
use clap::ValueHint;
use std::path::PathBuf;

/// CLI arguments for launching the tag picker.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Path to a JSON tag catalog. Defaults to a small built-in catalog.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Maximum number of tags that can be selected; picks past the cap are
    /// ignored.
    #[arg(long, value_name = "N")]
    pub max_tags: Option<usize>,

    /// Show one flat list instead of grouping tags by category.
    #[arg(long, default_value_t = false)]
    pub flat: bool,

    /// Hide the search box; the list can still be browsed with the arrow keys.
    #[arg(long, default_value_t = false)]
    pub no_search: bool,

    /// Artificial delay applied to catalog loads, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 400)]
    pub load_delay_ms: u64,

    /// Start with tag editing disabled; the widget renders its state but
    /// ignores input.
    #[arg(long, default_value_t = false)]
    pub disabled: bool,

    /// Extra line of error text rendered verbatim beneath the widget.
    #[arg(long, value_name = "TEXT")]
    pub error_text: Option<String>,

    /// File that receives the log output while the terminal UI is active.
    #[arg(long, value_name = "FILE", default_value = "ladle-tui.log")]
    pub log_file: PathBuf,
}
