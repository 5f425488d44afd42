//! Diff command
//!
//! Usage: transback diff <ORIGINAL_FILE> <BACK_FILE> [--format html|json] [--output <FILE>]

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use transback_core::{HighlightConfig, HighlightEngine};

use super::{read_text, render_page, write_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// Serialized highlight pair with statistics
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// File holding the original text
    pub original: PathBuf,

    /// File holding the back-translated text
    pub back_translated: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<()> {
    let original = read_text(&args.original)?;
    let back_translated = read_text(&args.back_translated)?;

    let config = HighlightConfig::default();
    let engine = HighlightEngine::new(config.clone());
    let pair = engine.highlight_differences(&original, &back_translated);

    let content = match args.format {
        OutputFormat::Html => render_page(&pair, &config),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&pair).context("Failed to serialize highlight")?;
            json.push('\n');
            json
        }
    };

    write_output(args.output.as_deref(), &content)?;

    if args.output.is_some() {
        println!("{}", pair.summary());
    }

    Ok(())
}
