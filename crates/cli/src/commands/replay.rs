//! Replay command
//!
//! Usage: transback replay <STREAM_FILE> --original <FILE> [--chunk-size N] [--output <FILE>]
//!
//! Feeds a captured event stream through the incremental parser in fixed-size
//! chunks, the way it would arrive over the network.

use anyhow::{ensure, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;
use transback_core::view::{Flow, Step};
use transback_core::{EventStreamParser, HighlightEngine, PresentationController};

use super::{read_text, write_output};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Captured event stream
    pub stream: PathBuf,

    /// File holding the submitted original text
    #[arg(long)]
    pub original: PathBuf,

    /// Bytes handed to the parser at a time
    #[arg(long, default_value_t = 64)]
    pub chunk_size: usize,

    /// Write the final view as JSON (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute replay command
pub fn execute(args: ReplayArgs) -> Result<()> {
    ensure!(args.chunk_size > 0, "--chunk-size must be at least 1");

    let original = read_text(&args.original)?;
    let stream = std::fs::read(&args.stream)
        .with_context(|| format!("Failed to read {}", args.stream.display()))?;

    let mut parser = EventStreamParser::new();
    let mut controller = PresentationController::new(original, HighlightEngine::default());

    'chunks: for chunk in stream.chunks(args.chunk_size) {
        for event in parser.feed(chunk) {
            debug!(event = event.name(), pending = parser.pending(), "replayed event");
            if controller.apply(event) == Flow::Finished {
                break 'chunks;
            }
        }
    }

    let discarded = parser.discarded();
    if !controller.is_finished() {
        if let Some(event) = parser.finish() {
            controller.apply(event);
        }
    }

    let view = controller.into_view();
    for step in Step::ALL {
        println!("{:<15} {}", step, view.status(step));
    }
    if discarded > 0 {
        println!("{} malformed block(s) skipped", discarded);
    }
    if let Some(error) = &view.error {
        println!("error: {}", error);
    }

    let mut json = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
    json.push('\n');
    write_output(args.output.as_deref(), &json)
}
