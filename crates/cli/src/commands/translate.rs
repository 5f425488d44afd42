//! Translate command
//!
//! Usage: transback translate <INPUT> <OUTPUT> [--source en] [--target af] [--back-file back.txt]
//! [--review-file review.txt] [--diff-file <FILE>]

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;
use transback_core::prompts::PromptSet;
use transback_core::round_trip::DEFAULT_MAX_INPUT_CHARS;
use transback_core::{
    ClientConfig, Flow, HighlightConfig, HighlightEngine, OpenRouterClient,
    PresentationController, RoundTripRequest, RoundTripRunner, StreamEvent, TranslationService,
};

use super::{read_text, render_page, write_output};

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Text file to translate
    pub input: PathBuf,

    /// Where the translation is written
    pub output: PathBuf,

    /// Language of the input
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Language to translate into
    #[arg(long, default_value = "af")]
    pub target: String,

    /// Model identifier
    #[arg(long, env = "OPENROUTER_MODEL")]
    pub model: Option<String>,

    /// Sent as HTTP-Referer
    #[arg(long, env = "OPENROUTER_APP_URL")]
    pub app_url: Option<String>,

    /// Sent as X-Title
    #[arg(long, env = "OPENROUTER_APP_TITLE")]
    pub app_title: Option<String>,

    /// Directory with prompt overrides
    #[arg(long)]
    pub prompts: Option<PathBuf>,

    /// Where the back-translation is written
    #[arg(long, default_value = "back.txt")]
    pub back_file: PathBuf,

    /// Where the review is written
    #[arg(long, default_value = "review.txt")]
    pub review_file: PathBuf,

    /// Also write the highlighted page here
    #[arg(long)]
    pub diff_file: Option<PathBuf>,

    /// Longest accepted input, in characters
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_CHARS)]
    pub max_chars: usize,
}

/// Execute translate command
pub async fn execute(args: TranslateArgs) -> Result<()> {
    let text = read_text(&args.input)?;

    let mut config = ClientConfig::from_env()
        .context("Set OPENROUTER_API_KEY in the environment or a .env file")?
        .with_app_url(args.app_url.clone())
        .with_app_title(args.app_title.clone());
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    if let Some(dir) = &args.prompts {
        let prompts = PromptSet::load_dir(dir)
            .with_context(|| format!("Failed to load prompts from {}", dir.display()))?;
        config = config.with_prompts(prompts);
    }

    info!(model = %config.model, source = %args.source, target = %args.target, "starting round trip");

    let client = OpenRouterClient::new(config).context("Failed to build HTTP client")?;
    let runner = RoundTripRunner::new(client).with_max_input_chars(args.max_chars);
    let request = RoundTripRequest::new(text.clone()).with_languages(&args.source, &args.target);

    let highlight_config = HighlightConfig::default();
    let mut controller =
        PresentationController::new(text, HighlightEngine::new(highlight_config.clone()));

    let files = OutputFiles {
        translated: &args.output,
        back_translated: &args.back_file,
        review: &args.review_file,
    };
    drive(runner, request, &files, &mut controller).await?;

    if let Some(pair) = &controller.view().highlight {
        println!("{}", pair.summary());
        if let Some(path) = &args.diff_file {
            write_output(Some(path.as_path()), &render_page(pair, &highlight_config))?;
        }
    }

    Ok(())
}

/// Where each step's result goes
struct OutputFiles<'a> {
    translated: &'a Path,
    back_translated: &'a Path,
    review: &'a Path,
}

/// Run the round trip, writing each result as soon as its step finishes so
/// a later failure keeps the earlier files.
async fn drive<S: TranslationService + 'static>(
    runner: RoundTripRunner<S>,
    request: RoundTripRequest,
    files: &OutputFiles<'_>,
    controller: &mut PresentationController,
) -> Result<()> {
    let (mut events, handle) = runner.spawn(request);

    while let Some(event) = events.recv().await {
        match &event {
            StreamEvent::Translated(text) => {
                println!("✓ Translated");
                write_output(Some(files.translated), text)?;
            }
            StreamEvent::BackTranslated(text) => {
                println!("✓ Back-translated");
                write_output(Some(files.back_translated), text)?;
            }
            StreamEvent::Review(text) => {
                println!("✓ Reviewed");
                write_output(Some(files.review), text)?;
            }
            // reported once the task result is in
            StreamEvent::Error(_) | StreamEvent::Complete => {}
        }

        if controller.apply(event) == Flow::Finished {
            break;
        }
    }

    handle.await.context("Round trip task failed")??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;
    use transback_core::TransbackError;

    /// Tags its input with the target language; the review call fails
    struct FailingReview;

    #[async_trait]
    impl TranslationService for FailingReview {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            target: &str,
        ) -> transback_core::Result<String> {
            Ok(format!("{text} [{target}]"))
        }

        async fn compare_meanings(
            &self,
            _original: &str,
            _back_translated: &str,
            _language: &str,
        ) -> transback_core::Result<String> {
            Err(TransbackError::Api {
                status: 500,
                body: "upstream down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_finished_steps_survive_a_later_failure() {
        let temp_dir = TempDir::new().unwrap();
        let translated = temp_dir.path().join("out.txt");
        let back_translated = temp_dir.path().join("back.txt");
        let review = temp_dir.path().join("review.txt");
        let files = OutputFiles {
            translated: &translated,
            back_translated: &back_translated,
            review: &review,
        };
        let mut controller = PresentationController::new("hello", HighlightEngine::default());

        let result = drive(
            RoundTripRunner::new(FailingReview),
            RoundTripRequest::new("hello").with_languages("en", "af"),
            &files,
            &mut controller,
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("upstream down"));
        assert_eq!(std::fs::read_to_string(&translated).unwrap(), "hello [af]");
        assert_eq!(
            std::fs::read_to_string(&back_translated).unwrap(),
            "hello [af] [en]"
        );
        assert!(!review.exists());
        assert_eq!(
            controller.view().error.as_deref(),
            Some("Translation API returned 500: upstream down")
        );
    }
}
