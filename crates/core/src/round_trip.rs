//! Translate, back-translate and review in one ordered run
//!
//! Each finished step is reported on a channel as a [`StreamEvent`], so a
//! consumer can update its view while the next remote call is in flight.
//! The sequence is always `translated`, `back_translated`, `review`,
//! `complete`, or cut short by a single `error`.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::{Result, TransbackError};
use crate::stream::StreamEvent;
use crate::translator::TranslationService;

pub const DEFAULT_SOURCE: &str = "hu";
pub const DEFAULT_TARGET: &str = "en";
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000;

/// Channel capacity used by [`RoundTripRunner::spawn`]
const EVENT_BUFFER: usize = 8;

/// One submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTripRequest {
    pub text: String,

    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_target")]
    pub target: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

impl RoundTripRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: default_source(),
            target: default_target(),
        }
    }

    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source = source.into();
        self.target = target.into();
        self
    }
}

/// All three results of a finished round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTrip {
    pub translated: String,
    pub back_translated: String,
    pub review: String,
}

/// Runs round trips against a [`TranslationService`]
#[derive(Debug)]
pub struct RoundTripRunner<S> {
    service: S,
    max_input_chars: usize,
}

impl<S: TranslationService> RoundTripRunner<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, limit: usize) -> Self {
        self.max_input_chars = limit;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Reject empty or oversized input before any remote call is made.
    ///
    /// # Errors
    ///
    /// [`TransbackError::EmptyInput`] or [`TransbackError::InputTooLarge`].
    pub fn validate(&self, request: &RoundTripRequest) -> Result<()> {
        if request.text.trim().is_empty() {
            return Err(TransbackError::EmptyInput);
        }

        let actual = request.text.chars().count();
        if actual > self.max_input_chars {
            return Err(TransbackError::InputTooLarge {
                actual,
                limit: self.max_input_chars,
            });
        }

        Ok(())
    }

    /// Run all three steps, reporting progress on `events`.
    ///
    /// On failure one `error` event is sent (when the receiver is still
    /// listening) and the error is returned.
    ///
    /// # Errors
    ///
    /// Validation, service errors, or [`TransbackError::Cancelled`] when the
    /// receiver goes away mid-run.
    pub async fn run(
        &self,
        request: &RoundTripRequest,
        events: &mpsc::Sender<StreamEvent>,
    ) -> Result<RoundTrip> {
        info!(
            chars = request.text.chars().count(),
            source = %request.source,
            target = %request.target,
            "round trip requested"
        );

        match self.run_steps(request, events).await {
            Ok(round_trip) => {
                emit(events, StreamEvent::Complete).await?;
                info!("round trip completed successfully");
                Ok(round_trip)
            }
            Err(TransbackError::Cancelled) => Err(TransbackError::Cancelled),
            Err(err) => {
                if err.is_input_error() {
                    warn!(error = %err, "round trip rejected");
                } else {
                    error!(error = %err, "round trip failed");
                }
                // the receiver may already be gone; the error is returned either way
                let _ = events.send(StreamEvent::Error(err.to_string())).await;
                Err(err)
            }
        }
    }

    async fn run_steps(
        &self,
        request: &RoundTripRequest,
        events: &mpsc::Sender<StreamEvent>,
    ) -> Result<RoundTrip> {
        self.validate(request)?;

        info!("Step 1/3: Translating to target language");
        let translated = self
            .service
            .translate(&request.text, &request.source, &request.target)
            .await?;
        emit(events, StreamEvent::Translated(translated.clone())).await?;

        info!("Step 2/3: Back-translating to source language");
        let back_translated = self
            .service
            .translate(&translated, &request.target, &request.source)
            .await?;
        emit(events, StreamEvent::BackTranslated(back_translated.clone())).await?;

        info!("Step 3/3: Comparing meanings");
        let review = self
            .service
            .compare_meanings(&request.text, &back_translated, &request.source)
            .await?;
        emit(events, StreamEvent::Review(review.clone())).await?;

        Ok(RoundTrip {
            translated,
            back_translated,
            review,
        })
    }
}

impl<S: TranslationService + 'static> RoundTripRunner<S> {
    /// Run on a background task, returning the event receiver and the task.
    pub fn spawn(
        self,
        request: RoundTripRequest,
    ) -> (mpsc::Receiver<StreamEvent>, JoinHandle<Result<RoundTrip>>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let handle = tokio::spawn(async move { self.run(&request, &tx).await });
        (rx, handle)
    }
}

async fn emit(events: &mpsc::Sender<StreamEvent>, event: StreamEvent) -> Result<()> {
    events
        .send(event)
        .await
        .map_err(|_| TransbackError::Cancelled)
}
