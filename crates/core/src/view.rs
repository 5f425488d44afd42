//! Presentation state for one submission
//!
//! A [`PresentationController`] is created per submitted text and owns the
//! [`ViewState`] that status indicators and result panes are drawn from. It is
//! driven by [`StreamEvent`]s in arrival order and runs the highlight engine
//! when the back-translation arrives.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::diff::HighlightPair;
use crate::engine::HighlightEngine;
use crate::stream::StreamEvent;

/// A stage of the round trip with its own status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Translate,
    BackTranslate,
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Translate, Step::BackTranslate, Step::Review];

    fn next(self) -> Option<Step> {
        match self {
            Step::Translate => Some(Step::BackTranslate),
            Step::BackTranslate => Some(Step::Review),
            Step::Review => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Translate => "translate",
            Step::BackTranslate => "back-translate",
            Step::Review => "review",
        };
        f.pad(label)
    }
}

/// Status indicator of a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Idle,
    Working,
    Done,
    Failed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepStatus::Idle => "idle",
            StepStatus::Working => "working",
            StepStatus::Done => "done",
            StepStatus::Failed => "failed",
        };
        f.pad(label)
    }
}

/// Everything the presentation layer renders for one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub translate: StepStatus,
    pub back_translate: StepStatus,
    pub review: StepStatus,

    /// Text in the target language
    pub translated: Option<String>,

    /// Both highlighted directions, once the back-translation arrived
    pub highlight: Option<HighlightPair>,

    /// Model review of the round trip
    pub review_text: Option<String>,

    /// Error reported by the stream
    pub error: Option<String>,
}

impl ViewState {
    pub fn status(&self, step: Step) -> StepStatus {
        match step {
            Step::Translate => self.translate,
            Step::BackTranslate => self.back_translate,
            Step::Review => self.review,
        }
    }

    fn status_mut(&mut self, step: Step) -> &mut StepStatus {
        match step {
            Step::Translate => &mut self.translate,
            Step::BackTranslate => &mut self.back_translate,
            Step::Review => &mut self.review,
        }
    }

    /// Whether every step finished successfully
    pub fn is_complete(&self) -> bool {
        Step::ALL.iter().all(|step| self.status(*step) == StepStatus::Done)
    }
}

/// Whether more events are expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished,
}

/// Drives a [`ViewState`] from the event stream of one submission
#[derive(Debug)]
pub struct PresentationController {
    original: String,
    engine: HighlightEngine,
    view: ViewState,
    finished: bool,
}

impl PresentationController {
    /// Start tracking a submission of `original`; translation is in progress.
    pub fn new(original: impl Into<String>, engine: HighlightEngine) -> Self {
        Self {
            original: original.into(),
            engine,
            view: ViewState {
                translate: StepStatus::Working,
                ..Default::default()
            },
            finished: false,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn into_view(self) -> ViewState {
        self.view
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply one event. Events arriving after the stream finished are ignored.
    pub fn apply(&mut self, event: StreamEvent) -> Flow {
        if self.finished {
            warn!(event = event.name(), "ignoring event after end of stream");
            return Flow::Finished;
        }

        let terminal = event.is_terminal();
        match event {
            StreamEvent::Translated(text) => {
                self.view.translated = Some(text);
                self.complete_step(Step::Translate);
            }
            StreamEvent::BackTranslated(text) => {
                let pair = self.engine.highlight_differences(&self.original, &text);
                self.view.highlight = Some(pair);
                self.complete_step(Step::BackTranslate);
            }
            StreamEvent::Review(text) => {
                self.view.review_text = Some(text);
                self.complete_step(Step::Review);
            }
            StreamEvent::Error(message) => {
                for step in Step::ALL {
                    let status = self.view.status_mut(step);
                    if *status == StepStatus::Working {
                        *status = StepStatus::Failed;
                    }
                }
                warn!(error = %message, "round trip failed");
                self.view.error = Some(message);
            }
            StreamEvent::Complete => {
                info!(complete = self.view.is_complete(), "round trip stream ended");
            }
        }

        self.finished = terminal;
        if self.finished {
            Flow::Finished
        } else {
            Flow::Continue
        }
    }

    fn complete_step(&mut self, step: Step) {
        *self.view.status_mut(step) = StepStatus::Done;
        if let Some(next) = step.next() {
            let status = self.view.status_mut(next);
            if *status == StepStatus::Idle {
                *status = StepStatus::Working;
            }
        }
    }
}
