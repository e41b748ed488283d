//! # Comparison
//!
//! Sends one prompt to up to [MAX_COMPARED_MODELS] models, strictly one after another and in the order given.
//! A model that cannot be resolved or fails to generate is recorded and the round moves on.
//!
//! When differences are requested, the first two successful responses are diffed. Other pairs are ignored.

use std::fmt;
use std::fmt::Formatter;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

use crate::models::resolver::ModelResolver;
use crate::models::GenerationError;
use crate::prompt::errors::TemplateError;
use crate::safety::errors::InputRejected;
use crate::safety::Filtered;
use crate::utils::diff::{unified_diff, word_diff};
use crate::utils::timing::timed;
use crate::utils::token::exceeds_token_warning;

/// Most models compared in one round.
pub const MAX_COMPARED_MODELS: usize = 3;

/// Unchanged lines kept around each hunk of a response diff.
pub const DIFF_CONTEXT_LINES: usize = 3;

/// Error when a comparison round cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("select at least one model")]
    NoModels,
    #[error("select at most {max} models, got {count}")]
    TooManyModels { count: usize, max: usize },
    #[error(transparent)]
    InvalidTemplate(#[from] TemplateError),
    #[error(transparent)]
    InvalidInput(#[from] InputRejected),
}

/// One prompt for a list of models.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub models: Vec<String>,
    pub prompt: String,
    pub max_new_tokens: usize,
    pub highlight_differences: bool,
}

impl ComparisonRequest {
    pub fn new(models: impl IntoIterator<Item=impl Into<String>>, prompt: impl Into<String>) -> Self {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            prompt: prompt.into(),
            max_new_tokens: 100,
            highlight_differences: false,
        }
    }

    pub fn max_new_tokens(mut self, max_new_tokens: usize) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn highlight_differences(mut self, highlight: bool) -> Self {
        self.highlight_differences = highlight;
        self
    }
}

/// The outcome of sending the prompt to one model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[readonly::make]
pub struct ModelRun {
    pub model: String,
    pub response: Result<String, GenerationError>,
    /// Wall-clock time spent generating; zero when the model never ran
    pub elapsed: Duration,
    /// The response was redacted by output screening
    pub filtered: bool,
}

impl ModelRun {
    pub fn new(model: impl Into<String>, response: Result<String, GenerationError>, elapsed: Duration) -> Self {
        Self { model: model.into(), response, elapsed, filtered: false }
    }

    /// Record the outcome of a screened generation.
    pub fn screened(model: impl Into<String>, screened: Result<Filtered, GenerationError>, elapsed: Duration) -> Self {
        let filtered = screened.as_ref().map_or(false, |screened| screened.was_filtered);
        Self {
            model: model.into(),
            response: screened.map(|screened| screened.text),
            elapsed,
            filtered,
        }
    }

    #[inline]
    pub fn succeeded(&self) -> bool {
        self.response.is_ok()
    }

    /// The response, or the error message when generation failed.
    pub fn display_text(&self) -> String {
        match &self.response {
            Ok(text) => text.clone(),
            Err(e) => format!("❌ {}", e),
        }
    }
}

/// Result of highlighting differences between responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The first two successful responses differ.
    Changed {
        old_model: String,
        new_model: String,
        unified: String,
        words: String,
    },
    /// The first two successful responses have the same lines.
    Identical { old_model: String, new_model: String },
    /// Fewer than two models produced a response.
    NotEnoughResponses { successful: usize },
}

impl fmt::Display for DiffOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DiffOutcome::Changed { unified, .. } => f.write_str(unified),
            DiffOutcome::Identical { old_model, new_model } => {
                write!(f, "No differences found between the responses of {} and {}.", old_model, new_model)
            }
            DiffOutcome::NotEnoughResponses { successful } => {
                write!(f, "Need at least two successful responses to highlight differences, got {}.", successful)
            }
        }
    }
}

/// Diff the first two successful runs.
pub fn highlight_differences(runs: &[ModelRun]) -> DiffOutcome {
    let successful: Vec<(&str, &str)> = runs.iter()
        .filter_map(|run| run.response.as_ref().ok().map(|text| (run.model.as_str(), text.as_str())))
        .collect();
    let [(old_model, old_text), (new_model, new_text), ..] = successful.as_slice() else {
        return DiffOutcome::NotEnoughResponses { successful: successful.len() };
    };
    let unified = unified_diff(old_text, new_text, old_model, new_model, DIFF_CONTEXT_LINES);
    if unified.is_empty() {
        DiffOutcome::Identical { old_model: old_model.to_string(), new_model: new_model.to_string() }
    } else {
        DiffOutcome::Changed {
            old_model: old_model.to_string(),
            new_model: new_model.to_string(),
            unified,
            words: word_diff(old_text, new_text),
        }
    }
}

/// Every run of one comparison round, in request order.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub prompt: String,
    pub runs: Vec<ModelRun>,
    /// `None` unless differences were requested
    pub difference: Option<DiffOutcome>,
    /// The prompt is estimated above [TOKEN_WARNING_THRESHOLD](crate::utils::token::TOKEN_WARNING_THRESHOLD)
    pub token_warning: bool,
}

impl Comparison {
    /// The first run of `model`.
    pub fn get(&self, model: &str) -> Option<&ModelRun> {
        self.runs.iter().find(|run| run.model == model)
    }

    pub fn successful(&self) -> impl Iterator<Item=&ModelRun> {
        self.runs.iter().filter(|run| run.succeeded())
    }

    pub fn filtered(&self) -> impl Iterator<Item=&ModelRun> {
        self.runs.iter().filter(|run| run.filtered)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.runs.iter().map(|run| run.elapsed).sum()
    }
}

/// Run one comparison round.
pub fn compare_models(resolver: &mut ModelResolver, request: &ComparisonRequest) -> Result<Comparison, CompareError> {
    if request.models.is_empty() {
        return Err(CompareError::NoModels);
    }
    if request.models.len() > MAX_COMPARED_MODELS {
        return Err(CompareError::TooManyModels { count: request.models.len(), max: MAX_COMPARED_MODELS });
    }

    let token_warning = exceeds_token_warning(&request.prompt);
    if token_warning {
        warn!("prompt is long for small models, responses may be cut or degraded");
    }

    let mut runs = Vec::with_capacity(request.models.len());
    for model in &request.models {
        let run = match resolver.resolve(model) {
            Some(kind) => {
                let (response, elapsed) = timed(|| kind.run_screened(&request.prompt, request.max_new_tokens));
                debug!("{} answered in {:?}", model, elapsed);
                ModelRun::screened(model.as_str(), response, elapsed)
            }
            None => {
                warn!("skipping {}: model unavailable", model);
                ModelRun::new(
                    model.as_str(),
                    Err(GenerationError::ModelUnavailable { model: model.clone() }),
                    Duration::ZERO,
                )
            }
        };
        runs.push(run);
    }

    let difference = request.highlight_differences.then(|| highlight_differences(&runs));
    Ok(Comparison {
        prompt: request.prompt.clone(),
        runs,
        difference,
        token_warning,
    })
}
