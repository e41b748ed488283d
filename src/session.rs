//! # Session
//!
//! One user's context: the model cache, the run settings and the last few comparison rounds.
//! Every interaction goes through [Session::interact]; nothing is kept anywhere else.

use std::collections::VecDeque;

use log::debug;

use crate::compare::{compare_models, CompareError, Comparison, ComparisonRequest};
use crate::models::resolver::ModelResolver;
use crate::prompt::PromptTemplate;
use crate::safety::{validate_input, wrap_safe};

/// Most comparison rounds kept in a session.
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_new_tokens: usize,
    pub highlight_differences: bool,
    /// Wrap the formatted prompt in the safe assistant preamble before sending it
    pub apply_safe_wrapper: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            highlight_differences: false,
            apply_safe_wrapper: false,
        }
    }
}

#[derive(Debug, Clone)]
#[readonly::make]
pub struct HistoryEntry {
    pub template: String,
    pub user_input: String,
    pub comparison: Comparison,
}

pub struct Session {
    pub config: SessionConfig,
    resolver: ModelResolver,
    history: VecDeque<HistoryEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ModelResolver::default(), SessionConfig::default())
    }
}

impl Session {
    pub fn new(resolver: ModelResolver, config: SessionConfig) -> Self {
        Self {
            config,
            resolver,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Validate, format and compare, then record the round.
    ///
    /// Nothing is recorded when validation fails.
    pub fn interact(&mut self,
                    template: &PromptTemplate,
                    user_input: &str,
                    models: &[&str]) -> Result<Comparison, CompareError> {
        template.validate()?;
        validate_input(user_input)?;
        let formatted = template.format(user_input);
        let prompt = if self.config.apply_safe_wrapper {
            wrap_safe(&formatted)
        } else {
            formatted
        };
        let request = ComparisonRequest::new(models.iter().copied(), prompt)
            .max_new_tokens(self.config.max_new_tokens)
            .highlight_differences(self.config.highlight_differences);
        let comparison = compare_models(&mut self.resolver, &request)?;
        self.push_history(HistoryEntry {
            template: template.str().to_string(),
            user_input: user_input.to_string(),
            comparison: comparison.clone(),
        });
        Ok(comparison)
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
            debug!("session history full, dropped the oldest round");
        }
        self.history.push_back(entry);
    }

    /// Recorded rounds, oldest first.
    pub fn history(&self) -> impl Iterator<Item=&HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_comparison(&self) -> Option<&Comparison> {
        self.history.back().map(|entry| &entry.comparison)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }
}
