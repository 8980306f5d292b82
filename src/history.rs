//! Generation history
//!
//! Keeps the most recent generation summaries plus the all-time best
//! progress score. Display only; nothing here feeds back into evolution.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::GenerationSummary;

/// Maximum number of summaries to keep
pub const MAX_HISTORY: usize = 256;

/// Rolling log of generation summaries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct History {
    entries: VecDeque<GenerationSummary>,
    best: Option<GenerationSummary>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_HISTORY),
            best: None,
        }
    }

    /// Record a summary. Returns true if it set a new best progress score.
    pub fn record(&mut self, summary: GenerationSummary) -> bool {
        self.entries.push_back(summary);
        if self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }

        let improved = self.best.is_none_or(|b| summary.progress > b.progress);
        if improved {
            self.best = Some(summary);
        }
        improved
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&GenerationSummary> {
        self.entries.back()
    }

    /// Summary with the highest progress ever recorded
    pub fn best(&self) -> Option<&GenerationSummary> {
        self.best.as_ref()
    }

    /// All-time best progress score (0 before any generation)
    pub fn best_progress(&self) -> u32 {
        self.best.map(|b| b.progress).unwrap_or(0)
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &GenerationSummary> {
        self.entries.iter()
    }
}
