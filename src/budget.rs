//! Evaluation-time ceilings for the segment and symbol scanners.
//!
//! Both scanners are linear, so the ceilings only matter for very large
//! inputs. When one is exhausted the caller-facing predicates fail closed.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{Error, MatchError};

pub const FUNCTION_PARAMETERS_PATTERN: &str = "function parameters";
pub const SYMBOL_CLEANUP_PATTERN: &str = "symbol cleanup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchBudget {
    pub function_parameters_ms: u64,
    pub symbol_cleanup_ms: u64,
}

impl Default for MatchBudget {
    fn default() -> Self {
        Self {
            function_parameters_ms: 200,
            symbol_cleanup_ms: 5_000,
        }
    }
}

impl MatchBudget {
    /// A budget that is exhausted before any work is done.
    pub fn exhausted() -> Self {
        Self {
            function_parameters_ms: 0,
            symbol_cleanup_ms: 0,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn function_parameters(&self) -> Duration {
        Duration::from_millis(self.function_parameters_ms)
    }

    pub fn symbol_cleanup(&self) -> Duration {
        Duration::from_millis(self.symbol_cleanup_ms)
    }

    pub(crate) fn function_parameters_deadline(&self) -> Deadline {
        Deadline::start(FUNCTION_PARAMETERS_PATTERN, self.function_parameters())
    }

    pub(crate) fn symbol_cleanup_deadline(&self) -> Deadline {
        Deadline::start(SYMBOL_CLEANUP_PATTERN, self.symbol_cleanup())
    }
}

/// Per-call deadline. Never shared between calls.
#[derive(Debug)]
pub(crate) struct Deadline {
    pattern: &'static str,
    started: Instant,
    budget: Duration,
}

impl Deadline {
    fn start(pattern: &'static str, budget: Duration) -> Self {
        Self {
            pattern,
            started: Instant::now(),
            budget,
        }
    }

    pub(crate) fn check(&self) -> Result<(), MatchError> {
        if self.started.elapsed() >= self.budget {
            return Err(MatchError::Timeout {
                pattern: self.pattern,
                budget: self.budget,
            });
        }
        Ok(())
    }
}
