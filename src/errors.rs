use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Budget config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("{pattern} exceeded its evaluation budget of {budget:?}")]
    Timeout {
        pattern: &'static str,
        budget: Duration,
    },
}
