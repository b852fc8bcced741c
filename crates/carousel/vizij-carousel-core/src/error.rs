//! Error types for the carousel engine.
//!
//! Ordinary interaction never produces an error: invalid navigation is a
//! silent no-op. Errors surface only from configuration parsing and from
//! transition runners, where the controller recovers on its own.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CarouselError {
    #[error("invalid config field {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("config json parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Failure reported by a `TransitionRunner::run` call.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("transition distance must be finite, got {distance}")]
    InvalidDistance { distance: f32 },

    #[error("transition runner failed: {message}")]
    Runner { message: String },
}

impl TransitionError {
    pub fn runner(message: impl Into<String>) -> Self {
        Self::Runner {
            message: message.into(),
        }
    }
}
