//! Errors raised by the quiz engine.

use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can go wrong while generating or answering a question.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Registry lookup with an identifier nobody registered.
    #[error("unknown attribute type '{0}'")]
    UnknownType(String),

    /// Every registered attribute type is on cooldown.
    #[error("every attribute type is on cooldown")]
    NoEligibleType,

    /// No eligible attribute type produced a fair pair of companies.
    #[error("no fair company pair found after trying {tried} attribute types")]
    NoQualifyingPair { tried: usize },

    /// An answer was submitted while no question was pending.
    #[error("no active question to answer")]
    NoActiveQuestion,

    /// A generated question broke its own guarantees. This is a bug.
    #[error("question invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QuizError {
    /// Data or cooldown exhaustion; the caller can relax cooldowns or tell the
    /// player there is not enough data, instead of failing hard.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::NoEligibleType | QuizError::NoQualifyingPair { .. }
        )
    }
}
