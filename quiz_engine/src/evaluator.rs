//! Answer Evaluator - checks an answer and moves the score.

use company_registry::CompanyId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::QuizError;
use crate::session::Session;

/// Outcome of one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub correct: bool,
    pub new_score: i64,
    /// True only on the answer that first lifts the score to the promo threshold.
    pub reward_just_unlocked: bool,
    pub chosen_company: CompanyId,
    pub correct_company: CompanyId,
}

/// Evaluate `chosen` against the session's active question.
///
/// A correct answer scores +1 and a wrong one -1, without any floor. The
/// active question is consumed either way. Fails with
/// [`QuizError::NoActiveQuestion`] and leaves the session untouched if nothing
/// is pending.
pub fn submit_answer(
    session: &mut Session,
    chosen: CompanyId,
    promo_threshold: i64,
) -> Result<EvaluationResult, QuizError> {
    let question = session
        .take_active_question()
        .ok_or(QuizError::NoActiveQuestion)?;

    let correct = chosen == question.correct_company;
    let new_score = if correct {
        session.score() + 1
    } else {
        session.score() - 1
    };
    let reward_just_unlocked = !session.reward_unlocked() && new_score >= promo_threshold;

    let result = EvaluationResult {
        correct,
        new_score,
        reward_just_unlocked,
        chosen_company: chosen,
        correct_company: question.correct_company,
    };
    session.record_evaluation(result);

    debug!(
        attribute = %question.attribute,
        correct,
        score = new_score,
        "answer evaluated"
    );
    if reward_just_unlocked {
        info!(score = new_score, threshold = promo_threshold, "reward unlocked");
    }

    Ok(result)
}
