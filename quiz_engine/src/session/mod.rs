//! Session State - one player's score, cooldowns and pending question.

mod cooldown;

pub use cooldown::*;

use company_registry::{AttributeKind, CompanyId};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::evaluator::EvaluationResult;
use crate::question::Question;

/// Where a session is in the question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the next question to be generated.
    AwaitingSelection,
    /// A question is shown and waiting for an answer.
    QuestionActive,
}

/// State of a single player's game.
///
/// Sessions are never shared: each player owns one, and the engine only ever
/// borrows it for the duration of a single operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    score: i64,

    /// Attribute types used by the most recent questions.
    type_cooldown: RecencyWindow<AttributeKind>,

    /// Company pairs used by the most recent questions.
    company_cooldown: RecencyWindow<CompanyId>,

    /// Sticky once set; survives until [`Session::reset`].
    reward_unlocked: bool,

    active_question: Option<Question>,

    /// Outcome of the most recent answer, kept for feedback rendering.
    last_evaluation: Option<EvaluationResult>,

    questions_asked: u64,
}

impl Session {
    /// Start a fresh session with cooldown windows sized from `config`.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            type_cooldown: RecencyWindow::new(config.type_cooldown),
            company_cooldown: RecencyWindow::new(config.company_cooldown),
            reward_unlocked: false,
            active_question: None,
            last_evaluation: None,
            questions_asked: 0,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn reward_unlocked(&self) -> bool {
        self.reward_unlocked
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active_question.as_ref()
    }

    pub fn last_evaluation(&self) -> Option<&EvaluationResult> {
        self.last_evaluation.as_ref()
    }

    /// Number of questions generated since the session started or was reset.
    pub fn questions_asked(&self) -> u64 {
        self.questions_asked
    }

    pub fn phase(&self) -> SessionPhase {
        if self.active_question.is_some() {
            SessionPhase::QuestionActive
        } else {
            SessionPhase::AwaitingSelection
        }
    }

    pub fn type_cooldown(&self) -> &RecencyWindow<AttributeKind> {
        &self.type_cooldown
    }

    pub fn company_cooldown(&self) -> &RecencyWindow<CompanyId> {
        &self.company_cooldown
    }

    /// Check if an attribute type is still cooling down.
    pub fn is_type_cooling(&self, kind: AttributeKind) -> bool {
        self.type_cooldown.contains(&kind)
    }

    /// Check if a company is still cooling down.
    pub fn is_company_cooling(&self, id: CompanyId) -> bool {
        self.company_cooldown.contains(&id)
    }

    /// Start over: zero score, empty cooldowns, reward locked, nothing pending.
    pub fn reset(&mut self) {
        self.score = 0;
        self.type_cooldown.clear();
        self.company_cooldown.clear();
        self.reward_unlocked = false;
        self.active_question = None;
        self.last_evaluation = None;
        self.questions_asked = 0;
    }

    /// Make `question` the active one and put its type and companies on cooldown.
    pub(crate) fn activate(&mut self, question: Question) -> &Question {
        self.type_cooldown.push([question.attribute]);
        self.company_cooldown.push(question.company_ids());
        self.questions_asked += 1;
        self.active_question.insert(question)
    }

    pub(crate) fn take_active_question(&mut self) -> Option<Question> {
        self.active_question.take()
    }

    /// Apply an evaluated answer. Only the evaluator calls this.
    pub(crate) fn record_evaluation(&mut self, result: EvaluationResult) {
        self.score = result.new_score;
        if result.reward_just_unlocked {
            self.reward_unlocked = true;
        }
        self.last_evaluation = Some(result);
    }

    pub(crate) fn relax_type_cooldown(&mut self) -> Option<Vec<AttributeKind>> {
        self.type_cooldown.evict_oldest()
    }

    pub(crate) fn relax_company_cooldown(&mut self) -> Option<Vec<CompanyId>> {
        self.company_cooldown.evict_oldest()
    }
}
