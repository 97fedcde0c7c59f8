//! The quiz engine - runs the question loop for any number of sessions.

use company_registry::{CompanyId, CompanyStore};
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::error::QuizError;
use crate::evaluator::{self, EvaluationResult};
use crate::question::{ChoiceSlot, Question};
use crate::registry::AttributeTypeRegistry;
use crate::selector::CandidateSelector;
use crate::session::Session;

/// Ties the registry, selector, builder and evaluator to one company store.
///
/// The engine itself holds no per-player state, so a single engine can serve
/// many sessions; each call borrows exactly one [`Session`].
pub struct QuizEngine<S> {
    store: S,
    registry: AttributeTypeRegistry,
    config: GameConfig,
}

impl<S: CompanyStore> QuizEngine<S> {
    /// Create an engine with the standard attribute types.
    pub fn new(store: S, config: GameConfig) -> Result<Self, QuizError> {
        let registry = AttributeTypeRegistry::from_config(&config);
        Self::with_registry(store, config, registry)
    }

    /// Create an engine with a custom registry.
    pub fn with_registry(
        store: S,
        config: GameConfig,
        registry: AttributeTypeRegistry,
    ) -> Result<Self, QuizError> {
        config.validate()?;
        Ok(Self {
            store,
            registry,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &AttributeTypeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a new session sized for this engine's cooldowns.
    pub fn new_session(&self) -> Session {
        Session::new(&self.config)
    }

    /// Generate the next question and make it the session's active one.
    ///
    /// An unanswered question is discarded. When the cooldowns leave nothing to
    /// ask and `relax_cooldowns` is set, the oldest cooldown entries are evicted
    /// one at a time until a question can be built, type entries before company
    /// entries; otherwise the exhaustion error is returned. Questions that fail their own checks are logged and
    /// regenerated up to `max_build_attempts` times.
    pub fn next_question<'s, R: Rng + ?Sized>(
        &self,
        session: &'s mut Session,
        rng: &mut R,
    ) -> Result<&'s Question, QuizError> {
        if session.take_active_question().is_some() {
            debug!("discarding unanswered question");
        }

        let selector = CandidateSelector::new(&self.registry, &self.config);
        let companies = self.store.query_all();
        let mut build_failures = 0;

        loop {
            let selection = match selector.select_pair(session, companies, rng) {
                Ok(selection) => selection,
                Err(err) => {
                    self.relax(session, err)?;
                    continue;
                }
            };

            match Question::build(selection.attribute, selection.first, selection.second, rng) {
                Ok(question) => {
                    debug!(
                        attribute = %question.attribute,
                        prompt = %question.prompt,
                        "question ready"
                    );
                    return Ok(session.activate(question));
                }
                Err(err) => {
                    build_failures += 1;
                    error!(
                        attribute = %selection.attribute.kind,
                        first = %selection.first.id,
                        second = %selection.second.id,
                        attempt = build_failures,
                        "discarding broken question: {err}"
                    );
                    if build_failures >= self.config.max_build_attempts {
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Evict one cooldown entry so selection can be retried, or hand back `err`.
    fn relax(&self, session: &mut Session, err: QuizError) -> Result<(), QuizError> {
        if !self.config.relax_cooldowns {
            return Err(err);
        }

        match err {
            QuizError::NoEligibleType => {
                if let Some(evicted) = session.relax_type_cooldown() {
                    warn!(?evicted, "all attribute types cooling down, relaxing type cooldown");
                    return Ok(());
                }
            }
            // Company entries go only once no type is left cooling.
            QuizError::NoQualifyingPair { .. } => {
                if let Some(evicted) = session.relax_type_cooldown() {
                    warn!(?evicted, "no fair pair available, relaxing type cooldown");
                    return Ok(());
                }
                if let Some(evicted) = session.relax_company_cooldown() {
                    warn!(?evicted, "no fair pair available, relaxing company cooldown");
                    return Ok(());
                }
            }
            _ => {}
        }
        Err(err)
    }

    /// Answer the active question by company.
    pub fn submit_answer(
        &self,
        session: &mut Session,
        chosen: CompanyId,
    ) -> Result<EvaluationResult, QuizError> {
        evaluator::submit_answer(session, chosen, self.config.promo_threshold)
    }

    /// Answer the active question by slot.
    pub fn submit_slot(
        &self,
        session: &mut Session,
        slot: ChoiceSlot,
    ) -> Result<EvaluationResult, QuizError> {
        let chosen = session
            .active_question()
            .ok_or(QuizError::NoActiveQuestion)?
            .choice(slot)
            .company_id;
        self.submit_answer(session, chosen)
    }

    /// Start the session over.
    pub fn reset(&self, session: &mut Session) {
        info!(
            score = session.score(),
            questions = session.questions_asked(),
            "resetting session"
        );
        session.reset();
    }
}
