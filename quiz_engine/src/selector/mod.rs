//! Candidate Selector - finds two companies that make a fair question.
//!
//! The search works as follows:
//! 1. **Types**: drop every attribute type still on cooldown
//! 2. **Pick**: choose one of the remaining types at random
//! 3. **Pool**: keep companies that are off cooldown and have a value for that type
//! 4. **Pair**: draw uniformly among all pairs meeting the type's threshold
//!    whose values also read differently in the prompt
//! 5. **Retry**: if no pair exists, drop that type and go back to step 2

mod sampling;

use company_registry::{AttributeValue, Company};
use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::error::QuizError;
use crate::registry::{AttributeType, AttributeTypeRegistry, Threshold};
use crate::session::Session;

/// A fair pair of companies for one attribute type.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub attribute: &'a AttributeType,
    pub first: &'a Company,
    pub second: &'a Company,
}

/// Picks attribute types and company pairs under the session's cooldowns.
pub struct CandidateSelector<'a> {
    registry: &'a AttributeTypeRegistry,
    config: &'a GameConfig,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(registry: &'a AttributeTypeRegistry, config: &'a GameConfig) -> Self {
        Self { registry, config }
    }

    /// Select an attribute type and a fair pair of companies from `companies`.
    ///
    /// Fails with [`QuizError::NoEligibleType`] when every type is on cooldown,
    /// and with [`QuizError::NoQualifyingPair`] when no eligible type has a fair
    /// pair among the companies off cooldown.
    pub fn select_pair<R: Rng + ?Sized>(
        &self,
        session: &Session,
        companies: &'a [Company],
        rng: &mut R,
    ) -> Result<Selection<'a>, QuizError> {
        let mut eligible: Vec<&'a AttributeType> = self
            .registry
            .list_types()
            .iter()
            .filter(|ty| !session.is_type_cooling(ty.kind))
            .collect();
        if eligible.is_empty() {
            return Err(QuizError::NoEligibleType);
        }

        let mut tried = 0;
        while !eligible.is_empty() {
            let attribute = eligible.swap_remove(rng.gen_range(0..eligible.len()));
            tried += 1;

            let pool = self.candidate_pool(attribute, session, companies);
            if let Some((i, j)) = sample_fair_pair(attribute, &pool, rng) {
                debug!(
                    attribute = %attribute.kind,
                    pool = pool.len(),
                    first = %pool[i].0.id,
                    second = %pool[j].0.id,
                    "selected company pair"
                );
                return Ok(Selection {
                    attribute,
                    first: pool[i].0,
                    second: pool[j].0,
                });
            }

            debug!(
                attribute = %attribute.kind,
                pool = pool.len(),
                "no fair pair for attribute type"
            );
        }

        Err(QuizError::NoQualifyingPair { tried })
    }

    /// Companies eligible this round, with their value for `attribute`.
    fn candidate_pool(
        &self,
        attribute: &AttributeType,
        session: &Session,
        companies: &'a [Company],
    ) -> Vec<(&'a Company, AttributeValue)> {
        companies
            .iter()
            .filter(|c| !session.is_company_cooling(c.id))
            .filter(|c| !self.config.require_complete_records || c.is_complete())
            .filter_map(|c| attribute.extract(c).map(|value| (c, value)))
            .collect()
    }
}

fn sample_fair_pair<R: Rng + ?Sized>(
    attribute: &AttributeType,
    pool: &[(&Company, AttributeValue)],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let shown: Vec<String> = pool.iter().map(|(_, v)| attribute.format.render(v)).collect();
    match attribute.threshold {
        Threshold::MinDifference(min) => {
            let values: Option<Vec<f64>> = pool.iter().map(|(_, v)| v.as_number()).collect();
            sampling::sample_numeric_pair(&values?, &shown, min, rng)
        }
        Threshold::MustDiffer => sampling::sample_distinct_pair(&shown, rng),
    }
}
