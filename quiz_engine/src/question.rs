//! Question Builder - turns a fair pair of companies into a question.

use company_registry::{AttributeKind, AttributeValue, Company, CompanyId};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::registry::AttributeType;

/// The two answer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceSlot {
    A,
    B,
}

impl ChoiceSlot {
    fn index(self) -> usize {
        match self {
            ChoiceSlot::A => 0,
            ChoiceSlot::B => 1,
        }
    }
}

/// One selectable company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub company_id: CompanyId,
    /// Company name as shown to the player.
    pub label: String,
}

/// A generated question, including the answer.
///
/// Never hand this to the presentation layer directly; use [`Question::view`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub attribute: AttributeKind,
    /// Value taken from the correct company and embedded in the prompt.
    pub stated_value: AttributeValue,
    pub prompt: String,
    pub choices: [Choice; 2],
    pub correct_company: CompanyId,
}

/// What the player gets to see: the prompt and two labelled choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub prompt: String,
    pub choices: [Choice; 2],
}

impl Question {
    /// Build a question about `attribute` from companies `a` and `b`.
    ///
    /// A fair coin picks which company supplies the stated value, and a second
    /// coin picks whether the correct company sits in slot A or B. Both draws
    /// come from `rng`, so a seeded RNG gives a reproducible question.
    ///
    /// Fails with [`QuizError::InvariantViolation`] if either company lacks the
    /// value or both companies match the stated value as the prompt shows it.
    pub fn build<R: Rng + ?Sized>(
        attribute: &AttributeType,
        a: &Company,
        b: &Company,
        rng: &mut R,
    ) -> Result<Question, QuizError> {
        if a.id == b.id {
            return Err(QuizError::InvariantViolation(format!(
                "company {} paired with itself",
                a.id
            )));
        }

        let (source, other) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };
        let stated_value = extract(attribute, source)?;
        let other_value = extract(attribute, other)?;
        if !attribute.tells_apart(&stated_value, &other_value) {
            return Err(QuizError::InvariantViolation(format!(
                "{} values of {} and {} do not single out one answer",
                attribute.kind, source.id, other.id
            )));
        }

        let correct = Choice {
            company_id: source.id,
            label: source.name.clone(),
        };
        let wrong = Choice {
            company_id: other.id,
            label: other.name.clone(),
        };
        let choices = if rng.gen_bool(0.5) {
            [correct, wrong]
        } else {
            [wrong, correct]
        };

        Ok(Question {
            attribute: attribute.kind,
            prompt: attribute.render_prompt(&stated_value),
            stated_value,
            choices,
            correct_company: source.id,
        })
    }

    /// The choice in a slot.
    pub fn choice(&self, slot: ChoiceSlot) -> &Choice {
        &self.choices[slot.index()]
    }

    /// Slot holding a company, if it is part of this question.
    pub fn slot_of(&self, id: CompanyId) -> Option<ChoiceSlot> {
        [ChoiceSlot::A, ChoiceSlot::B]
            .into_iter()
            .find(|slot| self.choice(*slot).company_id == id)
    }

    /// Slot holding the correct answer, or `None` if `correct_company` is
    /// not one of the choices.
    pub fn correct_slot(&self) -> Option<ChoiceSlot> {
        self.slot_of(self.correct_company)
    }

    /// Both companies, in slot order.
    pub fn company_ids(&self) -> [CompanyId; 2] {
        [self.choices[0].company_id, self.choices[1].company_id]
    }

    /// The player-facing part of the question.
    pub fn view(&self) -> QuestionView {
        QuestionView {
            prompt: self.prompt.clone(),
            choices: self.choices.clone(),
        }
    }
}

fn extract(attribute: &AttributeType, company: &Company) -> Result<AttributeValue, QuizError> {
    attribute.extract(company).ok_or_else(|| {
        QuizError::InvariantViolation(format!(
            "company {} has no {} value",
            company.id, attribute.kind
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AttributeTypeRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn founding_pair() -> (Company, Company) {
        (
            Company::new("Vana OÜ").with_founding_year(1995),
            Company::new("Uus OÜ").with_founding_year(2010),
        )
    }

    #[test]
    fn test_build_embeds_value_of_correct_company() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::FoundingYear).unwrap();
        let (old, new) = founding_pair();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let question = Question::build(ty, &old, &new, &mut rng).unwrap();
            let correct = if question.correct_company == old.id { &old } else { &new };

            assert_eq!(Some(&question.stated_value), ty.extract(correct).as_ref());
            let year = correct.founding_year().unwrap();
            assert_eq!(question.prompt, format!("Milline ettevõte asutati aastal {year}?"));
            assert_eq!(question.choice(question.correct_slot().unwrap()).company_id, correct.id);
        }
    }

    #[test]
    fn test_build_varies_source_and_slot() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::FoundingYear).unwrap();
        let (old, new) = founding_pair();
        let mut rng = StdRng::seed_from_u64(42);

        let mut sources = std::collections::HashSet::new();
        let mut slots = std::collections::HashSet::new();
        for _ in 0..64 {
            let question = Question::build(ty, &old, &new, &mut rng).unwrap();
            sources.insert(question.correct_company);
            slots.insert(question.correct_slot().unwrap());
        }
        assert_eq!(sources.len(), 2);
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_build_is_reproducible() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::FoundingYear).unwrap();
        let (old, new) = founding_pair();

        let first = Question::build(ty, &old, &new, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = Question::build(ty, &old, &new, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_value_is_invariant_violation() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::Ceo).unwrap();
        let a = Company::new("Juhiga AS").with_ceo("Jaan Tamm");
        let b = Company::new("Juhita AS");

        let result = Question::build(ty, &a, &b, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(QuizError::InvariantViolation(_))));
    }

    #[test]
    fn test_ambiguous_pair_rejected() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::LegalForm).unwrap();
        let a = Company::new("Üks OÜ").with_legal_form("Osaühing");
        let b = Company::new("Teine OÜ").with_legal_form("Osaühing");

        let result = Question::build(ty, &a, &b, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(QuizError::InvariantViolation(_))));
    }

    #[test]
    fn test_view_hides_answer() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::FoundingYear).unwrap();
        let (old, new) = founding_pair();
        let question = Question::build(ty, &old, &new, &mut StdRng::seed_from_u64(5)).unwrap();

        let view = question.view();
        assert_eq!(view.prompt, question.prompt);
        assert_eq!(view.choices, question.choices);
        let labels: Vec<_> = view.choices.iter().map(|c| c.label.as_str()).collect();
        assert!(labels.contains(&"Vana OÜ") && labels.contains(&"Uus OÜ"));
    }

    #[test]
    fn test_pair_with_same_rendered_amount_rejected() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::LaborCosts).unwrap();
        let a = Company::new("Esimene AS").with_labor_taxes(1_050_000.0);
        let b = Company::new("Teine AS").with_labor_taxes(1_150_000.0);

        for seed in 0..32 {
            let result = Question::build(ty, &a, &b, &mut StdRng::seed_from_u64(seed));
            assert!(matches!(result, Err(QuizError::InvariantViolation(_))));
        }
    }

    #[test]
    fn test_pair_with_same_truncated_activity_rejected() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::Activity).unwrap();
        let shared = "Arvutiprogrammeerimine, tarkvaraarendus ja sellega seotud nõustamine";
        assert!(shared.chars().count() > 60);
        let a = Company::new("Koodimaja OÜ").with_activity("62011", format!("{shared} ettevõtetele"));
        let b = Company::new("Tarkvarakoda OÜ").with_activity("62012", format!("{shared} eraisikutele"));

        for seed in 0..32 {
            let result = Question::build(ty, &a, &b, &mut StdRng::seed_from_u64(seed));
            assert!(matches!(result, Err(QuizError::InvariantViolation(_))));
        }
    }

    #[test]
    fn test_correct_slot_missing_when_answer_not_offered() {
        let registry = AttributeTypeRegistry::default();
        let ty = registry.get(AttributeKind::FoundingYear).unwrap();
        let (old, new) = founding_pair();
        let mut question = Question::build(ty, &old, &new, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(question.correct_slot().is_some());

        question.correct_company = CompanyId::new();
        assert_eq!(question.correct_slot(), None);
    }
}
