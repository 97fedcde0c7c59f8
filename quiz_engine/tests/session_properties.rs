//! Whole-loop properties of the quiz engine.

use std::collections::{HashSet, VecDeque};

use company_registry::{AttributeKind, Company, CompanyId, CompanyStore, InMemoryStore};
use proptest::prelude::*;
use quiz_engine::{AttributeTypeRegistry, GameConfig, QuizEngine, QuizError, Threshold};
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNTIES: [&str; 4] = [
    "Tallinn, Harju maakond",
    "Tartu, Tartu maakond",
    "Pärnu, Pärnu maakond",
    "Narva, Ida-Viru maakond",
];
const LEGAL_FORMS: [&str; 2] = ["Osaühing", "Aktsiaselts"];

/// Companies whose numeric values are all at least one threshold apart.
fn rich_store(count: usize) -> InMemoryStore {
    InMemoryStore::from_companies((0..count).map(|i| {
        let n = i as f64;
        Company::new(format!("Ettevõte {i}"))
            .with_registry_code(format!("{:08}", 10_000_000 + i))
            .with_founding_year(1900 + 10 * i as i32)
            .with_employees(25.0 * n)
            .with_revenue(2_500_000.0 * n)
            .with_profit(600_000.0 * n - 1_000_000.0)
            .with_labor_taxes(150_000.0 * n)
            .with_county(COUNTIES[i % COUNTIES.len()])
            .with_ceo(format!("Juht {i}"))
            .with_activity(format!("{}", 62000 + i % 3), format!("Tegevusala {}", i % 3))
            .with_legal_form(LEGAL_FORMS[i % LEGAL_FORMS.len()])
            .with_vat_number(format!("EE{:09}", 100_000_000 + i))
    }))
    .expect("fixture companies are valid")
}

fn strict_config() -> GameConfig {
    GameConfig {
        relax_cooldowns: false,
        ..GameConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn score_counts_right_minus_wrong(
        seed in any::<u64>(),
        companies in 6usize..20,
        answers in prop::collection::vec(any::<bool>(), 1..40),
    ) {
        let engine = QuizEngine::new(rich_store(companies), strict_config()).unwrap();
        let mut session = engine.new_session();
        let mut rng = StdRng::seed_from_u64(seed);
        let threshold = engine.config().promo_threshold;

        let mut expected = 0i64;
        let mut unlocks = 0;
        for answer_right in answers {
            let question = engine.next_question(&mut session, &mut rng).unwrap().clone();
            let chosen = if answer_right {
                question.correct_company
            } else {
                question
                    .company_ids()
                    .into_iter()
                    .find(|id| *id != question.correct_company)
                    .unwrap()
            };

            let before = session.score();
            let result = engine.submit_answer(&mut session, chosen).unwrap();
            expected += if answer_right { 1 } else { -1 };

            prop_assert_eq!(result.correct, answer_right);
            prop_assert_eq!(result.new_score, expected);
            prop_assert_eq!(session.score(), expected);
            if result.reward_just_unlocked {
                unlocks += 1;
                prop_assert!(before < threshold && result.new_score >= threshold);
            }
        }
        prop_assert!(unlocks <= 1);
        prop_assert_eq!(session.reward_unlocked(), unlocks == 1);
    }

    #[test]
    fn generated_questions_respect_fairness_and_cooldowns(
        seed in any::<u64>(),
        companies in 6usize..20,
        rounds in 1usize..40,
    ) {
        let config = strict_config();
        let registry = AttributeTypeRegistry::from_config(&config);
        let store = rich_store(companies);
        let engine = QuizEngine::new(&store, config.clone()).unwrap();
        let mut session = engine.new_session();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut recent_types: VecDeque<AttributeKind> = VecDeque::new();
        let mut recent_pairs: VecDeque<[CompanyId; 2]> = VecDeque::new();

        for _ in 0..rounds {
            let cooling: HashSet<CompanyId> = recent_pairs.iter().flatten().copied().collect();
            let question = engine.next_question(&mut session, &mut rng).unwrap().clone();
            let [a, b] = question.company_ids();

            prop_assert_ne!(a, b);
            prop_assert!(!cooling.contains(&a) && !cooling.contains(&b));
            prop_assert!(!recent_types.contains(&question.attribute));

            let ty = registry.get(question.attribute).unwrap();
            let value_a = ty.extract(store.get(a).unwrap()).unwrap();
            let value_b = ty.extract(store.get(b).unwrap()).unwrap();
            prop_assert!(ty.threshold.is_met(&value_a, &value_b));
            prop_assert_ne!(ty.format.render(&value_a), ty.format.render(&value_b));
            if let Threshold::MinDifference(min) = ty.threshold {
                prop_assert!(value_a.distance(&value_b).unwrap() >= min);
            }

            let correct = store.get(question.correct_company).unwrap();
            prop_assert_eq!(ty.extract(correct), Some(question.stated_value.clone()));

            recent_types.push_back(question.attribute);
            if recent_types.len() > config.type_cooldown {
                recent_types.pop_front();
            }
            recent_pairs.push_back([a, b]);
            if recent_pairs.len() > config.company_cooldown {
                recent_pairs.pop_front();
            }

            engine.submit_answer(&mut session, question.correct_company).unwrap();
        }
    }
}

#[test]
fn companies_rest_for_two_questions() {
    let engine = QuizEngine::new(rich_store(6), strict_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..25 {
        let mut session = engine.new_session();
        let first = engine.next_question(&mut session, &mut rng).unwrap().company_ids();
        let second = engine.next_question(&mut session, &mut rng).unwrap().company_ids();
        let third = engine.next_question(&mut session, &mut rng).unwrap().company_ids();

        for id in first {
            assert!(!second.contains(&id));
            assert!(!third.contains(&id));
        }
    }
}

#[test]
fn founding_year_pairs_keep_seven_years_apart() {
    let x = Company::new("X").with_founding_year(1995);
    let y = Company::new("Y").with_founding_year(2010);
    let z = Company::new("Z").with_founding_year(1998);
    let (x_id, y_id, z_id) = (x.id, y.id, z.id);
    let store = InMemoryStore::from_companies([x, y, z]).unwrap();
    let engine = QuizEngine::new(store, GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(77);

    let mut seen_x_y = false;
    for _ in 0..30 {
        let mut session = engine.new_session();
        let ids = engine.next_question(&mut session, &mut rng).unwrap().company_ids();
        assert!(!(ids.contains(&x_id) && ids.contains(&z_id)), "1995 vs 1998 is too close");
        seen_x_y |= ids.contains(&x_id) && ids.contains(&y_id);
    }
    assert!(seen_x_y);
}

#[test]
fn close_amounts_never_share_a_prompt() {
    // Neighbouring amounts 40k apart often read the same at one decimal of a million.
    let store = InMemoryStore::from_companies(
        (0..12).map(|i| Company::new(format!("Ettevõte {i}")).with_labor_taxes(1_000_000.0 + 40_000.0 * i as f64)),
    )
    .unwrap();
    let full = AttributeTypeRegistry::default();
    let labor = full.get(AttributeKind::LaborCosts).unwrap().clone();
    let engine =
        QuizEngine::with_registry(&store, GameConfig::default(), AttributeTypeRegistry::with_types(vec![labor.clone()]))
            .unwrap();
    let mut session = engine.new_session();
    let mut rng = StdRng::seed_from_u64(404);

    for _ in 0..40 {
        let question = engine.next_question(&mut session, &mut rng).unwrap().clone();
        let [a, b] = question.company_ids();
        let shown_a = labor.format.render(&labor.extract(store.get(a).unwrap()).unwrap());
        let shown_b = labor.format.render(&labor.extract(store.get(b).unwrap()).unwrap());
        assert_ne!(shown_a, shown_b, "both choices read {shown_a}");
        engine.submit_answer(&mut session, question.correct_company).unwrap();
    }
}

#[test]
fn five_correct_answers_unlock_the_reward() {
    let engine = QuizEngine::new(rich_store(10), GameConfig::default()).unwrap();
    let mut session = engine.new_session();
    let mut rng = StdRng::seed_from_u64(5);

    let mut results = Vec::new();
    for _ in 0..5 {
        let correct = engine.next_question(&mut session, &mut rng).unwrap().correct_company;
        let result = engine.submit_answer(&mut session, correct).unwrap();
        results.push((result.new_score, result.reward_just_unlocked));
    }

    assert_eq!(results, vec![(1, false), (2, false), (3, false), (4, false), (5, true)]);
}

#[test]
fn answering_without_a_question_changes_nothing() {
    let engine = QuizEngine::new(rich_store(6), GameConfig::default()).unwrap();
    let mut session = engine.new_session();

    let err = engine.submit_answer(&mut session, CompanyId::new()).unwrap_err();
    assert!(matches!(err, QuizError::NoActiveQuestion));
    assert!(!err.is_recoverable());
    assert_eq!(session.score(), 0);
}

#[test]
fn sessions_do_not_share_state() {
    let engine = QuizEngine::new(rich_store(8), GameConfig::default()).unwrap();
    let mut alice = engine.new_session();
    let bob = engine.new_session();
    let mut rng = StdRng::seed_from_u64(31);

    let correct = engine.next_question(&mut alice, &mut rng).unwrap().correct_company;
    engine.submit_answer(&mut alice, correct).unwrap();

    assert_eq!(alice.score(), 1);
    assert_eq!(bob.score(), 0);
    assert!(bob.company_cooldown().is_empty());
    assert!(bob.type_cooldown().is_empty());
}
