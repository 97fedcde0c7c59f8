//! Play the company quiz in the terminal.
//!
//! ```text
//! quiz --data companies.json [--config game.toml] [--seed 42]
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use company_registry::InMemoryStore;
use quiz_engine::{ChoiceSlot, GameConfig, QuizEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quiz", about = "Majandusmäng - which company is it?")]
struct Args {
    /// JSON array of company records.
    #[arg(long)]
    data: PathBuf,

    /// TOML game configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let store = InMemoryStore::load_json(&args.data)
        .with_context(|| format!("loading companies from {}", args.data.display()))?;
    info!(companies = store.len(), "company data loaded");

    let engine = QuizEngine::new(store, config)?;
    let mut session = engine.new_session();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        let question = match engine.next_question(&mut session, &mut rng) {
            Ok(question) => question.view(),
            Err(err) if err.is_recoverable() => {
                println!("Ei suutnud küsimust genereerida: {err}");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        println!();
        println!("Punkte: {} / {}", session.score(), engine.config().promo_threshold);
        println!("{}", question.prompt);
        println!("  [a] {}", question.choices[0].label);
        println!("  [b] {}", question.choices[1].label);

        let slot = loop {
            print!("> ");
            stdout.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            match line?.trim().to_lowercase().as_str() {
                "a" => break Some(ChoiceSlot::A),
                "b" => break Some(ChoiceSlot::B),
                "reset" => break None,
                "q" | "quit" => return Ok(()),
                _ => println!("Vasta 'a' või 'b' (või 'reset', 'quit')."),
            }
        };
        let Some(slot) = slot else {
            engine.reset(&mut session);
            println!("Mäng algab otsast.");
            continue;
        };

        let result = engine.submit_slot(&mut session, slot)?;
        if result.correct {
            println!("Õige! Punkte: {}", result.new_score);
        } else {
            let correct = question
                .choices
                .iter()
                .find(|c| c.company_id == result.correct_company)
                .map(|c| c.label.as_str())
                .unwrap_or("?");
            println!("Vale. Õige vastus: {correct}. Punkte: {}", result.new_score);
        }
        if result.reward_just_unlocked {
            println!("Palju õnne! Kogusid {} punkti ja avasid auhinna.", result.new_score);
        }
    }
}
