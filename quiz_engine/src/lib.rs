//! # Quiz Engine (Majandusmäng)
//!
//! Generates "which company ...?" questions from pairs of real companies and
//! keeps score for a player's session.
//!
//! ## Core Components
//!
//! - **registry**: the attribute types a question can be about, with their fairness thresholds
//! - **selector**: constraint search for a fair pair of companies
//! - **question**: prompt synthesis with the answer value embedded
//! - **session**: score, cooldown windows and the reward flag
//! - **evaluator**: answer checking and score transitions
//! - **engine**: the facade tying the loop together
//!
//! ## Design Philosophy
//!
//! - **Read-only data**: the company store is shared, never mutated
//! - **Isolated sessions**: every player owns their session state outright
//! - **Injected randomness**: every random choice goes through a caller-supplied RNG

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod question;
pub mod registry;
pub mod selector;
pub mod session;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluator::*;
pub use question::*;
pub use registry::*;
pub use selector::*;
pub use session::*;
