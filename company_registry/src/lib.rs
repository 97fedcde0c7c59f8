//! # Company Registry
//!
//! The data side of Majandusmäng - company records as published by the business
//! registry, helpers for normalizing raw registry fields, and the read-only store
//! the quiz engine draws its questions from.
//! This crate never decides anything about questions or scoring.

pub mod attributes;
pub mod company;
pub mod store;

pub use attributes::*;
pub use company::*;
pub use store::*;
