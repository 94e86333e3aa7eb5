//! # Engine Module
//!
//! The genetic search machinery behind core-wall sizing.
//!
//! ## Overview
//!
//! A candidate is a [`SectionSchedule`](crate::core::models::section::SectionSchedule),
//! one wall section per story. The engine scores candidates through the structural and
//! material models in [`crate::core`], keeps the better half of each generation and
//! breeds the rest by per-story crossover and per-gene mutation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search parameters, gene bounds and fitness weights,
//!   with a validating builder
//! - **Fitness** ([`fitness`]) - Capacity and penalty scoring of one or many candidates
//! - **Operators** ([`operators`]) - Initialization, selection, crossover and mutation
//! - **State** ([`state`]) - Individuals, populations and per-generation summaries
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub(crate) mod context;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod progress;
pub mod state;
