//! # Workflows Module
//!
//! Top-level entry points. Each workflow validates its inputs, drives the engine and
//! returns a self-contained result with capacity ratios, material quantities and
//! embodied carbon for the governing design.
//!
//! - **Optimization** ([`optimize`]) - Genetic search for the lowest-fitness section
//!   schedule, with early stopping and cooperative cancellation.
//! - **Evaluation** ([`evaluate`]) - Capacity and material check of a given schedule.

pub mod evaluate;
pub mod optimize;
