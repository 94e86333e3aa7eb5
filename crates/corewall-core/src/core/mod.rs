//! # Core Module
//!
//! The stateless foundation of corewall: input models, the structural capacity model
//! and material accounting.
//!
//! ## Architecture
//!
//! - **Input Models** ([`models`]) - Story-force profiles, wall sections and the
//!   per-story section schedule
//! - **Structural Model** ([`structural`]) - Shear and moment diagrams, capacity checks
//!   and cantilever drift via the moment-area method
//! - **Material Accounting** ([`materials`]) - Concrete and reinforcement volumes and
//!   their embodied carbon
//!
//! ## Engineering Assumptions
//!
//! - The core is idealized as a hollow rectangular tube acting as a cantilever fixed
//!   at the base, with the two flanges resisting shear and the flange reinforcement
//!   resisting overturning.
//! - Concrete strength is fixed at 6,000 psi and reinforcement yield at 60 ksi.
//! - Openings, flange shear contribution, web reinforcement and biaxial effects are
//!   ignored.

pub mod materials;
pub mod models;
pub mod structural;
