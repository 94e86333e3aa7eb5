//! # corewall Core Library
//!
//! A preliminary sizing library for reinforced-concrete core walls. It searches
//! per-story wall geometry (length, thickness, reinforcement ratio) with a genetic
//! algorithm, scoring every candidate against a simplified cantilever capacity model
//! and a material-volume penalty that stands in for embodied carbon and cost.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`StoryForceProfile`,
//!   `WallSection`, `SectionSchedule`), the structural capacity model (shear, moment
//!   and drift demand-to-capacity ratios) and material accounting (volumes and
//!   embodied carbon). Everything here is a pure function of its inputs.
//!
//! - **[`engine`]: The Logic Core.** Optimizer configuration and validation, the
//!   population state, fitness evaluation and the genetic operators (initialization,
//!   truncation selection, per-story crossover and per-gene mutation).
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into complete
//!   procedures: a full optimization run and a single-schedule evaluation.
//!
//! The capacity formulas are deliberately simplified single-wall approximations and
//! are not a substitute for design-code checks of the final structure.

pub mod core;
pub mod engine;
pub mod workflows;
