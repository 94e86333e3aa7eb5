//! # Material Accounting
//!
//! Material take-off of a section schedule and the embodied-carbon conversions applied
//! to it once an optimization run finishes.
//!
//! - [`quantities`] - concrete and reinforcement volumes (ft³)
//! - [`carbon`] - embodied carbon of those volumes (kgCO2e)

pub mod carbon;
pub mod quantities;
