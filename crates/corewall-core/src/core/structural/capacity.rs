use crate::core::models::section::WallSection;

/// Specified concrete compressive strength, f'c (psi).
pub const CONCRETE_STRENGTH_PSI: f64 = 6000.0;
/// Reinforcement yield strength, fy (ksi).
pub const REINFORCEMENT_YIELD_KSI: f64 = 60.0;

const SQ_IN_PER_SQ_FT: f64 = 144.0;
const SHEAR_PHI: f64 = 0.75;
const FLEXURE_PHI: f64 = 0.9;
/// Effective shear depth as a fraction of the wall length.
const SHEAR_DEPTH_FACTOR: f64 = 0.8;
/// Lever arm `jd` as a fraction of the wall length (0.8 × 0.9).
const LEVER_ARM_FACTOR: f64 = 0.8 * 0.9;

/// Design shear strength of the two flanges, in kips: `φ · 8√f'c · Acv`.
///
/// Flange shear contribution and openings are ignored; the same length and thickness
/// are assumed in both directions.
pub fn shear_capacity(section: &WallSection) -> f64 {
    let shear_area = 2.0 * SHEAR_DEPTH_FACTOR * section.flange_area() * SQ_IN_PER_SQ_FT;
    SHEAR_PHI * 8.0 * CONCRETE_STRENGTH_PSI.sqrt() * shear_area / 1000.0
}

/// Design flexural strength, in kip-ft: `φ · As · fy · jd`, counting flange steel only.
pub fn moment_capacity(section: &WallSection) -> f64 {
    let steel_area = section.reinforcement_ratio * section.flange_area() * SQ_IN_PER_SQ_FT;
    let lever_arm = LEVER_ARM_FACTOR * f64::from(section.length);
    FLEXURE_PHI * steel_area * REINFORCEMENT_YIELD_KSI * lever_arm
}

/// Demand over capacity, rounded to two decimals.
///
/// A capacity that is not a positive finite number yields an infinite ratio so the
/// section ranks as maximally infeasible instead of producing NaN.
pub fn demand_capacity_ratio(demand: f64, capacity: f64) -> f64 {
    if !(capacity.is_finite() && capacity > 0.0) {
        return f64::INFINITY;
    }
    round_to(demand / capacity, 2)
}

#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
