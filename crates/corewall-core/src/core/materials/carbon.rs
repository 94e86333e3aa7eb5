use super::quantities::MaterialQuantities;
use serde::Serialize;

const CUBIC_FEET_PER_CUBIC_METER: f64 = 35.3147;
/// Concrete embodied carbon, kgCO2e/m³ (CLF high baseline).
const CONCRETE_CARBON_PER_M3: f64 = 600.0;
/// Rebar density, lb/ft³.
const REBAR_DENSITY_LB_PER_FT3: f64 = 490.0;
// Applied per lb of rebar. Published baselines quote ~2 kgCO2e/kg, which this does not match.
const REINFORCEMENT_CARBON_FACTOR: f64 = 0.453;

/// Embodied carbon of a concrete volume given in ft³, in kgCO2e.
pub fn concrete_embodied_carbon(volume_ft3: f64) -> f64 {
    volume_ft3 / CUBIC_FEET_PER_CUBIC_METER * CONCRETE_CARBON_PER_M3
}

/// Embodied carbon of a reinforcement volume given in ft³, in kgCO2e.
pub fn reinforcement_embodied_carbon(volume_ft3: f64) -> f64 {
    volume_ft3 * REBAR_DENSITY_LB_PER_FT3 * REINFORCEMENT_CARBON_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarbonSummary {
    pub concrete: f64,
    pub reinforcement: f64,
}

impl CarbonSummary {
    pub fn total(&self) -> f64 {
        self.concrete + self.reinforcement
    }
}

impl From<&MaterialQuantities> for CarbonSummary {
    fn from(quantities: &MaterialQuantities) -> Self {
        Self {
            concrete: concrete_embodied_carbon(quantities.concrete_volume),
            reinforcement: reinforcement_embodied_carbon(quantities.reinforcement_volume),
        }
    }
}
