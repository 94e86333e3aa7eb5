use super::config::{BoundsConfig, DimensionBounds, RatioBounds};
use super::state::{Individual, Population};
use crate::core::models::section::{SectionSchedule, WallSection};
use crate::core::structural::capacity::round_to;
use rand::Rng;

/// Step applied to a wall dimension by mutation, in feet. Keeps even values even.
const DIMENSION_STEP: i64 = 2;
/// Half-width of the uniform perturbation applied to a reinforcement ratio.
const RATIO_PERTURBATION: f64 = 0.001;
const RATIO_DECIMALS: i32 = 4;

fn random_even<R: Rng + ?Sized>(bounds: &DimensionBounds, rng: &mut R) -> u32 {
    bounds.first_even() + 2 * rng.gen_range(0..bounds.even_count())
}

fn snap_ratio(value: f64, bounds: &RatioBounds) -> f64 {
    bounds.clamp(round_to(bounds.clamp(value), RATIO_DECIMALS))
}

/// A section with even length and thickness drawn uniformly from the bounds and a
/// uniform reinforcement ratio rounded to four decimals.
pub fn random_section<R: Rng + ?Sized>(bounds: &BoundsConfig, rng: &mut R) -> WallSection {
    let length = random_even(&bounds.length, rng);
    let thickness = random_even(&bounds.thickness, rng);
    let ratio_bounds = &bounds.reinforcement_ratio;
    let ratio = rng.gen_range(ratio_bounds.min..=ratio_bounds.max);
    WallSection::new(length, thickness, snap_ratio(ratio, ratio_bounds))
}

/// A schedule whose stories are drawn independently.
pub fn random_schedule<R: Rng + ?Sized>(
    stories: usize,
    bounds: &BoundsConfig,
    rng: &mut R,
) -> SectionSchedule {
    (0..stories).map(|_| random_section(bounds, rng)).collect()
}

/// Truncation selection: sorts by fitness and keeps the better half (at least one).
pub fn select(mut population: Population) -> Vec<Individual> {
    let keep = (population.len() / 2).max(1);
    population.sort_by_fitness();
    let mut survivors = population.into_individuals();
    survivors.truncate(keep);
    survivors
}

/// Per-story crossover: with probability `rate` each child keeps its own parent's
/// section at that story, otherwise the two parents' sections are swapped.
pub fn crossover<R: Rng + ?Sized>(
    first: &SectionSchedule,
    second: &SectionSchedule,
    rate: f64,
    rng: &mut R,
) -> (SectionSchedule, SectionSchedule) {
    let (child_a, child_b): (Vec<WallSection>, Vec<WallSection>) = first
        .sections()
        .iter()
        .zip(second.sections())
        .map(|(&a, &b)| if rng.gen_bool(rate) { (a, b) } else { (b, a) })
        .unzip();
    (SectionSchedule::new(child_a), SectionSchedule::new(child_b))
}

/// Mutates every story in place. Length, thickness and reinforcement ratio each mutate
/// independently with probability `rate`: dimensions move ±2 ft, the ratio moves by a
/// uniform amount in ±0.001; all genes are clamped to their bounds.
pub fn mutate<R: Rng + ?Sized>(
    schedule: &mut SectionSchedule,
    bounds: &BoundsConfig,
    rate: f64,
    rng: &mut R,
) {
    for section in schedule.sections_mut() {
        if rng.gen_bool(rate) {
            let step = if rng.gen_bool(0.5) {
                DIMENSION_STEP
            } else {
                -DIMENSION_STEP
            };
            section.length = bounds.length.step_clamped(section.length, step);
        }
        if rng.gen_bool(rate) {
            let step = if rng.gen_bool(0.5) {
                DIMENSION_STEP
            } else {
                -DIMENSION_STEP
            };
            section.thickness = bounds.thickness.step_clamped(section.thickness, step);
        }
        if rng.gen_bool(rate) {
            let delta = rng.gen_range(-RATIO_PERTURBATION..=RATIO_PERTURBATION);
            section.reinforcement_ratio = snap_ratio(
                section.reinforcement_ratio + delta,
                &bounds.reinforcement_ratio,
            );
        }
    }
}

/// Breeds `count` mutated children from the survivors.
///
/// Survivors are paired consecutively (0 with 1, 2 with 3, ...), each pair yielding two
/// children. Pairing wraps around to the start when more children are needed than the
/// pairs provide, and surplus children are dropped.
pub fn reproduce<R: Rng + ?Sized>(
    survivors: &[Individual],
    count: usize,
    bounds: &BoundsConfig,
    crossover_rate: f64,
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<SectionSchedule> {
    let mut children = Vec::with_capacity(count + 1);
    if survivors.is_empty() {
        return children;
    }

    let mut index = 0;
    while children.len() < count {
        let first = &survivors[index % survivors.len()].schedule;
        let second = &survivors[(index + 1) % survivors.len()].schedule;
        let (mut child_a, mut child_b) = crossover(first, second, crossover_rate, rng);
        mutate(&mut child_a, bounds, mutation_rate, rng);
        mutate(&mut child_b, bounds, mutation_rate, rng);
        children.push(child_a);
        children.push(child_b);
        index += 2;
    }

    children.truncate(count);
    children
}
