use crate::core::models::section::SectionSchedule;
use serde::Serialize;
use std::cmp::Ordering;

/// A candidate schedule and its fitness (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub schedule: SectionSchedule,
    pub fitness: f64,
}

impl Individual {
    pub fn new(schedule: SectionSchedule, fitness: f64) -> Self {
        Self { schedule, fitness }
    }

    /// Total order on fitness; NaN never occurs because degenerate candidates are
    /// scored as infinite.
    #[inline]
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

/// A fixed-size, ordered generation of individuals. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Stable ascending sort by fitness; ties keep their current order.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(Individual::cmp_fitness);
    }

    /// The first individual with the lowest fitness.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, candidate| match candidate.cmp_fitness(best) {
                Ordering::Less => candidate,
                _ => best,
            })
    }

    /// Mean fitness over the finite scores; `None` when no score is finite.
    pub fn mean_fitness(&self) -> Option<f64> {
        let (sum, count) = self
            .individuals
            .iter()
            .map(|i| i.fitness)
            .filter(|f| f.is_finite())
            .fold((0.0, 0usize), |(sum, count), f| (sum + f, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// Per-generation statistics recorded in the run history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// 1-based generation index.
    pub generation: usize,
    pub population_size: usize,
    pub best_fitness: f64,
    pub mean_fitness: Option<f64>,
    pub best_ever_fitness: f64,
    pub generations_without_improvement: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::section::WallSection;

    fn individual(length: u32, fitness: f64) -> Individual {
        Individual::new(
            SectionSchedule::uniform(WallSection::new(length, 2, 0.01), 2),
            fitness,
        )
    }

    #[test]
    fn sort_by_fitness_orders_ascending_and_is_stable() {
        let mut population = Population::new(vec![
            individual(10, 3.0),
            individual(12, 1.0),
            individual(14, 3.0),
            individual(16, f64::INFINITY),
            individual(18, 2.0),
        ]);

        population.sort_by_fitness();

        let lengths: Vec<u32> = population
            .individuals()
            .iter()
            .map(|i| i.schedule.sections()[0].length)
            .collect();
        assert_eq!(lengths, vec![12, 18, 10, 14, 16]);
    }

    #[test]
    fn best_returns_first_lowest_fitness() {
        let population = Population::new(vec![
            individual(10, 5.0),
            individual(12, 1.0),
            individual(14, 1.0),
        ]);
        let best = population.best().unwrap();
        assert_eq!(best.schedule.sections()[0].length, 12);
    }

    #[test]
    fn best_of_empty_population_is_none() {
        assert!(Population::default().best().is_none());
    }

    #[test]
    fn mean_fitness_ignores_infinite_scores() {
        let population = Population::new(vec![
            individual(10, 1.0),
            individual(12, 3.0),
            individual(14, f64::INFINITY),
        ]);
        assert_eq!(population.mean_fitness(), Some(2.0));

        let hopeless = Population::new(vec![individual(10, f64::INFINITY)]);
        assert_eq!(hopeless.mean_fitness(), None);
    }
}
