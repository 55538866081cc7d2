use anyhow::Result;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::EngineError;
use crate::fitness::{self, FITNESS_GOAL};
use crate::grid::{Cell, Grid, ALL_GROUPS};
use crate::logger::DevLogger;
use crate::ops;

#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Candidate grids per generation
    pub population_size: usize,
    /// Global generation budget across all restarts
    pub max_iterations: usize,
    /// Seed for the random source; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { population_size: 180, max_iterations: 100_000, seed: None }
    }
}

/// True iff no two fixed cells share a value within any row, column, or
/// sub-square. Free cells never conflict.
pub fn validate(blueprint: &Grid) -> bool {
    ALL_GROUPS.iter().all(|coords| {
        coords
            .iter()
            .map(|&(row, col)| blueprint.get(row, col))
            .tuple_combinations()
            .all(|(a, b)| !(a.is_fixed() && b.is_fixed() && a.value() == b.value()))
    })
}

/// Inner-loop generation budget before the population is discarded and
/// reseeded. Fewer givens mean a larger search space and a larger budget.
pub fn reset_point(blueprint: &Grid) -> usize {
    match blueprint.given_count() {
        0..=27 => 2000,
        28..=29 => 350,
        30..=31 => 300,
        _ => 200,
    }
}

pub struct Solver {
    config: SolverConfig,
    rng: StdRng,
    generations: usize,
    restarts: usize,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng, generations: 0, restarts: 0 }
    }

    /// Generation steps consumed by the last `solve` call.
    pub fn generations(&self) -> usize { self.generations }

    /// Times the last `solve` call abandoned a stagnated population.
    pub fn restarts(&self) -> usize { self.restarts }

    /// Run the full search. `Ok(Some(grid))` carries the first grid to reach
    /// the fitness goal; `Ok(None)` means the generation budget ran out,
    /// which is a negative result rather than a failure.
    pub fn solve(&mut self, blueprint: &Grid, logger: &mut DevLogger) -> Result<Option<Grid>> {
        if !validate(blueprint) {
            return Err(EngineError::InvalidBlueprint.into());
        }
        self.generations = 0;
        self.restarts = 0;
        let reset_point = reset_point(blueprint);
        logger.log(
            "Search started",
            &format!(
                "{} givens, reset point {} generations, population {}",
                blueprint.given_count(),
                reset_point,
                self.config.population_size
            ),
        )?;

        while self.generations < self.config.max_iterations {
            if self.generations > 0 {
                self.restarts += 1;
                logger.log(
                    "Restart",
                    &format!("discarding stagnated population, reseeding (restart #{})", self.restarts),
                )?;
            }
            let mut population = self.seed_population(blueprint);
            for _ in 0..reset_point {
                if let Some(answer) = self.repair_and_score(&mut population)? {
                    return self.finish(answer, logger);
                }
                let before_crossover = population.clone();
                for i in 1..population.len() {
                    let (left, right) = population.split_at_mut(i);
                    ops::crossover(&left[i - 1], &mut right[0], &mut self.rng);
                }
                if let Some(answer) = self.repair_and_score(&mut population)? {
                    return self.finish(answer, logger);
                }
                for grid in population.iter_mut() {
                    ops::mutate(grid, &mut self.rng)?;
                }
                let after_mutation = population.clone();
                if let Some(answer) = self.repair_and_score(&mut population)? {
                    return self.finish(answer, logger);
                }
                population = ops::next_generation(before_crossover, after_mutation);
                self.generations += 1;
                if self.generations % 100 == 0 {
                    let best = population.iter().map(Grid::fitness).max().unwrap_or(0);
                    logger.log(
                        "Progress",
                        &format!("generation {}, best fitness {}/{}", self.generations, best, FITNESS_GOAL),
                    )?;
                }
            }
        }
        logger.log(
            "Exhausted",
            &format!("no solution within {} generations", self.config.max_iterations),
        )?;
        Ok(None)
    }

    fn finish(&self, answer: Grid, logger: &mut DevLogger) -> Result<Option<Grid>> {
        logger.log(
            "Solved",
            &format!(
                "solution found after {} generations ({} restarts)\n{}",
                self.generations,
                self.restarts,
                answer.to_pretty_string()
            ),
        )?;
        Ok(Some(answer))
    }

    fn seed_population(&mut self, blueprint: &Grid) -> Vec<Grid> {
        (0..self.config.population_size).map(|_| self.seed_grid(blueprint)).collect()
    }

    // Fixed cells come over verbatim; free cells start from a uniform digit.
    fn seed_grid(&mut self, blueprint: &Grid) -> Grid {
        let mut grid = Grid::empty();
        for row in 0..9 {
            for col in 0..9 {
                let cell = blueprint.get(row, col);
                grid.cells[row][col] =
                    if cell.is_fixed() { cell } else { Cell::free(self.rng.gen_range(1..=9)) };
            }
        }
        grid
    }

    // One repair + evaluate pass over the whole population, then a scan in
    // population order for the first grid hitting the fitness goal.
    fn repair_and_score(&mut self, population: &mut [Grid]) -> Result<Option<Grid>, EngineError> {
        for grid in population.iter_mut() {
            ops::remove_repetition(grid, &mut self.rng)?;
            fitness::update(grid);
        }
        Ok(population.iter().find(|grid| grid.fitness() == FITNESS_GOAL).cloned())
    }
}
