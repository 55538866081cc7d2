use itertools::Itertools;

use crate::grid::{Grid, ALL_GROUPS};

/// Fitness of a grid whose 27 groups each hold nine pairwise-distinct
/// values, i.e. a valid solved Sudoku. 27 groups × C(9,2) pairs.
pub const FITNESS_GOAL: u32 = 972;

/// Count the unordered cell pairs with differing values across every row,
/// column, and sub-square. Pure function of the grid's current cell values.
pub fn evaluate(grid: &Grid) -> u32 {
    ALL_GROUPS
        .iter()
        .map(|coords| {
            let values = grid.values_at(coords);
            values.iter().tuple_combinations().filter(|(a, b)| a != b).count() as u32
        })
        .sum()
}

/// Recompute and store the cached fitness.
pub fn update(grid: &mut Grid) {
    let value = evaluate(grid);
    grid.set_fitness(value);
}
