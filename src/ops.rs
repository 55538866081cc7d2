use rand::{seq::SliceRandom, Rng};

use crate::error::EngineError;
use crate::grid::{col_coords, row_coords, Grid};

/// Repair duplicate values line by line: rows first, then columns, so the
/// column pass sees row-repaired values. Fixed cells are never touched, and
/// conflicts between a line and its perpendicular lines are left for fitness
/// scoring and later generations to resolve.
pub fn remove_repetition<R: Rng>(grid: &mut Grid, rng: &mut R) -> Result<(), EngineError> {
    for row in 0..9 {
        repair_line(grid, &row_coords(row), rng)?;
    }
    for col in 0..9 {
        repair_line(grid, &col_coords(col), rng)?;
    }
    Ok(())
}

fn repair_line<R: Rng>(
    grid: &mut Grid,
    line: &[(usize, usize); 9],
    rng: &mut R,
) -> Result<(), EngineError> {
    // Zero out free cells holding over-represented values. The decrement
    // leaves exactly one occurrence of each duplicated value in place.
    let mut counts = [0u8; 10];
    for &(row, col) in line {
        counts[grid.get(row, col).value() as usize] += 1;
    }
    for &(row, col) in line {
        let cell = grid.get(row, col);
        let value = cell.value() as usize;
        if counts[value] > 1 && cell.is_free() {
            counts[value] -= 1;
            grid.set(row, col, 0)?;
        }
    }
    // Refill the holes, recomputing the missing set per cell so successive
    // fills see each other and the line ends with no zeros.
    for &(row, col) in line {
        if grid.get(row, col).value() == 0 {
            let pool = missing_values(grid, line);
            let value = pool
                .choose(rng)
                .copied()
                .ok_or(EngineError::NoReplacementValue { row, col })?;
            grid.set(row, col, value)?;
        }
    }
    Ok(())
}

fn missing_values(grid: &Grid, line: &[(usize, usize); 9]) -> Vec<u8> {
    let mut present = [false; 10];
    for &(row, col) in line {
        present[grid.get(row, col).value() as usize] = true;
    }
    (1..=9).filter(|&v| !present[v as usize]).collect()
}

/// Row-granular uniform crossover: each row of `source` overwrites the same
/// row of `target` with probability 0.8. One-directional; the copy includes
/// fixed cells, whose values line up because both grids derive from the same
/// blueprint.
pub fn crossover<R: Rng>(source: &Grid, target: &mut Grid, rng: &mut R) {
    for row in 0..9 {
        if rng.gen_range(1..=10) <= 8 {
            target.cells[row] = source.cells[row];
        }
    }
}

/// Per-cell mutation: with probability 0.2 a free cell takes a fresh uniform
/// digit, which may reintroduce duplicates for the next repair pass to clean
/// up. Every cell consumes a draw; only free cells are written.
pub fn mutate<R: Rng>(grid: &mut Grid, rng: &mut R) -> Result<(), EngineError> {
    for row in 0..9 {
        for col in 0..9 {
            let draw = rng.gen_range(1..=10);
            if draw <= 2 && grid.get(row, col).is_free() {
                grid.set(row, col, rng.gen_range(1..=9))?;
            }
        }
    }
    Ok(())
}

/// Generational elitism: merge two same-size populations and keep the fitter
/// half, by cached fitness (stable on ties).
pub fn next_generation(before: Vec<Grid>, after: Vec<Grid>) -> Vec<Grid> {
    let mut pool = before;
    pool.extend(after);
    pool.sort_by_key(Grid::fitness);
    let half = pool.len() / 2;
    pool.split_off(half)
}
