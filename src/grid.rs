use anyhow::{bail, Result};
use once_cell::sync::Lazy;

use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    // a puzzle given; immutable for the life of the grid
    Fixed,
    // a solver-assigned digit
    Free,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    value: u8, // 0 = unassigned; 1..=9 digits
    kind: CellKind,
}

impl Cell {
    pub fn fixed(value: u8) -> Self { Self { value, kind: CellKind::Fixed } }
    pub fn free(value: u8) -> Self { Self { value, kind: CellKind::Free } }

    pub fn value(self) -> u8 { self.value }
    pub fn kind(self) -> CellKind { self.kind }
    pub fn is_fixed(self) -> bool { matches!(self.kind, CellKind::Fixed) }
    pub fn is_free(self) -> bool { matches!(self.kind, CellKind::Free) }
}

impl Default for Cell {
    fn default() -> Self { Self::free(0) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    pub(crate) cells: [[Cell; 9]; 9],
    // cached; stale after any cell write until fitness::update runs
    fitness: u32,
}

impl Grid {
    pub fn empty() -> Self {
        Self { cells: [[Cell::default(); 9]; 9], fitness: 0 }
    }

    pub fn from_compact(s: &str) -> Result<Self> {
        if s.len() != 81 { bail!("compact string must be 81 chars") }
        let mut g = Grid::empty();
        for (i, ch) in s.chars().enumerate() {
            g.cells[i / 9][i % 9] = match ch {
                '.' | '0' => Cell::free(0),
                '1'..='9' => Cell::fixed(ch as u8 - b'0'),
                _ => bail!("invalid char {ch}"),
            };
        }
        Ok(g)
    }

    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|c| if c.value == 0 { '.' } else { (b'0' + c.value) as char })
            .collect()
    }

    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        for r in 0..9 {
            if r % 3 == 0 { s.push_str("+-------+-------+-------+\n"); }
            for c in 0..9 {
                if c % 3 == 0 { s.push('|'); s.push(' '); }
                let v = self.cells[r][c].value;
                s.push(if v == 0 { '·' } else { (b'0' + v) as char });
                s.push(' ');
            }
            s.push('|'); s.push('\n');
        }
        s.push_str("+-------+-------+-------+\n");
        s
    }

    pub fn get(&self, row: usize, col: usize) -> Cell { self.cells[row][col] }

    /// Write a free cell's value. Fixed cells reject the write.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<(), EngineError> {
        let cell = &mut self.cells[row][col];
        if cell.is_fixed() {
            return Err(EngineError::FixedCellMutation { row, col });
        }
        cell.value = value;
        Ok(())
    }

    pub fn fitness(&self) -> u32 { self.fitness }
    pub fn set_fitness(&mut self, fitness: u32) { self.fitness = fitness; }

    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_fixed()).count()
    }

    pub fn values_at(&self, coords: &[(usize, usize); 9]) -> [u8; 9] {
        std::array::from_fn(|i| {
            let (row, col) = coords[i];
            self.cells[row][col].value
        })
    }
}

pub fn row_coords(row: usize) -> [(usize, usize); 9] {
    std::array::from_fn(|col| (row, col))
}

pub fn col_coords(col: usize) -> [(usize, usize); 9] {
    std::array::from_fn(|row| (row, col))
}

pub fn box_coords(band: usize, stack: usize) -> [(usize, usize); 9] {
    std::array::from_fn(|i| (band * 3 + i / 3, stack * 3 + i % 3))
}

// the 27 scoring/validation groups: 9 rows, 9 columns, 9 sub-squares
pub static ALL_GROUPS: Lazy<Vec<[(usize, usize); 9]>> = Lazy::new(|| {
    let mut groups = Vec::with_capacity(27);
    groups.extend((0..9).map(row_coords));
    groups.extend((0..9).map(col_coords));
    for band in 0..3 {
        for stack in 0..3 {
            groups.push(box_coords(band, stack));
        }
    }
    groups
});
