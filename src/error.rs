use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    // Always a logic bug in the caller, never recovered from.
    #[error("cell ({row}, {col}) is fixed and cannot be changed")]
    FixedCellMutation { row: usize, col: usize },

    #[error("blueprint has conflicting fixed cells")]
    InvalidBlueprint,

    // Repair found a hole but no digit left to fill it with; cannot happen
    // for a 9-cell line with at most 9 distinct values.
    #[error("no replacement value available for cell ({row}, {col})")]
    NoReplacementValue { row: usize, col: usize },
}
