pub mod error;
pub mod fitness;
pub mod grid;
pub mod logger;
pub mod ops;
pub mod solver;

pub use error::EngineError;
pub use fitness::FITNESS_GOAL;
pub use grid::{Cell, CellKind, Grid};
pub use solver::{reset_point, validate, Solver, SolverConfig};
