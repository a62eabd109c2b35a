// Domain layer: solver vocabulary, players and lineups
pub mod domain;

// Application layer: the lineup use case
pub mod application;

// Infrastructure layer: external concerns (CSV, config, rendering)
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

pub mod cli;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, Lineup, LineupError, LineupSlot, ObjectiveFunction,
    OptimizationProblem, OptimizationType, PlayerSeason, Position, Season, SlotAssignment,
    Solution, SolutionStatus, SolverBackend, SolverConfig, SolverError, SolverService, Stat,
    Variable, VariableType,
};

pub use application::{LineupOptimizer, LineupRequest};

pub use infrastructure::{Dataset, FileConfig, Settings};

#[cfg(feature = "coin-cbc")]
pub use solver::CoinCbcSolver;
pub use solver::{HighsSolver, SolverFactory};
