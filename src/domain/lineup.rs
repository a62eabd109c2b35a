// Decoded lineup and the errors a lineup request can end in.

use super::solver_service::SolverError;
use super::value_objects::{Position, SolutionStatus, Stat};
use serde::{Serialize, Serializer};
use std::fmt;

/// A lineup slot. Outfield slots carry an ordinal (1..=3), all others none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineupSlot {
    pub position: Position,
    pub ordinal: Option<u8>,
}

impl LineupSlot {
    pub fn single(position: Position) -> Self {
        Self {
            position,
            ordinal: None,
        }
    }

    pub fn outfield(ordinal: u8) -> Self {
        Self {
            position: Position::Outfield,
            ordinal: Some(ordinal),
        }
    }
}

impl fmt::Display for LineupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ordinal {
            Some(n) => write!(f, "{}_{}", self.position, n),
            None => write!(f, "{}", self.position),
        }
    }
}

impl Serialize for LineupSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The player filling one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAssignment {
    pub slot: LineupSlot,
    pub player: String,
    /// Salary in millions, rounded to cents
    pub salary: f64,
    /// Stat value truncated to a whole number
    pub stat: i64,
}

/// An optimized lineup for one season and statistic.
#[derive(Debug, Clone, Serialize)]
pub struct Lineup {
    pub year: u16,
    pub stat: Stat,
    pub payroll: f64,
    /// Assignments in display order: P, C, 1B, 2B, 3B, SS, OF_1..OF_3
    pub slots: Vec<SlotAssignment>,
    /// Sum of the selected players' unrounded salaries
    pub total_salary: f64,
    /// Objective value reported by the solver
    pub total_stat: f64,
    /// Relative optimality gap; `None` when the backend could not bound it
    pub gap: Option<f64>,
    pub status: SolutionStatus,
}

impl Lineup {
    pub fn at(&self, slot: LineupSlot) -> Option<&SlotAssignment> {
        self.slots.iter().find(|a| a.slot == slot)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|a| a.player.as_str())
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players().any(|p| p == player)
    }

    pub fn is_proven_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal && self.gap == Some(0.0)
    }
}

/// Why a lineup request produced no lineup
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("year {year} not available (dataset covers {available:?})")]
    InvalidYear { year: u16, available: Vec<u16> },

    #[error("payroll must be a positive number of millions, got {0}")]
    InvalidPayroll(f64),

    #[error("{0}")]
    InvalidStat(String),

    #[error("no {stat} data for {year}")]
    MissingStat { year: u16, stat: Stat },

    #[error("{position} needs {required} eligible players in {year} but only {available} exist")]
    PositionShortage {
        year: u16,
        position: Position,
        required: usize,
        available: usize,
    },

    #[error("payroll ${payroll}m is below the cheapest possible roster (${minimum:.2}m)")]
    PayrollInfeasible { payroll: f64, minimum: f64 },

    #[error("no lineup satisfies the roster and payroll constraints")]
    Infeasible,

    #[error("solver stopped after {seconds}s without finding a lineup")]
    Timeout { seconds: f64 },

    #[error("solver returned an inconsistent lineup: {0}")]
    InconsistentSolution(String),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
