// Domain value objects: solver vocabulary plus the baseball positions and stats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of decision variable in the optimization problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous real number (x ∈ ℝ)
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    Minimize,
    Maximize,
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolutionStatus {
    /// Proven optimal solution
    Optimal,
    /// Feasible solution, optimality not proven
    Feasible,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached; an incumbent may or may not be attached
    TimeLimit,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Feasible => write!(f, "Feasible"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    /// Automatically select best solver
    #[default]
    Auto,
    /// HiGHS solver
    Highs,
    /// COIN-OR CBC solver
    #[serde(alias = "coin-cbc", alias = "coin_cbc")]
    Cbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::Cbc => write!(f, "COIN-OR CBC"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "highs" => Ok(SolverBackend::Highs),
            "cbc" | "coin-cbc" | "coin_cbc" => Ok(SolverBackend::Cbc),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

/// Fielding positions a lineup is built from.
///
/// Outfield is a single position with a quota of three; the three slots are
/// interchangeable and only get numbered when a lineup is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    ShortStop,
    #[serde(rename = "OF")]
    Outfield,
}

impl Position {
    /// Every position, in lineup display order.
    pub const ALL: [Position; 7] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::ShortStop,
        Position::Outfield,
    ];

    /// Number of players a lineup must field at this position.
    pub fn quota(self) -> usize {
        match self {
            Position::Outfield => 3,
            _ => 1,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::ShortStop => "SS",
            Position::Outfield => "OF",
        }
    }
}

/// Total number of players in a lineup (sum of all position quotas).
pub const LINEUP_SIZE: usize = 9;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Position::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| format!("unknown position '{}'", s.trim()))
    }
}

/// Batting statistics a lineup can be optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stat {
    #[serde(rename = "G")]
    Games,
    #[serde(rename = "AB")]
    AtBats,
    #[serde(rename = "R")]
    Runs,
    #[serde(rename = "H")]
    Hits,
    #[serde(rename = "2B")]
    Doubles,
    #[serde(rename = "3B")]
    Triples,
    #[serde(rename = "HR")]
    HomeRuns,
    #[serde(rename = "RBI")]
    RunsBattedIn,
    #[serde(rename = "SB")]
    StolenBases,
    #[serde(rename = "CS")]
    CaughtStealing,
    #[serde(rename = "BB")]
    Walks,
    #[serde(rename = "SO")]
    Strikeouts,
    #[serde(rename = "IBB")]
    IntentionalWalks,
    #[serde(rename = "HBP")]
    HitByPitch,
    #[serde(rename = "SH")]
    SacrificeHits,
    #[serde(rename = "SF")]
    SacrificeFlies,
    #[serde(rename = "GIDP")]
    GroundedIntoDoublePlays,
}

impl Stat {
    pub const ALL: [Stat; 17] = [
        Stat::Games,
        Stat::AtBats,
        Stat::Runs,
        Stat::Hits,
        Stat::Doubles,
        Stat::Triples,
        Stat::HomeRuns,
        Stat::RunsBattedIn,
        Stat::StolenBases,
        Stat::CaughtStealing,
        Stat::Walks,
        Stat::Strikeouts,
        Stat::IntentionalWalks,
        Stat::HitByPitch,
        Stat::SacrificeHits,
        Stat::SacrificeFlies,
        Stat::GroundedIntoDoublePlays,
    ];

    /// Column header used for this stat in the dataset.
    pub fn code(self) -> &'static str {
        match self {
            Stat::Games => "G",
            Stat::AtBats => "AB",
            Stat::Runs => "R",
            Stat::Hits => "H",
            Stat::Doubles => "2B",
            Stat::Triples => "3B",
            Stat::HomeRuns => "HR",
            Stat::RunsBattedIn => "RBI",
            Stat::StolenBases => "SB",
            Stat::CaughtStealing => "CS",
            Stat::Walks => "BB",
            Stat::Strikeouts => "SO",
            Stat::IntentionalWalks => "IBB",
            Stat::HitByPitch => "HBP",
            Stat::SacrificeHits => "SH",
            Stat::SacrificeFlies => "SF",
            Stat::GroundedIntoDoublePlays => "GIDP",
        }
    }

    /// Position of this stat inside a `StatLine`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Stat::ALL
            .into_iter()
            .find(|stat| stat.code() == code)
            .ok_or_else(|| format!("unknown statistic '{}'", s.trim()))
    }
}
