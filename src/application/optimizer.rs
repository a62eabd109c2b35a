// Lineup use case: validate, pre-check, formulate, solve, decode.

use super::decode::decode;
use super::feasibility::{minimum_roster, require_stat};
use super::formulation::formulate;
use crate::domain::{
    Lineup, LineupError, PlayerSeason, Season, SolutionStatus, SolverConfig, SolverError,
    SolverService, Stat,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parameters of one lineup request
#[derive(Debug, Clone, PartialEq)]
pub struct LineupRequest {
    pub year: u16,
    /// Payroll cap in millions
    pub payroll: f64,
    pub stat: Stat,
}

impl LineupRequest {
    pub fn new(year: u16, payroll: f64, stat: Stat) -> Self {
        Self {
            year,
            payroll,
            stat,
        }
    }

    /// Build a request from a stat code such as `"HR"`
    pub fn parse(year: u16, payroll: f64, stat: &str) -> Result<Self, LineupError> {
        let stat = stat.parse::<Stat>().map_err(LineupError::InvalidStat)?;
        Ok(Self::new(year, payroll, stat))
    }
}

/// Seasons present in `records`, ascending
pub fn available_years(records: &[PlayerSeason]) -> Vec<u16> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Runs lineup requests against one solver backend
pub struct LineupOptimizer {
    solver: Arc<dyn SolverService>,
    config: SolverConfig,
}

impl LineupOptimizer {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Optimize a lineup from the full dataset
    pub fn optimize(
        &self,
        records: &[PlayerSeason],
        request: &LineupRequest,
    ) -> Result<Lineup, LineupError> {
        validate_payroll(request.payroll)?;

        let years = available_years(records);
        if !years.contains(&request.year) {
            return Err(LineupError::InvalidYear {
                year: request.year,
                available: years,
            });
        }

        let season = Season::new(request.year, records.iter().cloned());
        self.optimize_season(&season, request)
    }

    /// Optimize a lineup from records already scoped to `request.year`
    pub fn optimize_season(
        &self,
        season: &Season,
        request: &LineupRequest,
    ) -> Result<Lineup, LineupError> {
        validate_payroll(request.payroll)?;
        if season.year() != request.year {
            return Err(LineupError::InvalidYear {
                year: request.year,
                available: vec![season.year()],
            });
        }

        require_stat(season, request.stat)?;
        let roster = minimum_roster(season)?;
        if !roster.fits(request.payroll) {
            warn!(
                payroll = request.payroll,
                minimum = roster.cost,
                "payroll below cheapest roster, skipping solve"
            );
            return Err(LineupError::PayrollInfeasible {
                payroll: request.payroll,
                minimum: roster.cost,
            });
        }

        let mut model = formulate(season, request.stat, request.payroll);
        model.problem.solver_config = self.config.clone();

        info!(
            "Solving {} lineup for {} with {} ({} players, {} variables)",
            request.stat,
            request.year,
            self.solver.name(),
            season.player_names().len(),
            model.problem.num_variables()
        );

        let solution = self.solver.solve(&model.problem)?;
        debug!(
            status = %solution.status,
            solve_time_ms = solution.statistics.solve_time_ms,
            "solver returned"
        );

        match solution.status {
            SolutionStatus::Infeasible => Err(LineupError::Infeasible),
            SolutionStatus::Unbounded => Err(LineupError::Solver(SolverError::ExecutionFailed(
                "lineup model reported unbounded".to_string(),
            ))),
            SolutionStatus::TimeLimit if !solution.has_incumbent() => Err(LineupError::Timeout {
                seconds: self.config.time_limit.unwrap_or_default(),
            }),
            _ if !solution.has_incumbent() => Err(LineupError::Solver(
                SolverError::ExecutionFailed(solution.message.clone()),
            )),
            _ => {
                let lineup = decode(&model, &solution)?;
                info!(
                    "Lineup found: {} {} for ${:.2}m (status {})",
                    lineup.total_stat, lineup.stat, lineup.total_salary, lineup.status
                );
                Ok(lineup)
            }
        }
    }
}

fn validate_payroll(payroll: f64) -> Result<(), LineupError> {
    if payroll.is_finite() && payroll > 0.0 {
        Ok(())
    } else {
        Err(LineupError::InvalidPayroll(payroll))
    }
}
