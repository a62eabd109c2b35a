use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolutionQuality, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolutionStatus as DomainSolutionStatus, VariableType},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;
use tracing::debug;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }

    /// Gap known for a finished search: 0 unless a tolerance let CBC stop early
    fn proven_gap(gap_tolerance: Option<f64>) -> Option<f64> {
        match gap_tolerance {
            Some(tolerance) if tolerance > 0.0 => None,
            _ => Some(0.0),
        }
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let config = &problem.solver_config;

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = problem
            .variables
            .iter()
            .map(|var_def| {
                let lower = var_def.lower_bound;
                let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
                match var_def.variable_type {
                    VariableType::Binary => vars.add(variable().binary()),
                    VariableType::Integer => vars.add(variable().integer().min(lower).max(upper)),
                    VariableType::Continuous => vars.add(variable().min(lower).max(upper)),
                }
            })
            .collect();

        let expression = |terms: &[(crate::domain::VariableId, f64)]| -> Expression {
            let mut expr: Expression = 0.into();
            for &(var, coeff) in terms {
                if coeff != 0.0 {
                    expr += coeff * lp_variables[var.index()];
                }
            }
            expr
        };

        let objective = expression(&problem.objective.terms);
        let unsolved = if problem.objective.is_maximize() {
            vars.maximise(objective)
        } else {
            vars.minimise(objective)
        };
        let mut lp_model = unsolved.using(coin_cbc::coin_cbc);

        for constraint in &problem.constraints {
            let lhs = expression(&constraint.terms);
            lp_model = match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(constraint.bound)),
                ConstraintType::Equal => lp_model.with(lhs.eq(constraint.bound)),
                ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(constraint.bound)),
            };
        }

        if !config.verbose {
            lp_model.set_parameter("log", "0");
        }
        if let Some(limit) = config.time_limit {
            lp_model.set_parameter("sec", &limit.to_string());
        }
        if let Some(gap) = config.gap_tolerance {
            lp_model.set_parameter("ratioGap", &gap.to_string());
        }

        let solution_result = lp_model.solve();
        let elapsed = start_time.elapsed().as_secs_f64();
        let statistics = SolverStatistics::for_problem(problem, elapsed * 1000.0);
        let hit_time_limit = config.time_limit.is_some_and(|limit| elapsed >= limit);

        debug!(
            problem = %problem.name,
            solve_time_ms = statistics.solve_time_ms,
            hit_time_limit,
            "CBC finished"
        );

        match solution_result {
            Ok(sol) => {
                let variable_values: Vec<f64> =
                    lp_variables.iter().map(|&var| sol.value(var)).collect();
                let actual_obj = problem.objective.evaluate(&variable_values);
                let quality = SolutionQuality::measure(problem, &variable_values);

                // good_lp exposes no CBC bound, so only a full search proves gap 0
                let solution = if hit_time_limit {
                    DomainSolution::time_limited(actual_obj, None, variable_values)
                } else {
                    DomainSolution::optimal(actual_obj, variable_values)
                        .with_gap(Self::proven_gap(config.gap_tolerance))
                        .with_message(format!("Optimal solution found for '{}'", problem.name))
                };
                Ok(solution.with_statistics(statistics).with_quality(quality))
            }
            Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Other(reason)) if hit_time_limit => Ok(DomainSolution::new(
                DomainSolutionStatus::TimeLimit,
                format!("CBC stopped on the time limit: {}", reason),
            )
            .with_statistics(statistics)),
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
