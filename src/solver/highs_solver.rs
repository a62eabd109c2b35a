// HiGHS adapter for SolverService.
// Translates the domain problem into a HiGHS row problem and maps the model status back.

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolutionQuality, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolutionStatus as DomainSolutionStatus},
};
use highs::{Col, HighsModelStatus, RowProblem, Sense};
use std::time::Instant;
use tracing::debug;

/// Largest violation accepted when checking an incumbent returned on a limit
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }

    fn build(problem: &OptimizationProblem) -> RowProblem {
        let mut pb = RowProblem::default();
        let coefficients = problem.objective_coefficients();

        let cols: Vec<Col> = problem
            .variables
            .iter()
            .zip(coefficients)
            .map(|(var_def, obj_coeff)| {
                let lower = var_def.lower_bound;
                let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
                if var_def.is_integer() {
                    pb.add_integer_column(obj_coeff, lower..=upper)
                } else {
                    pb.add_column(obj_coeff, lower..=upper)
                }
            })
            .collect();

        for constraint in &problem.constraints {
            let terms: Vec<(Col, f64)> = constraint
                .terms
                .iter()
                .filter(|&&(_, coeff)| coeff != 0.0)
                .map(|&(var, coeff)| (cols[var.index()], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        pb
    }

    fn sense(problem: &OptimizationProblem) -> Sense {
        if problem.objective.is_maximize() {
            Sense::Maximise
        } else {
            Sense::Minimise
        }
    }

    /// HiGHS reports an infinite gap when it has no bound
    fn reported_gap(mip_gap: f64) -> Option<f64> {
        (mip_gap.is_finite() && mip_gap >= 0.0).then_some(mip_gap)
    }

    fn is_usable_incumbent(problem: &OptimizationProblem, values: &[f64]) -> bool {
        values.len() == problem.num_variables()
            && problem.max_violation(values) <= FEASIBILITY_TOLERANCE
            && problem.max_integrality_violation(values) <= FEASIBILITY_TOLERANCE
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let config = &problem.solver_config;

        let pb = Self::build(problem);
        let mut model = pb.optimise(Self::sense(problem));
        model.set_option("output_flag", config.verbose);
        if let Some(limit) = config.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(gap) = config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model
            .try_solve()
            .map_err(|status| SolverError::ExecutionFailed(format!("HiGHS error: {:?}", status)))?;
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let statistics = SolverStatistics::for_problem(problem, solve_time);

        debug!(
            problem = %problem.name,
            status = ?solved.status(),
            solve_time_ms = solve_time,
            "HiGHS finished"
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let quality = SolutionQuality::measure(problem, &variable_values);

                // Optimal means within mip_rel_gap, not necessarily gap 0
                Ok(
                    DomainSolution::optimal(solved.objective_value(), variable_values)
                        .with_gap(Self::reported_gap(solved.mip_gap()))
                        .with_statistics(statistics)
                        .with_quality(quality)
                        .with_message(format!("Optimal solution found for '{}'", problem.name)),
                )
            }
            HighsModelStatus::Infeasible => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            HighsModelStatus::UnboundedOrInfeasible
                if problem.variables.iter().all(|v| v.upper_bound.is_some()) =>
            {
                // Every column is boxed, so the objective cannot run away
                Ok(DomainSolution::new(
                    DomainSolutionStatus::Infeasible,
                    "Problem is infeasible: no solution satisfies all constraints",
                )
                .with_statistics(statistics))
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(DomainSolution::new(
                    DomainSolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
                .with_statistics(statistics))
            }
            HighsModelStatus::ReachedTimeLimit => {
                let variable_values = solved.get_solution().columns().to_vec();
                if !Self::is_usable_incumbent(problem, &variable_values) {
                    return Ok(DomainSolution::new(
                        DomainSolutionStatus::TimeLimit,
                        "Time limit reached before a feasible solution was found",
                    )
                    .with_statistics(statistics));
                }

                let gap = Self::reported_gap(solved.mip_gap());
                let quality = SolutionQuality::measure(problem, &variable_values);

                Ok(DomainSolution::time_limited(solved.objective_value(), gap, variable_values)
                    .with_statistics(statistics)
                    .with_quality(quality))
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
