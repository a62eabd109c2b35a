// Domain service interface for solving optimization problems.
// Any MIP backend that can take variables, linear rows and an objective can sit behind it.

use super::models::{OptimizationProblem, Solution, Terms};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// Implementations honour `problem.solver_config`: a `time_limit` must bound
/// the solve, and a solve that stops on it returns
/// [`SolutionStatus::TimeLimit`](super::SolutionStatus::TimeLimit) with or
/// without an incumbent instead of an error.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        if num_vars == 0 {
            errors.push("Problem must have at least one variable".to_string());
        }

        let mut check_terms = |owner: &str, terms: &Terms| {
            for &(var, coeff) in terms {
                if var.index() >= num_vars {
                    errors.push(format!(
                        "{} references variable {} but problem has {} variables",
                        owner,
                        var.index(),
                        num_vars
                    ));
                }
                if !coeff.is_finite() {
                    errors.push(format!(
                        "{} has non-finite coefficient for variable {}",
                        owner,
                        var.index()
                    ));
                }
            }
        };

        check_terms("Objective", &problem.objective.terms);
        for (i, constraint) in problem.constraints.iter().enumerate() {
            let owner = if constraint.name.is_empty() {
                format!("Constraint {}", i)
            } else {
                format!("Constraint {} '{}'", i, constraint.name)
            };
            check_terms(&owner, &constraint.terms);
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if !constraint.bound.is_finite() {
                errors.push(format!("Constraint {} has non-finite bound", i));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}
