use super::value_objects::{
    ConstraintType, OptimizationType, SolutionStatus, SolverBackend, VariableType,
};

/// Handle to a variable inside one `OptimizationProblem`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub usize);

impl VariableId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Decision variable in an optimization problem
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: Some(1.0),
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

/// Sparse linear expression: (variable, coefficient) pairs
pub type Terms = Vec<(VariableId, f64)>;

fn evaluate_terms(terms: &[(VariableId, f64)], values: &[f64]) -> f64 {
    terms
        .iter()
        .map(|&(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
        .sum()
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub optimization_type: OptimizationType,
    pub terms: Terms,
}

impl ObjectiveFunction {
    pub fn new(optimization_type: OptimizationType, terms: Terms) -> Self {
        Self {
            optimization_type,
            terms,
        }
    }

    pub fn maximize(terms: Terms) -> Self {
        Self::new(OptimizationType::Maximize, terms)
    }

    pub fn minimize(terms: Terms) -> Self {
        Self::new(OptimizationType::Minimize, terms)
    }

    pub fn is_maximize(&self) -> bool {
        self.optimization_type == OptimizationType::Maximize
    }

    /// Objective value for a full assignment of variable values
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        evaluate_terms(&self.terms, values)
    }
}

impl Default for ObjectiveFunction {
    fn default() -> Self {
        Self::minimize(Vec::new())
    }
}

/// Linear constraint on variables
#[derive(Debug, Clone)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    pub terms: Terms,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(constraint_type: ConstraintType, terms: Terms, bound: f64) -> Self {
        Self {
            constraint_type,
            terms,
            bound,
            name: String::new(),
        }
    }

    pub fn leq(terms: Terms, bound: f64) -> Self {
        Self::new(ConstraintType::LessThanOrEqual, terms, bound)
    }

    pub fn eq(terms: Terms, bound: f64) -> Self {
        Self::new(ConstraintType::Equal, terms, bound)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Amount by which `values` violates this constraint (0 when satisfied)
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = evaluate_terms(&self.terms, values);
        match self.constraint_type {
            ConstraintType::LessThanOrEqual => (lhs - self.bound).max(0.0),
            ConstraintType::Equal => (lhs - self.bound).abs(),
            ConstraintType::GreaterThanOrEqual => (self.bound - lhs).max(0.0),
        }
    }
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit in seconds; `None` lets the solver run to completion
    pub time_limit: Option<f64>,
    /// Relative MIP gap at which the solver may stop
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit: None,
            gap_tolerance: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

/// Complete optimization problem
///
/// Variables are created first through [`OptimizationProblem::add_variable`];
/// the returned ids are then referenced by constraints and the objective.
#[derive(Debug, Clone, Default)]
pub struct OptimizationProblem {
    pub name: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
    pub solver_config: SolverConfig,
}

impl OptimizationProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        self.variables.push(variable);
        VariableId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: ObjectiveFunction) {
        self.objective = objective;
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn num_binary_variables(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.variable_type == VariableType::Binary)
            .count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }

    /// Dense objective coefficient per variable, in variable order
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coefficients = vec![0.0; self.num_variables()];
        for &(var, coeff) in &self.objective.terms {
            if let Some(slot) = coefficients.get_mut(var.index()) {
                *slot += coeff;
            }
        }
        coefficients
    }

    /// Largest constraint or bound violation of an assignment
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let rows = self
            .constraints
            .iter()
            .map(|c| c.violation(values))
            .fold(0.0_f64, f64::max);

        let bounds = self
            .variables
            .iter()
            .zip(values)
            .map(|(var, &value)| {
                let below = (var.lower_bound - value).max(0.0);
                let above = var.upper_bound.map_or(0.0, |ub| (value - ub).max(0.0));
                below.max(above)
            })
            .fold(0.0_f64, f64::max);

        rows.max(bounds)
    }

    /// Largest distance of an integer variable from the nearest integer
    pub fn max_integrality_violation(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .filter(|(var, _)| var.is_integer())
            .map(|(_, &value)| (value - value.round()).abs())
            .fold(0.0_f64, f64::max)
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_integer_vars: u32,
    pub num_binary_vars: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &OptimizationProblem, solve_time_ms: f64) -> Self {
        Self {
            solve_time_ms,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.constraints.len() as u32,
            num_integer_vars: problem.num_integer_variables() as u32,
            num_binary_vars: problem.num_binary_variables() as u32,
        }
    }
}

/// Quality metrics for the solution
#[derive(Debug, Clone, Default)]
pub struct SolutionQuality {
    pub max_constraint_violation: f64,
    pub max_integrality_violation: f64,
}

impl SolutionQuality {
    pub fn measure(problem: &OptimizationProblem, values: &[f64]) -> Self {
        Self {
            max_constraint_violation: problem.max_violation(values),
            max_integrality_violation: problem.max_integrality_violation(values),
        }
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub optimal_value: Option<f64>,
    /// Relative gap reported by the solver; 0 when proven optimal, `None` when unknown
    pub gap: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
    pub quality: SolutionQuality,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            optimal_value: None,
            gap: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
            quality: SolutionQuality::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            optimal_value: Some(value),
            gap: Some(0.0),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
            quality: SolutionQuality::default(),
        }
    }

    /// Incumbent from a solve that stopped before proving optimality
    pub fn time_limited(value: f64, gap: Option<f64>, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::TimeLimit,
            optimal_value: Some(value),
            gap,
            variable_values,
            message: "Time limit reached with a feasible incumbent".to_string(),
            statistics: SolverStatistics::default(),
            quality: SolutionQuality::default(),
        }
    }

    /// Replace the gap, for solvers that stop within a tolerance
    pub fn with_gap(mut self, gap: Option<f64>) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_quality(mut self, quality: SolutionQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Whether the solution carries a usable assignment
    pub fn has_incumbent(&self) -> bool {
        matches!(
            self.status,
            SolutionStatus::Optimal | SolutionStatus::Feasible | SolutionStatus::TimeLimit
        ) && !self.variable_values.is_empty()
    }
}
