// Lineup integer program: one binary per (player, position), quotas, payroll cap.

use crate::domain::{
    Constraint, ObjectiveFunction, OptimizationProblem, PlayerSeason, Position, Season, Stat,
    Terms, Variable, VariableId, LINEUP_SIZE,
};
use std::collections::HashMap;
use tracing::debug;

/// A formulated lineup problem together with the record behind each variable.
#[derive(Debug, Clone)]
pub struct LineupModel<'a> {
    pub problem: OptimizationProblem,
    pub year: u16,
    pub stat: Stat,
    pub payroll: f64,
    /// `picks[i]` is the record variable `i` selects
    pub picks: Vec<&'a PlayerSeason>,
}

impl<'a> LineupModel<'a> {
    pub fn pick(&self, var: VariableId) -> Option<&'a PlayerSeason> {
        self.picks.get(var.index()).copied()
    }

    /// Variables of every (player, position) pair the player is eligible for
    pub fn variables_of(&self, player: &str) -> Vec<VariableId> {
        self.picks
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name == player)
            .map(|(i, _)| VariableId(i))
            .collect()
    }
}

/// Build the lineup model for `season`, maximizing `stat` under `payroll`.
pub fn formulate(season: &Season, stat: Stat, payroll: f64) -> LineupModel<'_> {
    let mut problem = OptimizationProblem::new(format!("lineup-{}-{}", season.year(), stat));
    let mut picks = Vec::with_capacity(season.len());

    let mut everyone: Terms = Vec::with_capacity(season.len());
    let mut salary: Terms = Vec::with_capacity(season.len());
    let mut objective: Terms = Vec::with_capacity(season.len());
    let mut by_position: HashMap<Position, Terms> = HashMap::new();
    let mut by_player: HashMap<&str, Terms> = HashMap::new();

    for record in season.records() {
        let var = problem.add_variable(Variable::binary(format!(
            "{}_{}",
            record.name, record.position
        )));
        picks.push(record);

        everyone.push((var, 1.0));
        salary.push((var, record.salary));
        objective.push((var, record.stat(stat)));
        by_position.entry(record.position).or_default().push((var, 1.0));
        by_player.entry(record.name.as_str()).or_default().push((var, 1.0));
    }

    problem.add_constraint(Constraint::eq(everyone, LINEUP_SIZE as f64).with_name("lineup_size"));

    for position in Position::ALL {
        let terms = by_position.remove(&position).unwrap_or_default();
        problem.add_constraint(
            Constraint::eq(terms, position.quota() as f64).with_name(format!("quota_{}", position)),
        );
    }

    for name in season.player_names() {
        let terms = by_player.remove(name).unwrap_or_default();
        problem.add_constraint(Constraint::leq(terms, 1.0).with_name(format!("once_{}", name)));
    }

    problem.add_constraint(Constraint::leq(salary, payroll).with_name("payroll"));
    problem.set_objective(ObjectiveFunction::maximize(objective));

    debug!(
        variables = problem.num_variables(),
        constraints = problem.constraints.len(),
        "lineup model formulated"
    );

    LineupModel {
        problem,
        year: season.year(),
        stat,
        payroll,
        picks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConstraintType, OptimizationType};

    fn two_position_season() -> Season {
        Season::new(
            2002,
            vec![
                PlayerSeason::new("Ann", 2002, Position::FirstBase, 2.5)
                    .with_stat(Stat::HomeRuns, 30.0),
                PlayerSeason::new("Ann", 2002, Position::Outfield, 2.5)
                    .with_stat(Stat::HomeRuns, 30.0),
                PlayerSeason::new("Bob", 2002, Position::Catcher, 1.0)
                    .with_stat(Stat::HomeRuns, 12.0),
            ],
        )
    }

    fn constraint<'m>(model: &'m LineupModel<'_>, name: &str) -> &'m Constraint {
        model
            .problem
            .constraints
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing constraint {}", name))
    }

    #[test]
    fn one_variable_per_player_position_pair() {
        let season = two_position_season();
        let model = formulate(&season, Stat::HomeRuns, 10.0);

        assert_eq!(model.problem.num_binary_variables(), 3);
        assert_eq!(model.variables_of("Ann").len(), 2);
        assert_eq!(model.variables_of("Bob").len(), 1);
        assert_eq!(model.problem.variables[0].name, "Ann_1B");
        assert_eq!(model.pick(VariableId(2)).unwrap().name, "Bob");
    }

    #[test]
    fn constraints_cover_size_quotas_players_and_payroll() {
        let season = two_position_season();
        let model = formulate(&season, Stat::HomeRuns, 10.0);

        // size + 7 quotas + 2 players + payroll
        assert_eq!(model.problem.constraints.len(), 11);

        let size = constraint(&model, "lineup_size");
        assert_eq!(size.constraint_type, ConstraintType::Equal);
        assert_eq!(size.bound, 9.0);
        assert_eq!(size.terms.len(), 3);

        let outfield = constraint(&model, "quota_OF");
        assert_eq!(outfield.bound, 3.0);
        assert_eq!(outfield.terms, vec![(VariableId(1), 1.0)]);

        let pitcher = constraint(&model, "quota_P");
        assert!(pitcher.terms.is_empty());
        assert_eq!(pitcher.bound, 1.0);

        let ann = constraint(&model, "once_Ann");
        assert_eq!(ann.constraint_type, ConstraintType::LessThanOrEqual);
        assert_eq!(ann.terms.len(), 2);

        let payroll = constraint(&model, "payroll");
        assert_eq!(payroll.bound, 10.0);
        assert_eq!(
            payroll.terms,
            vec![(VariableId(0), 2.5), (VariableId(1), 2.5), (VariableId(2), 1.0)]
        );
    }

    #[test]
    fn objective_maximizes_selected_stat() {
        let season = two_position_season();
        let model = formulate(&season, Stat::HomeRuns, 10.0);

        assert_eq!(
            model.problem.objective.optimization_type,
            OptimizationType::Maximize
        );
        assert_eq!(model.problem.objective_coefficients(), vec![30.0, 30.0, 12.0]);

        let by_games = formulate(&season, Stat::Games, 10.0);
        assert_eq!(by_games.problem.objective_coefficients(), vec![0.0, 0.0, 0.0]);
    }
}
