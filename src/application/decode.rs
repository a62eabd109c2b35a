// Turn a solver assignment back into a lineup and check it against the model.

use super::formulation::LineupModel;
use crate::domain::{
    Lineup, LineupError, LineupSlot, PlayerSeason, Position, SlotAssignment, Solution,
    LINEUP_SIZE,
};
use std::collections::HashSet;

/// Values above this count as a selected binary
const SELECTED: f64 = 0.5;
/// Slack allowed on the payroll row and the objective check
const TOLERANCE: f64 = 1e-6;

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn assignment(slot: LineupSlot, record: &PlayerSeason, model: &LineupModel<'_>) -> SlotAssignment {
    SlotAssignment {
        slot,
        player: record.name.clone(),
        salary: round_cents(record.salary),
        stat: record.stat(model.stat).trunc() as i64,
    }
}

/// Records whose variables are set in `values`
pub fn selected_records<'a>(model: &LineupModel<'a>, values: &[f64]) -> Vec<&'a PlayerSeason> {
    model
        .picks
        .iter()
        .zip(values)
        .filter(|(_, &value)| value > SELECTED)
        .map(|(record, _)| *record)
        .collect()
}

/// Decode a solved assignment into a lineup.
///
/// Outfielders are numbered in alphabetical order of name. The assignment is
/// checked against the lineup invariants and the solver's objective; any
/// mismatch is reported as `InconsistentSolution`.
pub fn decode(model: &LineupModel<'_>, solution: &Solution) -> Result<Lineup, LineupError> {
    let values = &solution.variable_values;
    if values.len() != model.picks.len() {
        return Err(LineupError::InconsistentSolution(format!(
            "expected {} variable values, got {}",
            model.picks.len(),
            values.len()
        )));
    }

    let selected = selected_records(model, values);
    if selected.len() != LINEUP_SIZE {
        return Err(LineupError::InconsistentSolution(format!(
            "{} players selected instead of {}",
            selected.len(),
            LINEUP_SIZE
        )));
    }

    let mut seen = HashSet::new();
    if let Some(twice) = selected.iter().find(|r| !seen.insert(r.name.as_str())) {
        return Err(LineupError::InconsistentSolution(format!(
            "{} selected at more than one position",
            twice.name
        )));
    }

    let mut slots = Vec::with_capacity(LINEUP_SIZE);
    for position in Position::ALL {
        let mut at_position: Vec<&PlayerSeason> = selected
            .iter()
            .copied()
            .filter(|r| r.position == position)
            .collect();
        if at_position.len() != position.quota() {
            return Err(LineupError::InconsistentSolution(format!(
                "{} players at {}, expected {}",
                at_position.len(),
                position,
                position.quota()
            )));
        }

        if position == Position::Outfield {
            at_position.sort_by(|a, b| a.name.cmp(&b.name));
            for (i, record) in at_position.iter().enumerate() {
                slots.push(assignment(LineupSlot::outfield(i as u8 + 1), record, model));
            }
        } else {
            slots.push(assignment(LineupSlot::single(position), at_position[0], model));
        }
    }

    let total_salary: f64 = selected.iter().map(|r| r.salary).sum();
    if total_salary > model.payroll + TOLERANCE {
        return Err(LineupError::InconsistentSolution(format!(
            "salary ${:.2}m exceeds payroll ${}m",
            total_salary, model.payroll
        )));
    }

    let stat_sum: f64 = selected.iter().map(|r| r.stat(model.stat)).sum();
    let total_stat = solution.optimal_value.ok_or_else(|| {
        LineupError::InconsistentSolution("solver reported no objective value".to_string())
    })?;
    if (stat_sum - total_stat).abs() > TOLERANCE * total_stat.abs().max(1.0) {
        return Err(LineupError::InconsistentSolution(format!(
            "selected players total {} {} but solver reported {}",
            stat_sum, model.stat, total_stat
        )));
    }

    Ok(Lineup {
        year: model.year,
        stat: model.stat,
        payroll: model.payroll,
        slots,
        total_salary,
        total_stat,
        gap: solution.gap,
        status: solution.status,
    })
}
