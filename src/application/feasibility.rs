// Payroll pre-check run before any model is built.
//
// The bound is greedy: it prices the cheapest players at each position
// independently. A player eligible at two positions can be counted twice, so
// passing the check does not guarantee the full model is feasible. Failing it
// does guarantee infeasibility.

use crate::domain::{LineupError, Position, Season, Stat};
use tracing::debug;

/// Cheapest way to fill every position quota, ignoring player overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumRoster {
    /// Sum of the cheapest salaries over all positions (millions)
    pub cost: f64,
}

impl MinimumRoster {
    pub fn fits(&self, payroll: f64) -> bool {
        self.cost <= payroll
    }
}

/// Price the cheapest roster the season allows.
///
/// Fails with `InvalidYear` when the season has no records and with
/// `PositionShortage` when a position has fewer eligible players than its quota.
pub fn minimum_roster(season: &Season) -> Result<MinimumRoster, LineupError> {
    if season.is_empty() {
        return Err(LineupError::InvalidYear {
            year: season.year(),
            available: Vec::new(),
        });
    }

    let mut cost = 0.0;
    for position in Position::ALL {
        let mut salaries: Vec<f64> = season.at_position(position).map(|r| r.salary).collect();
        let quota = position.quota();
        if salaries.len() < quota {
            return Err(LineupError::PositionShortage {
                year: season.year(),
                position,
                required: quota,
                available: salaries.len(),
            });
        }
        salaries.sort_by(f64::total_cmp);
        cost += salaries[..quota].iter().sum::<f64>();
    }

    debug!(year = season.year(), cost, "minimum roster priced");
    Ok(MinimumRoster { cost })
}

/// Fail with `MissingStat` when no record of the season carries `stat`.
///
/// Blank cells count as recorded zeros; only a stat the data never had fails.
pub fn require_stat(season: &Season, stat: Stat) -> Result<(), LineupError> {
    if season.records().iter().any(|r| r.has_stat(stat)) {
        Ok(())
    } else {
        Err(LineupError::MissingStat {
            year: season.year(),
            stat,
        })
    }
}

/// Whether the cheapest roster fits under `payroll`.
pub fn check_roster_possible(season: &Season, payroll: f64) -> Result<bool, LineupError> {
    Ok(minimum_roster(season)?.fits(payroll))
}
