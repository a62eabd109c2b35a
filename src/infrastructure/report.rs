// Console and JSON rendering of an optimized lineup.

use crate::domain::Lineup;
use std::fmt;

const SEPARATOR: &str = "----------------";

/// Console layout of a lineup: one line per slot, then totals and gap.
pub struct TextReport<'a>(pub &'a Lineup);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lineup = self.0;
        let stat = lineup.stat.code();

        writeln!(f, "===")?;
        writeln!(
            f,
            "Lineup: {} {} under ${}m",
            lineup.year, stat, lineup.payroll
        )?;
        for assignment in &lineup.slots {
            writeln!(
                f,
                "({}) {} - {} {} (${:.2}m)",
                assignment.slot.position,
                assignment.player,
                assignment.stat,
                stat,
                assignment.salary
            )?;
        }
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(
            f,
            "Totals: {} {} (${:.2}m)",
            lineup.total_stat.trunc() as i64,
            stat,
            lineup.total_salary
        )?;
        match lineup.gap {
            Some(gap) => writeln!(f, "Gap from the optimal solution: {}", gap),
            None => writeln!(f, "Gap from the optimal solution: unknown"),
        }
    }
}

pub fn render_text(lineup: &Lineup) -> String {
    TextReport(lineup).to_string()
}

pub fn render_json(lineup: &Lineup) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(lineup)
}
