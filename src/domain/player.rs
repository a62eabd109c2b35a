// Player-season records and the single-season view the optimizer works on.

use super::value_objects::{Position, Stat};
use std::collections::HashSet;
use tracing::warn;

/// One value per supported [`Stat`], indexed by `Stat::index`.
///
/// A stat that was never set reads as 0 but is not recorded, which tells a
/// genuine zero apart from a column the data never had.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatLine {
    values: [f64; Stat::ALL.len()],
    recorded: [bool; Stat::ALL.len()],
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> f64 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.values[stat.index()] = value;
        self.recorded[stat.index()] = true;
    }

    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    pub fn is_recorded(&self, stat: Stat) -> bool {
        self.recorded[stat.index()]
    }
}

/// A player's season at one eligible position.
///
/// A player eligible at several positions has one record per position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeason {
    pub name: String,
    pub year: u16,
    pub position: Position,
    /// Salary in millions
    pub salary: f64,
    pub stats: StatLine,
}

impl PlayerSeason {
    pub fn new(name: impl Into<String>, year: u16, position: Position, salary: f64) -> Self {
        Self {
            name: name.into(),
            year,
            position,
            salary,
            stats: StatLine::default(),
        }
    }

    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.stats.set(stat, value);
        self
    }

    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }

    pub fn has_stat(&self, stat: Stat) -> bool {
        self.stats.is_recorded(stat)
    }
}

/// All records of a single year, at most one per (player, position).
#[derive(Debug, Clone)]
pub struct Season {
    year: u16,
    records: Vec<PlayerSeason>,
}

impl Season {
    /// Keep the records of `year`. A repeated (player, position) pair keeps
    /// its first record.
    pub fn new(year: u16, records: impl IntoIterator<Item = PlayerSeason>) -> Self {
        let mut seen: HashSet<(String, Position)> = HashSet::new();
        let mut kept = Vec::new();

        for record in records.into_iter().filter(|r| r.year == year) {
            if !seen.insert((record.name.clone(), record.position)) {
                warn!(
                    "duplicate {} record for '{}' in {}, keeping the first",
                    record.position, record.name, year
                );
                continue;
            }
            kept.push(record);
        }

        Self {
            year,
            records: kept,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn records(&self) -> &[PlayerSeason] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records eligible at `position`
    pub fn at_position(&self, position: Position) -> impl Iterator<Item = &PlayerSeason> {
        self.records.iter().filter(move |r| r.position == position)
    }

    /// Distinct player names in first-appearance order
    pub fn player_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_filters_year_and_drops_duplicate_positions() {
        let records = vec![
            PlayerSeason::new("Ann", 2002, Position::FirstBase, 1.0),
            PlayerSeason::new("Ann", 2002, Position::Outfield, 1.0),
            PlayerSeason::new("Ann", 2002, Position::FirstBase, 9.0),
            PlayerSeason::new("Bob", 2003, Position::Catcher, 2.0),
        ];

        let season = Season::new(2002, records);
        assert_eq!(season.len(), 2);
        assert_eq!(season.player_names(), vec!["Ann"]);
        let first_base: Vec<_> = season.at_position(Position::FirstBase).collect();
        assert_eq!(first_base.len(), 1);
        assert_eq!(first_base[0].salary, 1.0);
    }

    #[test]
    fn stat_line_reads_back_by_stat() {
        let line = StatLine::default()
            .with(Stat::HomeRuns, 42.0)
            .with(Stat::GroundedIntoDoublePlays, 7.0);
        assert_eq!(line.get(Stat::HomeRuns), 42.0);
        assert_eq!(line.get(Stat::GroundedIntoDoublePlays), 7.0);
        assert_eq!(line.get(Stat::Games), 0.0);
        assert!(line.is_recorded(Stat::HomeRuns));
        assert!(!line.is_recorded(Stat::Games));
    }

    #[test]
    fn explicit_zero_is_recorded() {
        let record =
            PlayerSeason::new("Ann", 2002, Position::Pitcher, 1.0).with_stat(Stat::Triples, 0.0);
        assert!(record.has_stat(Stat::Triples));
        assert!(!record.has_stat(Stat::Doubles));
    }
}
