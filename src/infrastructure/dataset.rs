// Player-season CSV loading.
//
// One row per player, season and eligible position. Columns:
// FullName, yearID, POS, SalaryInMillions, then one column per batting stat.

use crate::domain::{PlayerSeason, Position, Season, Stat, StatLine};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("no usable player rows in {path}")]
    Empty { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Stat cells may be blank or absent.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawRow {
    FullName: String,
    yearID: u16,
    POS: String,
    SalaryInMillions: f64,
    #[serde(default)]
    G: Option<f64>,
    #[serde(default)]
    AB: Option<f64>,
    #[serde(default)]
    R: Option<f64>,
    #[serde(default)]
    H: Option<f64>,
    #[serde(default, rename = "2B")]
    doubles: Option<f64>,
    #[serde(default, rename = "3B")]
    triples: Option<f64>,
    #[serde(default)]
    HR: Option<f64>,
    #[serde(default)]
    RBI: Option<f64>,
    #[serde(default)]
    SB: Option<f64>,
    #[serde(default)]
    CS: Option<f64>,
    #[serde(default)]
    BB: Option<f64>,
    #[serde(default)]
    SO: Option<f64>,
    #[serde(default)]
    IBB: Option<f64>,
    #[serde(default)]
    HBP: Option<f64>,
    #[serde(default)]
    SH: Option<f64>,
    #[serde(default)]
    SF: Option<f64>,
    #[serde(default)]
    GIDP: Option<f64>,
}

impl RawRow {
    fn stat_cell(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Games => self.G,
            Stat::AtBats => self.AB,
            Stat::Runs => self.R,
            Stat::Hits => self.H,
            Stat::Doubles => self.doubles,
            Stat::Triples => self.triples,
            Stat::HomeRuns => self.HR,
            Stat::RunsBattedIn => self.RBI,
            Stat::StolenBases => self.SB,
            Stat::CaughtStealing => self.CS,
            Stat::Walks => self.BB,
            Stat::Strikeouts => self.SO,
            Stat::IntentionalWalks => self.IBB,
            Stat::HitByPitch => self.HBP,
            Stat::SacrificeHits => self.SH,
            Stat::SacrificeFlies => self.SF,
            Stat::GroundedIntoDoublePlays => self.GIDP,
        }
    }

    /// `columns` are the stats the header carries; blank cells in them read as 0.
    fn into_record(self, columns: &[Stat]) -> Option<PlayerSeason> {
        let name = self.FullName.trim().to_string();

        let position = match self.POS.parse::<Position>() {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping row for '{}': {}", name, e);
                return None;
            }
        };

        if !self.SalaryInMillions.is_finite() || self.SalaryInMillions < 0.0 {
            warn!(
                "skipping row for '{}': invalid salary {}",
                name, self.SalaryInMillions
            );
            return None;
        }

        let mut stats = StatLine::default();
        for &stat in columns {
            let value = match self.stat_cell(stat) {
                Some(value) if value.is_finite() => value,
                Some(_) => {
                    warn!("non-finite {} for '{}', reading as 0", stat, name);
                    0.0
                }
                None => 0.0,
            };
            stats.set(stat, value);
        }

        Some(PlayerSeason {
            name,
            year: self.yearID,
            position,
            salary: self.SalaryInMillions,
            stats,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every usable player-season-position row of a CSV file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PlayerSeason>,
}

impl Dataset {
    /// Load from a CSV file. Malformed rows are skipped with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(file).map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if dataset.is_empty() {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
            });
        }

        info!(
            "Loaded {} player rows covering {} seasons from {}",
            dataset.len(),
            dataset.years().len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader. Fails only when the header cannot be read.
    ///
    /// Stats without a header column stay unrecorded on every row.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(rdr);
        let headers = reader.headers()?;
        let columns: Vec<Stat> = Stat::ALL
            .into_iter()
            .filter(|stat| headers.iter().any(|h| h.trim() == stat.code()))
            .collect();
        if columns.len() < Stat::ALL.len() {
            debug!(
                "CSV carries {} of {} stat columns",
                columns.len(),
                Stat::ALL.len()
            );
        }

        let mut records = Vec::new();
        for result in reader.deserialize::<RawRow>() {
            match result {
                Ok(raw) => records.extend(raw.into_record(&columns)),
                Err(e) => warn!("skipping malformed player row: {}", e),
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PlayerSeason] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seasons present, ascending
    pub fn years(&self) -> BTreeSet<u16> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn season(&self, year: u16) -> Season {
        Season::new(year, self.records.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
FullName,yearID,teamID,POS,SalaryInMillions,G,AB,R,H,2B,3B,HR,RBI,SB,CS,BB,SO,IBB,HBP,SH,SF,GIDP
Barry Bonds,2002,SFN,OF,15.0,143,403,117,149,31,2,46,110,9,2,198,47,68,9,0,2,4
Jason Giambi,2002,NYA,1B,10.43,155,560,120,176,34,1,41,122,2,2,109,112,4,15,0,5,18
Jason Giambi,2002,NYA,OF,10.43,155,560,120,176,34,1,41,122,2,2,109,112,4,15,0,5,18
Pitcher Guy,2002,NYA,P,3.5,30,2,0,0,0,0,0,0,0,0,0,2,,,,,
Utility Man,2001,BOS,DH,1.0,100,300,40,80,10,1,5,30,3,1,20,50,0,1,0,2,6
Broken Row,2002,BOS,C,not-a-number,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1
";

    #[test]
    fn parses_rows_and_skips_bad_ones() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();

        // DH row and unparsable salary are dropped
        assert_eq!(dataset.len(), 4);
        let bonds = &dataset.records()[0];
        assert_eq!(bonds.name, "Barry Bonds");
        assert_eq!(bonds.position, Position::Outfield);
        assert_eq!(bonds.stat(Stat::HomeRuns), 46.0);
        assert_eq!(bonds.stat(Stat::Doubles), 31.0);
        assert_eq!(bonds.stat(Stat::GroundedIntoDoublePlays), 4.0);
    }

    #[test]
    fn blank_stat_cells_read_as_zero() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let pitcher = dataset
            .records()
            .iter()
            .find(|r| r.name == "Pitcher Guy")
            .unwrap();
        assert_eq!(pitcher.stat(Stat::IntentionalWalks), 0.0);
        assert!(pitcher.has_stat(Stat::IntentionalWalks));
        assert_eq!(pitcher.stat(Stat::Strikeouts), 2.0);
        assert_eq!(pitcher.salary, 3.5);
    }

    #[test]
    fn missing_stat_columns_stay_unrecorded() {
        let csv = "FullName,yearID,POS,SalaryInMillions,HR\nA,2002,C,1.0,7\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.stat(Stat::HomeRuns), 7.0);
        assert!(record.has_stat(Stat::HomeRuns));
        assert_eq!(record.stat(Stat::Runs), 0.0);
        assert!(!record.has_stat(Stat::Runs));
    }

    #[test]
    fn years_and_season_views() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.years().into_iter().collect::<Vec<_>>(), vec![2002]);

        let season = dataset.season(2002);
        assert_eq!(season.len(), 4);
        assert_eq!(season.player_names().len(), 3);
        assert!(dataset.season(2001).is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Dataset::load("/nonexistent/players.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
