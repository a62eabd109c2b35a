// End-to-end lineup properties against the HiGHS backend.

use lineupopt::application::{check_roster_possible, formulate};
use lineupopt::domain::LINEUP_SIZE;
use lineupopt::{
    Dataset, HighsSolver, LineupError, LineupOptimizer, LineupRequest, LineupSlot, PlayerSeason,
    Position, Season, SolutionStatus, SolverConfig, SolverService, Stat,
};
use std::collections::HashSet;
use std::sync::Arc;

const YEAR: u16 = 2002;

const INFIELD: [Position; 6] = [
    Position::Pitcher,
    Position::Catcher,
    Position::FirstBase,
    Position::SecondBase,
    Position::ThirdBase,
    Position::ShortStop,
];

fn player(name: &str, position: Position, salary: f64, hr: f64) -> PlayerSeason {
    PlayerSeason::new(name, YEAR, position, salary).with_stat(Stat::HomeRuns, hr)
}

fn optimizer() -> LineupOptimizer {
    LineupOptimizer::new(Arc::new(HighsSolver::new()))
}

/// Two candidates per infield position and four outfielders.
/// The star at each position costs more than the backup.
fn contested_records() -> Vec<PlayerSeason> {
    let mut rows = Vec::new();
    for (i, &position) in INFIELD.iter().enumerate() {
        let step = i as f64;
        let star = format!("{} star", position);
        rows.push(player(&star, position, 3.0 + step * 0.5, 30.0 + step * 2.0));
        rows.push(player(&format!("{} backup", position), position, 1.0, 10.0 + step));
    }
    rows.push(player("Alou", Position::Outfield, 6.0, 40.0));
    rows.push(player("Bonds", Position::Outfield, 9.0, 46.0));
    rows.push(player("Cruz", Position::Outfield, 1.5, 12.0));
    rows.push(player("Dye", Position::Outfield, 2.0, 18.0));
    rows
}

/// Best home run total over every valid roster, by enumeration
fn brute_force_best(records: &[PlayerSeason], payroll: f64) -> f64 {
    let by_position: Vec<Vec<&PlayerSeason>> = INFIELD
        .iter()
        .map(|&p| records.iter().filter(|r| r.position == p).collect())
        .collect();
    let outfield: Vec<&PlayerSeason> = records
        .iter()
        .filter(|r| r.position == Position::Outfield)
        .collect();

    let mut best = f64::NEG_INFINITY;
    let combos: usize = by_position.iter().map(|c| c.len()).product();
    for mut code in 0..combos {
        let mut salary = 0.0;
        let mut total = 0.0;
        for candidates in &by_position {
            let pick = candidates[code % candidates.len()];
            code /= candidates.len();
            salary += pick.salary;
            total += pick.stat(Stat::HomeRuns);
        }
        for a in 0..outfield.len() {
            for b in a + 1..outfield.len() {
                for c in b + 1..outfield.len() {
                    let trio = [outfield[a], outfield[b], outfield[c]];
                    let s: f64 = salary + trio.iter().map(|r| r.salary).sum::<f64>();
                    let t: f64 = total + trio.iter().map(|r| r.stat(Stat::HomeRuns)).sum::<f64>();
                    if s <= payroll + 1e-9 && t > best {
                        best = t;
                    }
                }
            }
        }
    }
    best
}

#[test]
fn solved_lineup_respects_roster_rules() {
    let records = contested_records();
    let request = LineupRequest::new(YEAR, 25.0, Stat::HomeRuns);
    let lineup = optimizer().optimize(&records, &request).unwrap();

    assert_eq!(lineup.slots.len(), LINEUP_SIZE);
    for position in INFIELD {
        assert!(lineup.at(LineupSlot::single(position)).is_some());
    }
    for n in 1..=3 {
        assert!(lineup.at(LineupSlot::outfield(n)).is_some());
    }

    let distinct: HashSet<&str> = lineup.players().collect();
    assert_eq!(distinct.len(), LINEUP_SIZE);
    assert!(lineup.total_salary <= 25.0 + 1e-6);
}

#[test]
fn solved_lineup_is_optimal_and_totals_match() {
    let records = contested_records();
    let payroll = 25.0;
    let lineup = optimizer()
        .optimize(&records, &LineupRequest::new(YEAR, payroll, Stat::HomeRuns))
        .unwrap();

    let slot_total: i64 = lineup.slots.iter().map(|a| a.stat).sum();
    assert_eq!(slot_total as f64, lineup.total_stat.round());
    assert!((lineup.total_stat - brute_force_best(&records, payroll)).abs() < 1e-6);
    assert_eq!(lineup.status, SolutionStatus::Optimal);
    // HiGHS reports its own gap, within its default 1e-4 tolerance
    assert!(lineup.gap.is_some_and(|gap| gap <= 1e-4));
}

#[test]
fn loose_gap_tolerance_never_claims_proven_optimality_falsely() {
    let records = contested_records();
    let payroll = 25.0;
    let best = brute_force_best(&records, payroll);
    let config = SolverConfig {
        gap_tolerance: Some(0.5),
        ..SolverConfig::default()
    };
    let lineup = optimizer()
        .with_config(config)
        .optimize(&records, &LineupRequest::new(YEAR, payroll, Stat::HomeRuns))
        .unwrap();

    let gap = lineup.gap.expect("HiGHS reports a gap for a MIP");
    assert!(gap <= 0.5 + 1e-9);
    if lineup.total_stat < best - 1e-6 {
        assert!(gap > 0.0);
        assert!(!lineup.is_proven_optimal());
    }
    assert_eq!(lineup.is_proven_optimal(), gap == 0.0);
}

#[test]
fn outfielders_are_numbered_alphabetically() {
    // Enough money for the three best outfielders
    let lineup = optimizer()
        .optimize(&contested_records(), &LineupRequest::new(YEAR, 100.0, Stat::HomeRuns))
        .unwrap();

    let outfield: Vec<&str> = (1..=3)
        .map(|n| lineup.at(LineupSlot::outfield(n)).unwrap().player.as_str())
        .collect();
    assert_eq!(outfield, vec!["Alou", "Bonds", "Dye"]);
    assert_eq!(lineup.at(LineupSlot::outfield(2)).unwrap().stat, 46);
}

#[test]
fn exact_roster_under_cap_selects_everyone() {
    let mut records: Vec<PlayerSeason> = INFIELD
        .iter()
        .enumerate()
        .map(|(i, &p)| player(&format!("only {}", p), p, 1.0, i as f64 + 1.0))
        .collect();
    records.push(player("Ott", Position::Outfield, 1.0, 10.0));
    records.push(player("Mays", Position::Outfield, 1.0, 20.0));
    records.push(player("Ruth", Position::Outfield, 1.0, 30.0));

    let lineup = optimizer()
        .optimize(&records, &LineupRequest::new(YEAR, 9.0, Stat::HomeRuns))
        .unwrap();

    for record in &records {
        assert!(lineup.contains(&record.name), "{} missing", record.name);
    }
    assert!((lineup.total_stat - 81.0).abs() < 1e-6);
    assert!((lineup.total_salary - 9.0).abs() < 1e-9);
    assert!(lineup.gap.is_some_and(|gap| gap <= 1e-4));
}

#[test]
fn two_position_player_is_selected_once() {
    let mut records = contested_records();
    // Best first baseman and best outfielder at once
    records.push(player("Giambi", Position::FirstBase, 2.0, 60.0));
    records.push(player("Giambi", Position::Outfield, 2.0, 60.0));

    let lineup = optimizer()
        .optimize(&records, &LineupRequest::new(YEAR, 100.0, Stat::HomeRuns))
        .unwrap();

    assert_eq!(lineup.players().filter(|&p| p == "Giambi").count(), 1);
}

#[test]
fn overlap_that_defeats_the_pre_check_is_infeasible() {
    // Only three outfield rows and one of them is the sole first baseman
    let mut records: Vec<PlayerSeason> = INFIELD
        .iter()
        .filter(|&&p| p != Position::FirstBase)
        .map(|&p| player(&format!("only {}", p), p, 1.0, 5.0))
        .collect();
    records.push(player("Dual", Position::FirstBase, 1.0, 20.0));
    records.push(player("Dual", Position::Outfield, 1.0, 20.0));
    records.push(player("Xavier", Position::Outfield, 1.0, 10.0));
    records.push(player("Yount", Position::Outfield, 1.0, 10.0));

    let season = Season::new(YEAR, records.clone());
    assert!(check_roster_possible(&season, 50.0).unwrap());

    let result = optimizer().optimize(&records, &LineupRequest::new(YEAR, 50.0, Stat::HomeRuns));
    assert!(matches!(result, Err(LineupError::Infeasible)), "got {:?}", result);
}

#[test]
fn failed_pre_check_means_the_model_is_infeasible() {
    let records = contested_records();
    let season = Season::new(YEAR, records.clone());
    // Cheapest roster: six backups at 1.0 plus Cruz, Dye and Alou = 15.5
    let payroll = 15.0;
    assert!(!check_roster_possible(&season, payroll).unwrap());

    let model = formulate(&season, Stat::HomeRuns, payroll);
    let solution = HighsSolver::new().solve(&model.problem).unwrap();
    assert_eq!(solution.status, SolutionStatus::Infeasible);

    assert!(matches!(
        optimizer().optimize(&records, &LineupRequest::new(YEAR, payroll, Stat::HomeRuns)),
        Err(LineupError::PayrollInfeasible { .. })
    ));
}

#[test]
fn csv_dataset_runs_end_to_end() {
    let mut csv = String::from("FullName,yearID,POS,SalaryInMillions,HR,SB\n");
    for (i, position) in ["P", "C", "1B", "2B", "3B", "SS"].iter().enumerate() {
        csv.push_str(&format!("Player {},2002,{},1.5,{},{}\n", i, position, i * 3, 10 - i));
        csv.push_str(&format!("Cheap {},2002,{},0.5,{},{}\n", i, position, i, i));
    }
    csv.push_str("Out A,2002,OF,2.0,30,1\n");
    csv.push_str("Out B,2002,OF,2.0,25,2\n");
    csv.push_str("Out C,2002,OF,0.5,5,40\n");
    csv.push_str("Out D,2002,OF,0.5,4,35\n");
    csv.push_str("Old Star,1995,OF,0.1,70,0\n");

    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let request = LineupRequest::parse(2002, 12.0, "SB").unwrap();
    let lineup = optimizer().optimize(dataset.records(), &request).unwrap();

    assert_eq!(lineup.stat, Stat::StolenBases);
    assert!(!lineup.contains("Old Star"));
    assert!(lineup.contains("Out C") && lineup.contains("Out D"));
    assert!(lineup.total_salary <= 12.0 + 1e-6);

    match optimizer().optimize(dataset.records(), &LineupRequest::new(2003, 12.0, Stat::HomeRuns)) {
        Err(LineupError::InvalidYear { available, .. }) => assert_eq!(available, vec![1995, 2002]),
        other => panic!("expected invalid year, got {:?}", other),
    }
}

#[test]
fn csv_without_the_requested_stat_column_is_rejected() {
    let mut csv = String::from("FullName,yearID,POS,SalaryInMillions,SB\n");
    for (i, code) in ["P", "C", "1B", "2B", "3B", "SS", "OF", "OF", "OF"].iter().enumerate() {
        csv.push_str(&format!("Player {},2002,{},1.0,{}\n", i, code, i));
    }
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

    match optimizer().optimize(dataset.records(), &LineupRequest::new(YEAR, 50.0, Stat::HomeRuns)) {
        Err(LineupError::MissingStat { year, stat }) => {
            assert_eq!(year, YEAR);
            assert_eq!(stat, Stat::HomeRuns);
        }
        other => panic!("expected missing stat, got {:?}", other),
    }

    // The column that is present still solves
    let lineup = optimizer()
        .optimize(dataset.records(), &LineupRequest::new(YEAR, 50.0, Stat::StolenBases))
        .unwrap();
    assert!((lineup.total_stat - 36.0).abs() < 1e-6);
}
