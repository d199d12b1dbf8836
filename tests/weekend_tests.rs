mod common;

use common::weekend_roster;
use skijump::config::Config;
use skijump::core_types::Hill;
use skijump::event::EventKind;
use skijump::weekend::{Weekend, WeekendReport, WEEKEND_DAYS};

fn run(seed: u64, n: usize) -> WeekendReport {
    let config = Config::default();
    let weekend = Weekend::new(&config, Hill::new(120.0, 137.0, 1.0)).unwrap();
    let mut rng = fastrand::Rng::with_seed(seed);
    weekend.run(&weekend_roster(n), &mut rng).unwrap()
}

#[test]
fn test_program_shape() {
    let report = run(42, 60);
    assert_eq!(report.steps.len(), WEEKEND_DAYS * 4);

    let kinds: Vec<EventKind> = report.steps[..4].iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Training,
            EventKind::Qualification,
            EventKind::Trial,
            EventKind::Individual
        ]
    );
    assert_eq!(report.steps[0].label, "Day 1 Training");
    assert_eq!(report.steps[7].label, "Day 2 Competition");
    assert!(report.steps.iter().all(|s| s.day == 1 || s.day == 2));
}

#[test]
fn test_steps_rank_their_rows() {
    let report = run(7, 60);
    for step in &report.steps {
        assert_eq!(step.rows[0].rank, 1);
        assert!(step.rows.windows(2).all(|w| w[0].total >= w[1].total));
        assert!(step.rows.windows(2).all(|w| w[0].rank <= w[1].rank));
    }

    let training = &report.steps[0];
    assert_eq!(training.rows.len(), 60);
    assert!(training.rows.iter().all(|r| r.distances.len() == 2));

    let qualification = &report.steps[1];
    let trial = &report.steps[2];
    let competition = &report.steps[3];
    assert!(trial.rows.len() >= 50 && trial.rows.len() < qualification.rows.len());
    assert_eq!(competition.rows.len(), trial.rows.len());

    let finalists = competition
        .rows
        .iter()
        .filter(|r| r.distances.len() == 2)
        .count();
    assert_eq!(finalists, 30);
    assert!(competition.rows[..30].iter().all(|r| r.distances.len() == 2));
}

#[test]
fn test_roster_evolves_but_keeps_identity() {
    let roster = weekend_roster(55);
    let report = run(3, 55);
    assert_eq!(report.roster.jumpers.len(), roster.jumpers.len());
    assert_eq!(report.roster.world_cup_ranks, roster.world_cup_ranks);
    assert!(report
        .roster
        .jumpers
        .iter()
        .all(|j| (0.0..=10.0).contains(&j.skills.form)));
    assert!(report
        .roster
        .jumpers
        .iter()
        .zip(&roster.jumpers)
        .any(|(a, b)| a.skills.form != b.skills.form));
}

#[test]
fn test_small_field_advances_everyone() {
    let report = run(9, 20);
    assert_eq!(report.steps[2].rows.len(), 20);
    let finalists = report.steps[3]
        .rows
        .iter()
        .filter(|r| r.distances.len() == 2)
        .count();
    assert_eq!(finalists, 20);
}
