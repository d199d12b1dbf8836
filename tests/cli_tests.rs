use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    roster_path: PathBuf,
    profile_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let roster_path = dir.path().join("roster.json");
        let profile_path = dir.path().join("profile.json");

        let mut roster = File::create(&roster_path).unwrap();
        writeln!(roster, "{{\"jumpers\": [").unwrap();
        for i in 1..=24 {
            let skill = 3.0 + i as f64 * 0.2;
            writeln!(
                roster,
                "{{\"id\": \"r{i}\", \"name\": \"Rider {i}\", \"country\": \"NOR\", \
                 \"skills\": {{\"smallHillSkill\": {skill}, \"bigHillSkill\": {skill}, \
                 \"landingTendency\": 0, \"form\": 5, \"bonusImportantJumps\": 0}}}}{}",
                if i < 24 { "," } else { "" }
            )
            .unwrap();
        }
        writeln!(roster, "], \"worldCupRanks\": {{\"r24\": 1, \"r23\": 2}}}}").unwrap();

        let mut profile = File::create(&profile_path).unwrap();
        writeln!(
            profile,
            "{{\"competition\": {{\"jury_bravery\": \"high\", \"final_round_size\": 10}}}}"
        )
        .unwrap();

        Self {
            _dir: dir,
            roster_path,
            profile_path,
        }
    }
}

fn skijump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skijump"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_cli_weekend_with_demo_roster() {
    let output = skijump(&["weekend", "--seed", "11", "--field-size", "40", "--top", "5"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Day 1 Training"));
    assert!(stdout.contains("Day 2 Competition"));
    assert!(stdout.contains("Form after the weekend"));
}

#[test]
fn test_cli_weekend_writes_json_report() {
    let ctx = TestContext::new();
    let report_path = ctx.roster_path.with_file_name("report.json");
    let output = skijump(&[
        "weekend",
        "--seed",
        "5",
        "--roster",
        ctx.roster_path.to_str().unwrap(),
        "--profile",
        ctx.profile_path.to_str().unwrap(),
        "--json",
        report_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 8);
    assert_eq!(report["roster"]["jumpers"].as_array().unwrap().len(), 24);

    // The profile shrinks the final round to ten.
    let finalists = steps[3]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["distances"].as_array().unwrap().len() == 2)
        .count();
    assert_eq!(finalists, 10);
}

#[test]
fn test_cli_gate_prints_trace() {
    let output = skijump(&["gate", "--seed", "3", "--jury-bravery", "very-high"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Starting gate:"));
    assert!(stdout.contains("Overshoots"));
}

#[test]
fn test_cli_calibrate_runs_every_gate() {
    let output = skijump(&[
        "calibrate",
        "--seed",
        "1",
        "--passes",
        "2",
        "--gate-min",
        "-2",
        "--gate-max",
        "2",
        "--k-point",
        "95",
        "--hill-size",
        "106",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Calibration on K95"));
    assert!(stdout.contains("Falls"));
}

#[test]
fn test_cli_reports_bad_profile() {
    let output = skijump(&["weekend", "--profile", "/no/such/profile.json"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}
