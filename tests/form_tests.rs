mod common;

use common::{field, jumper};
use skijump::config::FormParams;
use skijump::form::{apply_form_change_to_roster, FormChangeEngine, FormMilestone};
use skijump::random::ScriptedRandom;

fn engine() -> FormChangeEngine {
    FormChangeEngine::new(FormParams::default())
}

fn median_abs_change(alpha: f64, seed: u64) -> f64 {
    let e = engine();
    let mut rng = fastrand::Rng::with_seed(seed);
    let roster = field(400);
    let next = apply_form_change_to_roster(&roster, alpha, &e, &mut rng);
    let mut moves: Vec<f64> = roster
        .iter()
        .zip(&next)
        .map(|(a, b)| (b.skills.form - a.skills.form).abs())
        .collect();
    moves.sort_by(|a, b| a.total_cmp(b));
    moves[moves.len() / 2]
}

#[test]
fn test_forms_stay_on_scale() {
    let e = engine();
    let mut rng = fastrand::Rng::with_seed(5);
    let mut roster: Vec<_> = (0..=10)
        .map(|f| jumper(&format!("f{}", f), 5.0).with_form(f as f64))
        .collect();
    for _ in 0..50 {
        roster = apply_form_change_to_roster(&roster, 3.0, &e, &mut rng);
        assert!(roster
            .iter()
            .all(|j| (0.0..=10.0).contains(&j.skills.form)));
    }
}

#[test]
fn test_zero_alpha_changes_nothing() {
    let e = engine();
    let roster = field(20);
    let mut rng = fastrand::Rng::with_seed(8);
    let next = apply_form_change_to_roster(&roster, 0.0, &e, &mut rng);
    assert_eq!(next, roster);

    let tiny = median_abs_change(1e-6, 8);
    assert!(tiny < 1e-5);
}

#[test]
fn test_larger_alpha_moves_form_more() {
    let small = median_abs_change(0.2, 21);
    let large = median_abs_change(1.5, 21);
    assert!(large > small * 2.0, "small {} large {}", small, large);
}

#[test]
fn test_median_change_tracks_alpha_at_center() {
    let m = median_abs_change(0.3, 34);
    assert!((0.15..=0.45).contains(&m), "median {}", m);
}

#[test]
fn test_input_roster_untouched_and_three_draws_each() {
    let e = engine();
    let roster = field(7);
    let before = roster.clone();
    let mut rng = ScriptedRandom::new(vec![0.9, 0.25, 0.6, 0.1]);
    let next = apply_form_change_to_roster(&roster, 1.0, &e, &mut rng);
    assert_eq!(roster, before);
    assert_eq!(next.len(), 7);
    assert_eq!(rng.draws(), 21);
    assert!(next.iter().zip(&roster).all(|(a, b)| a.id == b.id));
}

#[test]
fn test_milestone_alphas_come_from_config() {
    let mut params = FormParams::default();
    params.form_alpha_post_sunday = 0.9;
    assert_eq!(params.alpha_for(FormMilestone::PostSunday), 0.9);
    assert_eq!(
        params.alpha_for(FormMilestone::GameStart),
        FormParams::default().form_alpha_game_start
    );
}

#[test]
fn test_extremes_damp_outward_moves() {
    let e = engine();
    assert!(e.dampen(9.5, 2.0) < 10.0);
    assert!(e.dampen(0.5, -2.0) > 0.0);
    // Crossing the centre: the part toward the centre is free.
    let crossed = e.dampen(7.0, -3.0);
    assert!(crossed < 5.0 && crossed > 4.0);
}

#[test]
fn test_engine_built_from_profile_params() {
    let params = FormParams {
        form_alpha_at_zero: 0.5,
        ..FormParams::default()
    };
    let e = FormChangeEngine::new(params.clone());
    let copy = e.clone();
    assert_eq!(copy.params.form_alpha_at_zero, 0.5);
    assert_eq!(copy.params.form_t2_median, params.form_t2_median);

    let mut a = ScriptedRandom::new(vec![0.2, 0.7, 0.4]);
    let mut b = ScriptedRandom::new(vec![0.2, 0.7, 0.4]);
    let j = jumper("p", 5.0).with_form(2.0);
    assert_eq!(
        e.apply(&j, 1.0, &mut a).skills.form,
        copy.apply(&j, 1.0, &mut b).skills.form
    );
}
