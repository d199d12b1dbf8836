use proptest::prelude::*;
use skijump::config::{FormParams, PhysicsParams};
use skijump::core_types::{
    Hill, HillScoringParams, Jumper, JumperSkills, RoundKind, SimulationContext, Wind,
};
use skijump::event::standings::{cut_with_ties, order_by_total_then_bib, Standing};
use skijump::form::FormChangeEngine;
use skijump::random::ScriptedRandom;
use skijump::scoring::{distance_points, gate_points, judge_style, jump_points, wind_points};
use skijump::simulator::{JumpSimulator, SimpleJumpSimulator};
use skijump::wind::{GaussianWind, WindProvider};

// --- STRATEGIES ---

prop_compose! {
    fn arb_jumper()(
        small in 1.0..=10.0f64,
        big in 1.0..=10.0f64,
        landing in -3.0..=3.0f64,
        form in 0.0..=10.0f64,
        bonus in -3.0..=3.0f64,
        women in any::<bool>()
    ) -> Jumper {
        let j = Jumper::new("prop", JumperSkills {
            small_hill_skill: small,
            big_hill_skill: big,
            landing_tendency: landing,
            form,
            bonus_important_jumps: bonus,
        });
        if women { j.women() } else { j }
    }
}

prop_compose! {
    fn arb_hill()(
        k in 60.0..=240.0f64,
        hs_ratio in 1.05..=1.2f64,
        mbg in 0.3..=2.5f64
    ) -> Hill {
        Hill::new(k, (k * hs_ratio).round(), mbg)
    }
}

prop_compose! {
    fn arb_wind()(average in -6.0..=6.0f64, instability in 0.0..=2.0f64) -> Wind {
        Wind::new(average, instability)
    }
}

fn arb_round_kind() -> impl Strategy<Value = RoundKind> {
    prop_oneof![
        Just(RoundKind::Training),
        Just(RoundKind::Trial),
        Just(RoundKind::Qualification),
        Just(RoundKind::Competition),
    ]
}

proptest! {
    #[test]
    fn prop_jump_is_scored_sanely(
        jumper in arb_jumper(),
        hill in arb_hill(),
        wind in arb_wind(),
        gate in -15i32..=15,
        round_kind in arb_round_kind(),
        seed in any::<u64>()
    ) {
        let sim = SimpleJumpSimulator::new(PhysicsParams::default()).unwrap();
        let mut rng = fastrand::Rng::with_seed(seed);
        let ctx = SimulationContext { jumper: &jumper, hill: &hill, gate, wind, round_kind };
        let jump = sim.simulate(&ctx, &mut rng);

        prop_assert!(jump.distance >= 0.0);
        prop_assert_eq!(jump.distance * 2.0, (jump.distance * 2.0).round());

        let scoring = HillScoringParams::for_hill(&hill);
        let style = judge_style(&jump, &jumper, &hill, &mut rng);
        prop_assert!((0.0..=60.0).contains(&style.sum));
        prop_assert_eq!(style.sum * 2.0, (style.sum * 2.0).round());

        let points = jump_points(
            distance_points(jump.distance, hill.k_point, &scoring),
            gate_points(gate, &scoring),
            wind_points(&wind, &scoring),
            Some(style.sum),
        );
        prop_assert!(points >= 0.0);
    }

    #[test]
    fn prop_wind_stays_clamped(
        base in arb_wind(),
        variability in 0.0..=5.0f64,
        u in proptest::collection::vec(0.0..1.0f64, 2..8)
    ) {
        let mut provider = GaussianWind::new(base, variability);
        let mut rng = ScriptedRandom::new(u);
        for _ in 0..10 {
            let w = provider.get_wind(&mut rng);
            prop_assert!((-5.0..=5.0).contains(&w.average));
            prop_assert_eq!(w.instability, base.instability);
        }
    }

    #[test]
    fn prop_form_stays_on_scale(
        form in 0.0..=10.0f64,
        delta in -30.0..=30.0f64
    ) {
        let engine = FormChangeEngine::new(FormParams::default());
        let next = engine.dampen(form, delta);
        prop_assert!((0.0..=10.0).contains(&next));
        // Never moves the wrong way.
        if delta > 0.0 { prop_assert!(next >= form - 1e-9); }
        if delta < 0.0 { prop_assert!(next <= form + 1e-9); }
    }

    #[test]
    fn prop_cut_never_splits_a_tie(
        totals in proptest::collection::vec(0u32..20, 1..60),
        advance in 1usize..60
    ) {
        let mut standings: Vec<Standing> = totals
            .iter()
            .enumerate()
            .map(|(i, &t)| Standing { bib: i as u32 + 1, total: t as f64 * 5.0 })
            .collect();
        order_by_total_then_bib(&mut standings);
        let kept = cut_with_ties(&standings, advance);

        prop_assert!(kept.len() >= advance.min(standings.len()));
        if let Some(last) = kept.last() {
            prop_assert!(standings[kept.len()..].iter().all(|s| s.total < last.total));
        }
    }
}
