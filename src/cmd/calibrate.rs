use crate::cmd::HillArgs;
use crate::reports;
use clap::Args;
use rayon::prelude::*;
use skijump::config::Config;
use skijump::core_types::{Landing, RoundKind, Roster, SimulationContext};
use skijump::error::SjResult;
use skijump::simulator::{JumpSimulator, SimpleJumpSimulator};
use skijump::wind::{GaussianWind, WindProvider};
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CalibrateArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub hill: HillArgs,

    #[arg(long, default_value_t = 50)]
    pub field_size: usize,

    #[arg(long, default_value_t = -6, allow_hyphen_values = true)]
    pub gate_min: i32,

    #[arg(long, default_value_t = 6, allow_hyphen_values = true)]
    pub gate_max: i32,

    /// Passes over the whole field per gate.
    #[arg(long, default_value_t = 20)]
    pub passes: usize,
}

#[derive(Debug, Clone)]
pub struct CalibrationRow {
    pub gate: i32,
    pub jumps: usize,
    pub mean_distance: f64,
    pub max_distance: f64,
    pub overshoot_share: f64,
    pub fall_share: f64,
}

pub fn run(args: &CalibrateArgs, config: &Config, roster: &Roster, seed: u64) -> SjResult<()> {
    let hill = args.hill.hill();
    let simulator = SimpleJumpSimulator::new(config.physics.clone())?;
    let gates: Vec<i32> = (args.gate_min..=args.gate_max).collect();

    info!(
        "🔥 Calibrating {} gates x {} jumps on K{} / HS{}",
        gates.len(),
        args.passes * roster.jumpers.len(),
        hill.k_point,
        hill.real_hs
    );
    let start = Instant::now();

    // Every gate owns its own stream, so results do not depend on scheduling.
    let rows: Vec<CalibrationRow> = gates
        .par_iter()
        .map(|&gate| {
            let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(gate as i64 as u64));
            let mut wind = GaussianWind::from(&config.wind);

            let mut total = 0.0;
            let mut max_distance: f64 = 0.0;
            let mut overshoots = 0;
            let mut falls = 0;
            let mut jumps = 0;
            for _ in 0..args.passes {
                for jumper in &roster.jumpers {
                    let ctx = SimulationContext {
                        jumper,
                        hill: &hill,
                        gate,
                        wind: wind.get_wind(&mut rng),
                        round_kind: RoundKind::Competition,
                    };
                    let jump = simulator.simulate(&ctx, &mut rng);
                    total += jump.distance;
                    max_distance = max_distance.max(jump.distance);
                    if jump.distance > hill.real_hs {
                        overshoots += 1;
                    }
                    if jump.landing == Landing::Fall {
                        falls += 1;
                    }
                    jumps += 1;
                }
            }

            let n = jumps.max(1) as f64;
            CalibrationRow {
                gate,
                jumps,
                mean_distance: total / n,
                max_distance,
                overshoot_share: overshoots as f64 / n,
                fall_share: falls as f64 / n,
            }
        })
        .collect();

    info!("✅ Calibration done in {:.2?}", start.elapsed());
    reports::print_calibration(&rows, &hill);
    Ok(())
}
