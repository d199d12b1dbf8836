use crate::cmd::HillArgs;
use crate::reports;
use clap::Args;
use skijump::config::Config;
use skijump::core_types::Roster;
use skijump::error::SjResult;
use skijump::weekend::Weekend;
use std::fs;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct WeekendArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub hill: HillArgs,

    /// Size of the generated field when no roster file is given.
    #[arg(long, default_value_t = 60)]
    pub field_size: usize,

    /// Write the full report as JSON.
    #[arg(long)]
    pub json: Option<String>,

    /// Rows printed per step.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub fn run(args: &WeekendArgs, config: &Config, roster: &Roster, seed: u64) -> SjResult<()> {
    let hill = args.hill.hill();
    info!(
        "🏔️  Hill K{} HS{} ({} m/gate), seed {}",
        hill.k_point, hill.real_hs, hill.meters_by_gate, seed
    );

    let start = Instant::now();
    let mut rng = fastrand::Rng::with_seed(seed);
    let report = Weekend::new(config, hill)?.run(roster, &mut rng)?;
    info!("⏱️  Weekend simulated in {:.2?}", start.elapsed());

    for step in &report.steps {
        reports::print_step(step, args.top);
    }
    reports::print_form_changes(roster, &report.roster);

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("💾 Report written to {}", path);
    }
    Ok(())
}
