use crate::cmd::HillArgs;
use crate::reports;
use clap::Args;
use skijump::config::Config;
use skijump::core_types::Roster;
use skijump::error::SjResult;
use skijump::gate::selector::select_starting_gate_traced;
use skijump::gate::StartingGateRequest;
use skijump::simulator::SimpleJumpSimulator;
use skijump::wind::GaussianWind;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GateArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub hill: HillArgs,

    #[arg(long, default_value_t = 50)]
    pub field_size: usize,
}

pub fn run(args: &GateArgs, config: &Config, roster: &Roster, seed: u64) -> SjResult<()> {
    let hill = args.hill.hill();
    let simulator = SimpleJumpSimulator::new(config.physics.clone())?;
    let mut wind = GaussianWind::from(&config.wind);
    let mut rng = fastrand::Rng::with_seed(seed);

    info!(
        "🔎 Searching starting gate for {} jumpers (bravery {}, {:.0}% may pass HS)",
        roster.jumpers.len(),
        config.competition.jury_bravery,
        config.competition.jury_bravery.overshoot_share() * 100.0
    );
    let selection = select_starting_gate_traced(
        StartingGateRequest {
            simulator: &simulator,
            wind_provider: &mut wind,
            jury_bravery: config.competition.jury_bravery,
            jumpers: &roster.jumpers,
            hill: &hill,
        },
        &mut rng,
    )?;

    reports::print_gate_trace(&selection, roster.jumpers.len());
    Ok(())
}
