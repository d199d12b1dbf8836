use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use skijump::config::Config;
use skijump::core_types::Roster;
use skijump::error::SjResult;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ski jumping competition simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON profile with tuning parameters; CLI flags override it.
    #[arg(global = true, long)]
    profile: Option<String>,

    /// Roster JSON; a synthetic field is generated when absent.
    #[arg(global = true, short, long)]
    roster: Option<String>,

    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Weekend(cmd::weekend::WeekendArgs),
    Gate(cmd::gate::GateArgs),
    Calibrate(cmd::calibrate::CalibrateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> SjResult<()> {
    info!("🚀 Initializing ski jumping simulator...");

    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);
    let cli_config = match &cli.command {
        Commands::Weekend(args) => &args.config,
        Commands::Gate(args) => &args.config,
        Commands::Calibrate(args) => &args.config,
    };

    let config = match &cli.profile {
        Some(path) => {
            info!("⚖️  Loading profile from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config.validate()?;
            file_config
        }
        None => {
            cli_config.validate()?;
            cli_config.clone()
        }
    };

    let seed = cli.seed.unwrap_or_else(|| {
        let s = fastrand::u64(..);
        warn!("🎲 No seed given, using {}", s);
        s
    });

    let roster = match &cli.roster {
        Some(path) => {
            info!("📂 Loading roster: {}", path);
            Roster::load_from_file(path)?
        }
        None => {
            let size = match &cli.command {
                Commands::Weekend(args) => args.field_size,
                Commands::Gate(args) => args.field_size,
                Commands::Calibrate(args) => args.field_size,
            };
            info!("🧪 Generating demo roster of {} jumpers", size);
            cmd::demo_roster(size, &config, seed)
        }
    };

    match cli.command {
        Commands::Weekend(args) => cmd::weekend::run(&args, &config, &roster, seed),
        Commands::Gate(args) => cmd::gate::run(&args, &config, &roster, seed),
        Commands::Calibrate(args) => cmd::calibrate::run(&args, &config, &roster, seed),
    }
}
