pub mod calibrate;
pub mod gate;
pub mod weekend;

use clap::Args;
use skijump::config::Config;
use skijump::core_types::{Hill, Jumper, JumperSkills, Roster};
use skijump::form::{apply_form_change_to_roster, FormChangeEngine, FormMilestone};
use skijump::random::RandomSource;

const COUNTRIES: [&str; 12] = [
    "AUT", "GER", "NOR", "POL", "SLO", "JPN", "SUI", "FIN", "ITA", "CZE", "USA", "CAN",
];

#[derive(Args, Debug, Clone)]
pub struct HillArgs {
    #[arg(long, default_value_t = 120.0)]
    pub k_point: f64,

    #[arg(long, default_value_t = 137.0)]
    pub hill_size: f64,

    /// Defaults to a value scaled from the K-point.
    #[arg(long)]
    pub meters_by_gate: Option<f64>,
}

impl HillArgs {
    pub fn hill(&self) -> Hill {
        let mbg = self
            .meters_by_gate
            .unwrap_or_else(|| (self.k_point * 0.008 * 20.0).round() / 20.0);
        Hill::new(self.k_point, self.hill_size, mbg)
    }
}

/// Synthetic World Cup field: skills spread around the average, the better
/// two thirds ranked, then one game-start form roll.
pub fn demo_roster(size: usize, config: &Config, seed: u64) -> Roster {
    let mut rng = fastrand::Rng::with_seed(seed ^ 0x5eed);

    let mut jumpers: Vec<Jumper> = (0..size)
        .map(|i| {
            let level = rng.gaussian(5.5, 1.3).clamp(1.0, 10.0);
            let skills = JumperSkills {
                small_hill_skill: (level + rng.uniform(-0.7, 0.7)).clamp(1.0, 10.0),
                big_hill_skill: (level + rng.uniform(-0.7, 0.7)).clamp(1.0, 10.0),
                landing_tendency: rng.uniform(-2.0, 2.0),
                form: 5.0,
                bonus_important_jumps: rng.uniform(-1.5, 1.5),
            };
            Jumper::new(format!("J{:03}", i + 1), skills).with_name(
                format!("Jumper {:02}", i + 1),
                COUNTRIES[i % COUNTRIES.len()],
            )
        })
        .collect();

    let engine = FormChangeEngine::new(config.form.clone());
    jumpers = apply_form_change_to_roster(
        &jumpers,
        config.form.alpha_for(FormMilestone::GameStart),
        &engine,
        &mut rng,
    );

    let mut by_level: Vec<&Jumper> = jumpers.iter().collect();
    by_level.sort_by(|a, b| {
        let la = a.skills.small_hill_skill + a.skills.big_hill_skill;
        let lb = b.skills.small_hill_skill + b.skills.big_hill_skill;
        lb.total_cmp(&la)
    });
    let ranked = size * 2 / 3;
    let world_cup_ranks = by_level
        .into_iter()
        .take(ranked)
        .enumerate()
        .map(|(i, j)| (j.id.clone(), i as u32 + 1))
        .collect();

    Roster {
        jumpers,
        world_cup_ranks,
    }
}
