use crate::error::{SjResult, SkiJumpError};
use crate::event::{DEFAULT_DUET_CUTS, DEFAULT_FINAL_ROUND_SIZE, DEFAULT_QUALIFICATION_ADVANCE};
use crate::gate::JuryBravery;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub physics: PhysicsParams,
    #[command(flatten)]
    pub wind: WindParams,
    #[command(flatten)]
    pub competition: CompetitionParams,
    #[command(flatten)]
    pub form: FormParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    // === SKILL BLEND (small hill -> big hill) ===
    #[arg(long, default_value_t = 95.0)]
    pub skill_blend_k_min: f64,
    #[arg(long, default_value_t = 125.0)]
    pub skill_blend_k_max: f64,

    // === TAKEOFF ===
    #[arg(long, default_value_t = 5.5)]
    pub average_skill: f64,
    #[arg(long, default_value_t = 6.0)]
    pub takeoff_base_scale: f64,
    #[arg(long, default_value_t = 2.2)]
    pub takeoff_skill_factor: f64,
    #[arg(long, default_value_t = 0.5)]
    pub takeoff_form_weight: f64,
    #[arg(long, default_value_t = 3.0)]
    pub takeoff_boost_mean: f64,
    #[arg(long, default_value_t = -4.0, allow_hyphen_values = true)]
    pub takeoff_penalty_mean: f64,
    #[arg(long, default_value_t = 1.2)]
    pub takeoff_neutral_stddev: f64,

    // === FLIGHT ===
    #[arg(long, default_value_t = 0.96)]
    pub flight_base_ratio: f64,
    #[arg(long, default_value_t = 2.0)]
    pub flight_skill_factor: f64,
    #[arg(long, default_value_t = 0.5)]
    pub flight_form_weight: f64,
    #[arg(long, default_value_t = 2.5)]
    pub flight_boost_mean: f64,
    #[arg(long, default_value_t = -3.5, allow_hyphen_values = true)]
    pub flight_penalty_mean: f64,
    #[arg(long, default_value_t = 1.4)]
    pub flight_neutral_stddev: f64,

    // === MIXTURE (shared band shares) ===
    #[arg(long, default_value_t = 0.05)]
    pub mixture_boost_share: f64,
    #[arg(long, default_value_t = 0.10)]
    pub mixture_penalty_share: f64,
    #[arg(long, default_value_t = 1.5)]
    pub mixture_band_stddev: f64,

    #[arg(long, default_value_t = 0.8)]
    pub important_jump_weight: f64,

    // === DISTANCE ===
    #[arg(long, default_value_t = 2.5)]
    pub starting_distance_divisor: f64,
    #[arg(long, default_value_t = 0.0085)]
    pub rating_slope_per_k: f64,
    #[arg(long, default_value_t = 1.0)]
    pub flight_ratio_base: f64,
    #[arg(long, default_value_t = 0.002)]
    pub flight_ratio_per_k: f64,
    #[arg(long, default_value_t = 0.08)]
    pub women_offset_ratio: f64,

    // === WIND ===
    #[arg(long, default_value_t = 0.008)]
    pub wind_meters_coefficient: f64,
    #[arg(long, default_value_t = 1.2)]
    pub wind_meters_exponent: f64,
    #[arg(long, default_value_t = 185.0)]
    pub ski_flying_k: f64,
    #[arg(long, default_value_t = 1.15)]
    pub ski_flying_wind_boost: f64,
    #[arg(long, default_value_t = 0.5)]
    pub tailwind_extra: f64,
    #[arg(long, default_value_t = 3.0)]
    pub tailwind_saturation_ms: f64,

    // === HS COST ===
    #[arg(long, default_value_t = 1.0)]
    pub hs_compression_start: f64,
    #[arg(long, default_value_t = 0.12)]
    pub hs_compression_strength: f64,

    // === LANDING ===
    // Upper distance/HS bound of the first three regimes; the fourth is open.
    #[arg(long, default_value = "1.0,1.036,1.075")]
    pub landing_regime_limits: String,
    // Cumulative fall, touch-down, parallel thresholds per regime.
    #[arg(long, default_value = "0.005,0.015,0.10")]
    pub landing_safe: String,
    #[arg(long, default_value = "0.02,0.06,0.35")]
    pub landing_long: String,
    #[arg(long, default_value = "0.08,0.20,0.75")]
    pub landing_risky: String,
    #[arg(long, default_value = "0.30,0.55,0.95")]
    pub landing_extreme: String,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            skill_blend_k_min: 95.0,
            skill_blend_k_max: 125.0,
            average_skill: 5.5,
            takeoff_base_scale: 6.0,
            takeoff_skill_factor: 2.2,
            takeoff_form_weight: 0.5,
            takeoff_boost_mean: 3.0,
            takeoff_penalty_mean: -4.0,
            takeoff_neutral_stddev: 1.2,
            flight_base_ratio: 0.96,
            flight_skill_factor: 2.0,
            flight_form_weight: 0.5,
            flight_boost_mean: 2.5,
            flight_penalty_mean: -3.5,
            flight_neutral_stddev: 1.4,
            mixture_boost_share: 0.05,
            mixture_penalty_share: 0.10,
            mixture_band_stddev: 1.5,
            important_jump_weight: 0.8,
            starting_distance_divisor: 2.5,
            rating_slope_per_k: 0.0085,
            flight_ratio_base: 1.0,
            flight_ratio_per_k: 0.002,
            women_offset_ratio: 0.08,
            wind_meters_coefficient: 0.008,
            wind_meters_exponent: 1.2,
            ski_flying_k: 185.0,
            ski_flying_wind_boost: 1.15,
            tailwind_extra: 0.5,
            tailwind_saturation_ms: 3.0,
            hs_compression_start: 1.0,
            hs_compression_strength: 0.12,
            landing_regime_limits: "1.0,1.036,1.075".to_string(),
            landing_safe: "0.005,0.015,0.10".to_string(),
            landing_long: "0.02,0.06,0.35".to_string(),
            landing_risky: "0.08,0.20,0.75".to_string(),
            landing_extreme: "0.30,0.55,0.95".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindParams {
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub wind_average: f64,
    #[arg(long, default_value_t = 0.5)]
    pub wind_instability: f64,
    #[arg(long, default_value_t = 0.4)]
    pub wind_variability: f64,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            wind_average: 0.0,
            wind_instability: 0.5,
            wind_variability: 0.4,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionParams {
    #[arg(long, default_value_t = 2)]
    pub training_series: usize,
    #[arg(long, default_value_t = DEFAULT_QUALIFICATION_ADVANCE)]
    pub qualification_advance: usize,
    #[arg(long, default_value_t = DEFAULT_FINAL_ROUND_SIZE)]
    pub final_round_size: usize,
    #[arg(long, default_value_t = DEFAULT_DUET_CUTS[0])]
    pub duet_first_cut: usize,
    #[arg(long, default_value_t = DEFAULT_DUET_CUTS[1])]
    pub duet_second_cut: usize,
    #[arg(long, value_enum, default_value_t = JuryBravery::Medium)]
    pub jury_bravery: JuryBravery,
    #[arg(long, default_value_t = 10)]
    pub gate_delta_limit: i32,
    // Share of HS at which the safety policy lowers the bar.
    #[arg(long, default_value_t = 1.0)]
    pub safety_gate_hs_ratio: f64,
}

impl Default for CompetitionParams {
    fn default() -> Self {
        Self {
            training_series: 2,
            qualification_advance: DEFAULT_QUALIFICATION_ADVANCE,
            final_round_size: DEFAULT_FINAL_ROUND_SIZE,
            duet_first_cut: DEFAULT_DUET_CUTS[0],
            duet_second_cut: DEFAULT_DUET_CUTS[1],
            jury_bravery: JuryBravery::Medium,
            gate_delta_limit: 10,
            safety_gate_hs_ratio: 1.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormParams {
    // === ALPHA PER MILESTONE ===
    #[arg(long, default_value_t = 1.5)]
    pub form_alpha_game_start: f64,
    #[arg(long, default_value_t = 0.35)]
    pub form_alpha_post_saturday: f64,
    #[arg(long, default_value_t = 0.5)]
    pub form_alpha_post_sunday: f64,

    // === FORM-DEPENDENT ALPHA ===
    #[arg(long, default_value_t = 0.6)]
    pub form_alpha_at_zero: f64,
    #[arg(long, default_value_t = 0.4)]
    pub form_alpha_at_ten: f64,

    // === EXTREME DAMPENING ===
    #[arg(long, default_value_t = 0.6)]
    pub form_exponent_high: f64,
    #[arg(long, default_value_t = 0.75)]
    pub form_exponent_low: f64,

    // Median |t(2)| used to express alpha as a median step.
    #[arg(long, default_value_t = 0.67)]
    pub form_t2_median: f64,
}

impl Default for FormParams {
    fn default() -> Self {
        Self {
            form_alpha_game_start: 1.5,
            form_alpha_post_saturday: 0.35,
            form_alpha_post_sunday: 0.5,
            form_alpha_at_zero: 0.6,
            form_alpha_at_ten: 0.4,
            form_exponent_high: 0.6,
            form_exponent_low: 0.75,
            form_t2_median: 0.67,
        }
    }
}

/// Fixed landing probability table, parsed once from the comma lists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingTable {
    pub limits: [f64; 3],
    pub thresholds: [[f64; 3]; 4],
}

impl PhysicsParams {
    pub fn landing_table(&self) -> SjResult<LandingTable> {
        let limits = parse_f64_array::<3>(&self.landing_regime_limits, "landing_regime_limits")?;
        if !(limits[0] < limits[1] && limits[1] < limits[2]) {
            return Err(SkiJumpError::Config(
                "landing_regime_limits must be strictly increasing".into(),
            ));
        }

        let mut thresholds = [[0.0; 3]; 4];
        for (slot, (raw, name)) in [
            (&self.landing_safe, "landing_safe"),
            (&self.landing_long, "landing_long"),
            (&self.landing_risky, "landing_risky"),
            (&self.landing_extreme, "landing_extreme"),
        ]
        .into_iter()
        .enumerate()
        {
            let t = parse_f64_array::<3>(raw, name)?;
            if !(0.0 <= t[0] && t[0] <= t[1] && t[1] <= t[2] && t[2] <= 1.0) {
                return Err(SkiJumpError::Config(format!(
                    "--{} must be cumulative thresholds in [0, 1]",
                    name
                )));
            }
            thresholds[slot] = t;
        }

        Ok(LandingTable { limits, thresholds })
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SjResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SjResult<()> {
        let p = &self.physics;
        if p.skill_blend_k_max <= p.skill_blend_k_min {
            return Err(SkiJumpError::Config(
                "skill_blend_k_max must exceed skill_blend_k_min".into(),
            ));
        }
        if p.mixture_boost_share + p.mixture_penalty_share > 1.0 {
            return Err(SkiJumpError::Config(
                "mixture shares must sum to at most 1".into(),
            ));
        }
        if p.hs_compression_strength <= 0.0 {
            return Err(SkiJumpError::Config(
                "hs_compression_strength must be positive".into(),
            ));
        }
        p.landing_table()?;

        let c = &self.competition;
        if c.qualification_advance == 0 || c.final_round_size == 0 {
            return Err(SkiJumpError::Config(
                "advance counts must be positive".into(),
            ));
        }
        if c.gate_delta_limit < 0 {
            return Err(SkiJumpError::Config(
                "gate_delta_limit must not be negative".into(),
            ));
        }

        let f = &self.form;
        for (v, name) in [
            (f.form_exponent_high, "form_exponent_high"),
            (f.form_exponent_low, "form_exponent_low"),
        ] {
            if !(v > 0.0 && v < 1.0) {
                return Err(SkiJumpError::Config(format!("{} must be in (0, 1)", name)));
            }
        }
        if f.form_t2_median <= 0.0 {
            return Err(SkiJumpError::Config("form_t2_median must be positive".into()));
        }
        Ok(())
    }

    /// Overlays only the values typed on the command line onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, [$($field:ident),* $(,)?]) => {
                $(
                    if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                        self.$group.$field = cli.$group.$field.clone();
                    }
                )*
            };
        }

        update_if_present!(
            physics,
            [
                skill_blend_k_min,
                skill_blend_k_max,
                average_skill,
                takeoff_base_scale,
                takeoff_skill_factor,
                takeoff_form_weight,
                takeoff_boost_mean,
                takeoff_penalty_mean,
                takeoff_neutral_stddev,
                flight_base_ratio,
                flight_skill_factor,
                flight_form_weight,
                flight_boost_mean,
                flight_penalty_mean,
                flight_neutral_stddev,
                mixture_boost_share,
                mixture_penalty_share,
                mixture_band_stddev,
                important_jump_weight,
                starting_distance_divisor,
                rating_slope_per_k,
                flight_ratio_base,
                flight_ratio_per_k,
                women_offset_ratio,
                wind_meters_coefficient,
                wind_meters_exponent,
                ski_flying_k,
                ski_flying_wind_boost,
                tailwind_extra,
                tailwind_saturation_ms,
                hs_compression_start,
                hs_compression_strength,
                landing_regime_limits,
                landing_safe,
                landing_long,
                landing_risky,
                landing_extreme,
            ]
        );
        update_if_present!(wind, [wind_average, wind_instability, wind_variability]);
        update_if_present!(
            competition,
            [
                training_series,
                qualification_advance,
                final_round_size,
                duet_first_cut,
                duet_second_cut,
                jury_bravery,
                gate_delta_limit,
                safety_gate_hs_ratio,
            ]
        );
        update_if_present!(
            form,
            [
                form_alpha_game_start,
                form_alpha_post_saturday,
                form_alpha_post_sunday,
                form_alpha_at_zero,
                form_alpha_at_ten,
                form_exponent_high,
                form_exponent_low,
                form_t2_median,
            ]
        );
    }
}

fn parse_f64_array<const N: usize>(s: &str, name: &str) -> SjResult<[f64; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(SkiJumpError::Config(format!(
            "--{} requires {} values",
            name, N
        )));
    }
    let mut arr = [0.0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p
            .trim()
            .parse()
            .map_err(|_| SkiJumpError::Config(format!("Invalid number in {}: '{}'", name, p)))?;
    }
    Ok(arr)
}
