pub mod landing;
pub mod physics;

use self::landing::draw_landing;
use crate::config::{LandingTable, PhysicsParams};
use crate::core_types::{Jump, SimulationContext};
use crate::error::SjResult;
use crate::random::{round_half, RandomSource};

/// Context in, jump out. Implementations must be deterministic given the
/// random stream.
pub trait JumpSimulator {
    fn simulate(&self, ctx: &SimulationContext, rng: &mut dyn RandomSource) -> Jump;
}

/// Rating components of a single jump, exposed for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpBreakdown {
    pub skill: f64,
    pub takeoff: f64,
    pub flight: f64,
    pub wind_meters: f64,
    pub raw_distance: f64,
    pub distance: f64,
}

/// Production simulator: blended skill, two ratings with mixture noise,
/// power-law wind and a soft HS cost.
#[derive(Debug, Clone)]
pub struct SimpleJumpSimulator {
    pub params: PhysicsParams,
    landing: LandingTable,
}

struct MixtureBand {
    boost_mean: f64,
    penalty_mean: f64,
    neutral_stddev: f64,
}

impl SimpleJumpSimulator {
    pub fn new(params: PhysicsParams) -> SjResult<Self> {
        let landing = params.landing_table()?;
        Ok(Self { params, landing })
    }

    /// Three-band gaussian mixture: boosted, penalised, neutral.
    /// One uniform for the band, one gaussian (two uniforms) for the value.
    fn mixture(&self, band: &MixtureBand, rng: &mut dyn RandomSource) -> f64 {
        let p = &self.params;
        let u = rng.next_f64();
        if u < p.mixture_boost_share {
            rng.gaussian(band.boost_mean, p.mixture_band_stddev)
        } else if u < p.mixture_boost_share + p.mixture_penalty_share {
            rng.gaussian(band.penalty_mean, p.mixture_band_stddev)
        } else {
            rng.gaussian(0.0, band.neutral_stddev)
        }
    }

    pub fn simulate_detailed(
        &self,
        ctx: &SimulationContext,
        rng: &mut dyn RandomSource,
    ) -> (Jump, JumpBreakdown) {
        let p = &self.params;
        let k = ctx.hill.k_point;
        let skills = &ctx.jumper.skills;

        let skill = physics::effective_skill(skills, k, p);
        let deviation = skill - p.average_skill;
        let importance =
            ctx.round_kind.importance() * skills.bonus_important_jumps * p.important_jump_weight;

        let takeoff_base = p.average_skill * p.takeoff_base_scale;
        let takeoff = takeoff_base
            + deviation * p.takeoff_skill_factor
            + skills.form * p.takeoff_form_weight
            + self.mixture(
                &MixtureBand {
                    boost_mean: p.takeoff_boost_mean,
                    penalty_mean: p.takeoff_penalty_mean,
                    neutral_stddev: p.takeoff_neutral_stddev,
                },
                rng,
            )
            + importance;

        let flight = takeoff_base * p.flight_base_ratio
            + deviation * p.flight_skill_factor
            + skills.form * p.flight_form_weight
            + self.mixture(
                &MixtureBand {
                    boost_mean: p.flight_boost_mean,
                    penalty_mean: p.flight_penalty_mean,
                    neutral_stddev: p.flight_neutral_stddev,
                },
                rng,
            )
            + importance;

        let instability = ctx.wind.instability.max(0.0);
        let wind_factor = if ctx.wind.is_headwind() {
            rng.uniform((1.0 - instability).max(0.0), 1.0)
        } else {
            rng.uniform(1.0, 1.0 + instability)
        };
        let wind_meters = physics::wind_contribution(ctx.wind.average, wind_factor, k, p);

        let slope = physics::rating_slope(k, p);
        let raw_distance = physics::starting_distance(k, p)
            + ctx.gate as f64 * ctx.hill.meters_by_gate
            + takeoff * slope
            + flight * slope * physics::dynamic_flight_ratio(k, p)
            + wind_meters
            - physics::gender_offset(k, ctx.jumper.is_women, p);

        let distance = round_half(physics::compress_beyond_hs(raw_distance, ctx.hill, p).max(0.0));
        let landing = draw_landing(distance, ctx.hill.real_hs, &self.landing, rng);

        (
            Jump { distance, landing },
            JumpBreakdown {
                skill,
                takeoff,
                flight,
                wind_meters,
                raw_distance,
                distance,
            },
        )
    }
}

impl JumpSimulator for SimpleJumpSimulator {
    fn simulate(&self, ctx: &SimulationContext, rng: &mut dyn RandomSource) -> Jump {
        self.simulate_detailed(ctx, rng).0
    }
}
