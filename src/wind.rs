use crate::config::WindParams;
use crate::core_types::Wind;
use crate::random::RandomSource;

/// Per-jump wind sampler. Called exactly once per jump.
pub trait WindProvider {
    fn get_wind(&mut self, rng: &mut dyn RandomSource) -> Wind;
}

/// Always returns the same wind and never draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantWind(pub Wind);

impl WindProvider for ConstantWind {
    fn get_wind(&mut self, _rng: &mut dyn RandomSource) -> Wind {
        self.0
    }
}

/// Gaussian noise around a base average; instability passes through.
#[derive(Debug, Clone, Copy)]
pub struct GaussianWind {
    pub base: Wind,
    pub variability: f64,
}

impl GaussianWind {
    pub fn new(base: Wind, variability: f64) -> Self {
        Self { base, variability }
    }
}

impl From<&WindParams> for GaussianWind {
    fn from(p: &WindParams) -> Self {
        Self::new(Wind::new(p.wind_average, p.wind_instability), p.wind_variability)
    }
}

impl WindProvider for GaussianWind {
    fn get_wind(&mut self, rng: &mut dyn RandomSource) -> Wind {
        let noise = rng.gaussian(0.0, self.variability);
        Wind {
            average: (self.base.average + noise).clamp(-Wind::LIMIT, Wind::LIMIT),
            instability: self.base.instability,
        }
    }
}
