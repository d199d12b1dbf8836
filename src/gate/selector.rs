use super::JuryBravery;
use crate::core_types::{Hill, Jumper, RoundKind, SimulationContext};
use crate::error::{SjResult, SkiJumpError};
use crate::random::RandomSource;
use crate::simulator::JumpSimulator;
use crate::wind::WindProvider;
use tracing::{debug, info};

pub const MAX_TRIES: usize = 50;
const FLYING_HILL_K: f64 = 180.0;

pub struct StartingGateRequest<'a> {
    pub simulator: &'a dyn JumpSimulator,
    pub wind_provider: &'a mut dyn WindProvider,
    pub jury_bravery: JuryBravery,
    pub jumpers: &'a [Jumper],
    pub hill: &'a Hill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateSelection {
    /// Gate after the bravery, big-hill and safety adjustments.
    pub gate: i32,
    /// Gate the search itself settled on.
    pub converged_gate: i32,
    pub allowed_overshoots: usize,
    pub tries: usize,
    /// `(gate, overshoots)` per simulated try, in order.
    pub trace: Vec<(i32, usize)>,
}

enum Direction {
    Ascending,
    Descending,
}

/// Re-simulates the whole field once at `gate` and counts jumps beyond HS.
fn count_overshoots(
    req: &mut StartingGateRequest,
    gate: i32,
    rng: &mut dyn RandomSource,
) -> usize {
    let mut overshoots = 0;
    for jumper in req.jumpers {
        let wind = req.wind_provider.get_wind(rng);
        let ctx = SimulationContext {
            jumper,
            hill: req.hill,
            gate,
            wind,
            round_kind: RoundKind::Competition,
        };
        if req.simulator.simulate(&ctx, rng).distance > req.hill.real_hs {
            overshoots += 1;
        }
    }
    overshoots
}

pub fn select_starting_gate(
    req: StartingGateRequest,
    rng: &mut dyn RandomSource,
) -> SjResult<i32> {
    select_starting_gate_traced(req, rng).map(|s| s.gate)
}

pub fn select_starting_gate_traced(
    mut req: StartingGateRequest,
    rng: &mut dyn RandomSource,
) -> SjResult<GateSelection> {
    if req.jumpers.is_empty() {
        return Err(SkiJumpError::Validation(
            "Starting gate search needs at least one jumper".into(),
        ));
    }

    let allowed = req.jury_bravery.allowed_overshoots(req.jumpers.len());
    let mut trace = Vec::new();

    let mut gate = 0;
    let mut overshoots = count_overshoots(&mut req, gate, rng);
    trace.push((gate, overshoots));

    let direction = if overshoots == 0 {
        Direction::Ascending
    } else {
        Direction::Descending
    };

    loop {
        match direction {
            Direction::Ascending => {
                if trace.len() >= MAX_TRIES {
                    return Err(SkiJumpError::GateConvergence { tries: trace.len() });
                }
                let next = gate + 1;
                let count = count_overshoots(&mut req, next, rng);
                trace.push((next, count));
                debug!("Gate search ↑ gate {} -> {} overshoots (allowed {})", next, count, allowed);
                if count > allowed {
                    break;
                }
                gate = next;
            }
            Direction::Descending => {
                if overshoots <= allowed {
                    break;
                }
                if trace.len() >= MAX_TRIES {
                    return Err(SkiJumpError::GateConvergence { tries: trace.len() });
                }
                gate -= 1;
                overshoots = count_overshoots(&mut req, gate, rng);
                trace.push((gate, overshoots));
                debug!("Gate search ↓ gate {} -> {} overshoots (allowed {})", gate, overshoots, allowed);
            }
        }
    }

    let converged_gate = gate;
    let mut adjusted = gate + req.jury_bravery.post_adjustment();
    if req.hill.k_point >= FLYING_HILL_K {
        adjusted -= 1;
    }
    // Safety margin.
    adjusted -= 1;

    info!(
        "Starting gate {} (search settled on {} after {} tries, bravery {})",
        adjusted,
        converged_gate,
        trace.len(),
        req.jury_bravery
    );

    Ok(GateSelection {
        gate: adjusted,
        converged_gate,
        allowed_overshoots: allowed,
        tries: trace.len(),
        trace,
    })
}
