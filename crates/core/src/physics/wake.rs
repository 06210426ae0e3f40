//! Wake interaction between turbines
//!
//! For one wind condition every ordered turbine pair (i downstream,
//! j upstream) is projected onto the flow direction. When i sits inside the
//! expanding wake cone of j, i's effective wind speed is reduced by j's
//! velocity deficit. Deficits from several upstream turbines combine
//! multiplicatively, and the result is floored at a fraction of the
//! free-stream speed.
//!
//! # Jensen (Park) model
//!
//! Wake radius at downwind distance `d`:
//!
//! `r(d) = R + k·d`, with `k = 0.5 / ln(0.5 / I)` (I = ambient turbulence)
//!
//! Top-hat velocity deficit inside the wake:
//!
//! `δ = (1 − √(1 − Ct)) · (R / r(d))²`
//!
//! `Ct` is approximated by the upstream turbine's output divided by its
//! rated capacity. No per-model thrust curve is available.
//!
//! # References
//!
//! - Jensen, N.O. (1983). "A note on wind generator interaction."
//!   Risø-M-2411.
//! - Katic, I., Højstrup, J., Jensen, N.O. (1986). "A simple model for
//!   cluster efficiency." EWEC'86.

use crate::core_types::layout::Vec2;
use crate::core_types::turbine::TurbineSpec;
use crate::core_types::units::{Degrees, Megawatts, Meters, MetersPerSecond, Percent};
use crate::core_types::wind::{CardinalDirection, WindCondition};
use crate::physics::power_curve::{load_fraction, power_output};
use serde::{Deserialize, Serialize};

/// Velocity deficit model applied to a single upstream/downstream pair
///
/// Implementations must be pure: the same geometry always yields the same
/// deficit.
pub trait WakeModel: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &'static str;

    /// Fractional speed deficit at a point `downwind` meters behind and
    /// `crosswind` meters beside an upstream rotor of radius `rotor_radius`,
    /// or `None` when the point is outside the wake.
    ///
    /// `downwind` is always positive when called.
    fn deficit(
        &self,
        downwind: Meters,
        crosswind: Meters,
        rotor_radius: Meters,
        thrust_coefficient: f64,
    ) -> Option<f64>;
}

/// Jensen top-hat wake with linear expansion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JensenWake {
    decay_constant: f64,
}

impl JensenWake {
    /// Build from ambient turbulence intensity (fraction, must be in (0, 0.5))
    pub fn new(ambient_turbulence: f64) -> Self {
        Self {
            decay_constant: wake_decay_constant(ambient_turbulence),
        }
    }

    /// Wake expansion rate `k`
    pub fn decay_constant(&self) -> f64 {
        self.decay_constant
    }

    /// Wake radius `downwind` meters behind a rotor of radius `rotor_radius`
    pub fn wake_radius(&self, rotor_radius: Meters, downwind: Meters) -> Meters {
        rotor_radius + downwind * self.decay_constant
    }
}

impl WakeModel for JensenWake {
    fn name(&self) -> &'static str {
        "Jensen"
    }

    fn deficit(
        &self,
        downwind: Meters,
        crosswind: Meters,
        rotor_radius: Meters,
        thrust_coefficient: f64,
    ) -> Option<f64> {
        let radius = self.wake_radius(rotor_radius, downwind);
        if crosswind >= radius {
            return None;
        }
        let ct = thrust_coefficient.clamp(0.0, 1.0);
        let expansion = *rotor_radius / *radius;
        Some((1.0 - (1.0 - ct).sqrt()) * expansion * expansion)
    }
}

/// Undisturbed baseline: no turbine ever shadows another
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoWake;

impl WakeModel for NoWake {
    fn name(&self) -> &'static str {
        "No wake"
    }

    fn deficit(&self, _: Meters, _: Meters, _: Meters, _: f64) -> Option<f64> {
        None
    }
}

/// `k = 0.5 / ln(0.5 / I)`
///
/// Only meaningful for `0 < I < 0.5`; callers validate the range.
pub fn wake_decay_constant(ambient_turbulence: f64) -> f64 {
    0.5 / (0.5 / ambient_turbulence).ln()
}

/// Per-turbine outcome of one wind condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbineWakeState {
    /// Wind speed after all upstream deficits and the floor
    pub effective_speed: MetersPerSecond,
    /// Output at the effective speed
    pub net_power: Megawatts,
    /// Number of upstream turbines whose wake covers this one
    pub upstream_wakes: usize,
}

/// Result of analysing one wind condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WakeAnalysisResult {
    /// Direction the wind blows from
    pub direction: Degrees,
    /// Compass sector of `direction`
    pub cardinal: CardinalDirection,
    /// Free-stream speed
    pub wind_speed: MetersPerSecond,
    /// Sector frequency
    pub frequency: Percent,
    /// Sum of outputs at free-stream speed
    pub gross_power: Megawatts,
    /// Sum of outputs at wake-reduced speeds
    pub net_power: Megawatts,
    /// `(gross − net) / gross`, 0 when gross is 0
    pub wake_loss: Percent,
    /// Ordered (downstream, upstream) pairs in wake interaction
    pub interacting_pairs: usize,
    /// Per-turbine detail, in layout order
    pub turbines: Vec<TurbineWakeState>,
}

/// Run the wake model for every turbine pair under one wind condition
///
/// `positions` are planar turbine positions; `floor_fraction` bounds each
/// turbine's effective speed from below at that fraction of free stream.
pub fn analyze_condition(
    model: &dyn WakeModel,
    spec: &TurbineSpec,
    positions: &[Vec2],
    condition: &WindCondition,
    floor_fraction: f64,
) -> WakeAnalysisResult {
    let free_speed = condition.speed;
    let free_power = power_output(spec, free_speed);
    let thrust_coefficient = load_fraction(spec, free_power);
    let rotor_radius = spec.rotor_radius();
    let flow = condition.flow_unit_vector();
    let floor = free_speed * floor_fraction;

    let mut interacting_pairs = 0;
    let turbines: Vec<TurbineWakeState> = positions
        .iter()
        .enumerate()
        .map(|(i, &downstream)| {
            let mut speed_factor = 1.0;
            let mut upstream_wakes = 0;

            for (j, &upstream) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let offset = downstream - upstream;
                let downwind = offset.dot(&flow);
                if downwind <= 0.0 {
                    continue;
                }
                let crosswind = (offset - flow * downwind).norm();

                if let Some(deficit) = model.deficit(
                    Meters::new(downwind),
                    Meters::new(crosswind),
                    rotor_radius,
                    thrust_coefficient,
                ) {
                    speed_factor *= 1.0 - deficit;
                    upstream_wakes += 1;
                }
            }

            interacting_pairs += upstream_wakes;
            let effective_speed = (free_speed * speed_factor).max(floor);
            TurbineWakeState {
                effective_speed,
                net_power: power_output(spec, effective_speed),
                upstream_wakes,
            }
        })
        .collect();

    let gross_power = free_power * positions.len() as f64;
    let net_power: Megawatts = turbines.iter().map(|t| t.net_power).sum();

    WakeAnalysisResult {
        direction: condition.direction,
        cardinal: condition.cardinal(),
        wind_speed: free_speed,
        frequency: condition.frequency,
        gross_power,
        net_power,
        wake_loss: Percent::ratio(*gross_power - *net_power, *gross_power),
        interacting_pairs,
        turbines,
    }
}
