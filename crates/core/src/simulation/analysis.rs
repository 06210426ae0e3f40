//! Aggregate and per-direction performance metrics
//!
//! Revenue and CO2 figures use the illustrative constants in
//! [`EngineConfig`]; they are not market or grid data.

use crate::config::{EngineConfig, HOURS_PER_YEAR};
use crate::core_types::layout::TurbinePosition;
use crate::core_types::units::{Degrees, MegawattHours, Megawatts, Meters, MetersPerSecond, Percent};
use crate::core_types::wind::CardinalDirection;
use crate::physics::wake::WakeAnalysisResult;
use serde::{Deserialize, Serialize};

/// Energy totals accumulated over all wind conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyYield {
    /// Net annual energy production after wake losses
    pub net_aep: MegawattHours,
    /// Capacity x 8760 h x reference capacity factor. A relative-efficiency
    /// denominator, not a wake-free physical baseline.
    pub reference_gross_aep: MegawattHours,
    /// `net_aep / (capacity x 8760)`
    pub capacity_factor: Percent,
    /// `net_aep / reference_gross_aep`
    pub wake_efficiency: Percent,
    /// Frequency-weighted mean of per-condition wake loss
    pub average_wake_loss: Percent,
}

/// One row of the per-direction table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalPerformance {
    pub direction: Degrees,
    pub cardinal: CardinalDirection,
    pub frequency: Percent,
    pub wind_speed: MetersPerSecond,
    pub gross_power: Megawatts,
    pub net_power: Megawatts,
    pub wake_loss: Percent,
    /// `net / gross`, 0 when gross is 0
    pub efficiency: Percent,
    pub interacting_pairs: usize,
}

/// Annual figures for a single turbine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbinePerformance {
    pub id: String,
    pub x: Meters,
    pub y: Meters,
    /// Net annual energy of this turbine
    pub annual_energy: MegawattHours,
    /// Share of this turbine's free-stream energy lost to wakes
    pub wake_loss: Percent,
    /// Frequency-weighted mean effective wind speed
    pub mean_effective_speed: MetersPerSecond,
}

/// Top-level summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub annual_energy: MegawattHours,
    pub reference_gross_energy: MegawattHours,
    pub capacity_factor: Percent,
    pub wake_efficiency: Percent,
    pub average_wake_loss: Percent,
    /// USD per year at the configured price
    pub annual_revenue: f64,
    /// Tonnes CO2 displaced per year
    pub annual_co2_offset: f64,
    pub analysis_years: u32,
    pub lifetime_energy: MegawattHours,
    pub lifetime_revenue: f64,
    pub lifetime_co2_offset: f64,
    /// Turbine with the highest wake loss, if any turbine loses energy
    pub most_affected_turbine: Option<String>,
}

/// Derives reporting metrics from raw wake results
#[derive(Debug, Clone, Copy)]
pub struct PerformanceAnalyzer<'a> {
    config: &'a EngineConfig,
}

impl<'a> PerformanceAnalyzer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Per-direction table in input order
    pub fn directional_table(results: &[WakeAnalysisResult]) -> Vec<DirectionalPerformance> {
        results
            .iter()
            .map(|r| DirectionalPerformance {
                direction: r.direction,
                cardinal: CardinalDirection::from_degrees(r.direction),
                frequency: r.frequency,
                wind_speed: r.wind_speed,
                gross_power: r.gross_power,
                net_power: r.net_power,
                wake_loss: r.wake_loss,
                efficiency: Percent::ratio(*r.net_power, *r.gross_power),
                interacting_pairs: r.interacting_pairs,
            })
            .collect()
    }

    /// Per-turbine annual energy and wake loss
    ///
    /// `positions` must carry planar coordinates and be in the same order as
    /// each result's `turbines`.
    pub fn turbine_breakdown(
        positions: &[TurbinePosition],
        results: &[WakeAnalysisResult],
    ) -> Vec<TurbinePerformance> {
        let n = positions.len();
        let total_frequency: f64 = results.iter().map(|r| *r.frequency).sum();

        positions
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let mut net = MegawattHours::ZERO;
                let mut free = MegawattHours::ZERO;
                let mut weighted_speed = 0.0;

                for r in results {
                    let hours = r.frequency.to_fraction() * HOURS_PER_YEAR;
                    let state = &r.turbines[i];
                    net += state.net_power.over_hours(hours);
                    free += (r.gross_power / n as f64).over_hours(hours);
                    weighted_speed += *state.effective_speed * *r.frequency;
                }

                let mean_speed = if total_frequency > 0.0 {
                    weighted_speed / total_frequency
                } else {
                    0.0
                };

                TurbinePerformance {
                    id: pos.id.clone(),
                    x: pos.x.unwrap_or_default(),
                    y: pos.y.unwrap_or_default(),
                    annual_energy: net,
                    wake_loss: Percent::ratio(*free - *net, *free),
                    mean_effective_speed: MetersPerSecond::new(mean_speed),
                }
            })
            .collect()
    }

    /// Summary figures including revenue, CO2 and lifetime projections
    pub fn summarize(
        &self,
        energy: &EnergyYield,
        turbines: &[TurbinePerformance],
        analysis_years: u32,
    ) -> PerformanceSummary {
        let aep = *energy.net_aep;
        let annual_revenue = aep * self.config.energy_price_per_mwh;
        let annual_co2_offset = aep * self.config.co2_tonnes_per_mwh;
        let years = f64::from(analysis_years);

        let most_affected_turbine = turbines
            .iter()
            .filter(|t| *t.wake_loss > 0.0)
            .max_by(|a, b| a.wake_loss.cmp(&b.wake_loss))
            .map(|t| t.id.clone());

        PerformanceSummary {
            annual_energy: energy.net_aep,
            reference_gross_energy: energy.reference_gross_aep,
            capacity_factor: energy.capacity_factor,
            wake_efficiency: energy.wake_efficiency,
            average_wake_loss: energy.average_wake_loss,
            annual_revenue,
            annual_co2_offset,
            analysis_years,
            lifetime_energy: energy.net_aep * years,
            lifetime_revenue: annual_revenue * years,
            lifetime_co2_offset: annual_co2_offset * years,
            most_affected_turbine,
        }
    }
}
