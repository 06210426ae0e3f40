//! Simulation output types

use crate::core_types::layout::TurbinePosition;
use crate::core_types::request::AnalysisOptions;
use crate::core_types::turbine::TurbineSpec;
use crate::core_types::units::{Megawatts, Percent};
use crate::core_types::wind::WindResource;
use crate::physics::coordinates::SpacingStats;
use crate::simulation::analysis::{DirectionalPerformance, PerformanceSummary, TurbinePerformance};
use crate::simulation::error::{ValidationError, Warning};
use crate::simulation::optimization::Recommendation;
use crate::simulation::trace::TraceEvent;
use serde::{Deserialize, Serialize};

/// Echo of the turbine and layout the run used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfiguration {
    pub turbine: TurbineSpec,
    pub turbine_count: usize,
    /// Capacity used for capacity factor (declared, or count x nameplate)
    pub total_capacity: Megawatts,
    /// Positions with planar coordinates filled in
    pub positions: Vec<TurbinePosition>,
    pub spacing: Option<SpacingStats>,
    /// `spacing.min_spacing` in rotor diameters
    pub min_spacing_diameters: Option<f64>,
}

/// Parameters and constants the run was computed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParameters {
    pub options: AnalysisOptions,
    /// Wind resource actually analysed (the default rose when substituted)
    pub wind_resource: WindResource,
    pub wake_model: String,
    pub wake_decay_constant: Option<f64>,
    pub wake_speed_floor_fraction: f64,
    pub reference_capacity_factor: f64,
    pub energy_price_per_mwh: f64,
    pub co2_tonnes_per_mwh: f64,
}

/// Assumptions and provenance flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// True when the embedded default wind rose was substituted
    pub default_wind_resource: bool,
    pub frequency_sum: Percent,
    pub conditions_analyzed: usize,
    pub warnings: Vec<Warning>,
}

/// Complete result of one successful simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationArtifact {
    pub summary: PerformanceSummary,
    pub directional: Vec<DirectionalPerformance>,
    pub turbines: Vec<TurbinePerformance>,
    pub recommendations: Vec<Recommendation>,
    pub configuration: LayoutConfiguration,
    pub parameters: AnalysisParameters,
    pub metadata: ArtifactMetadata,
}

/// Tagged outcome of a run: either a complete artifact or a validation
/// failure, each with the trace recorded up to that point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Success {
        artifact: Box<SimulationArtifact>,
        trace: Vec<TraceEvent>,
    },
    Failure {
        error: ValidationError,
        trace: Vec<TraceEvent>,
    },
}

impl SimulationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationOutcome::Success { .. })
    }

    /// Trace events regardless of outcome
    pub fn trace(&self) -> &[TraceEvent] {
        match self {
            SimulationOutcome::Success { trace, .. } | SimulationOutcome::Failure { trace, .. } => {
                trace
            }
        }
    }

    pub fn artifact(&self) -> Option<&SimulationArtifact> {
        match self {
            SimulationOutcome::Success { artifact, .. } => Some(artifact.as_ref()),
            SimulationOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            SimulationOutcome::Success { .. } => None,
            SimulationOutcome::Failure { error, .. } => Some(error),
        }
    }

    /// Drop the trace and convert to a `Result`
    ///
    /// # Errors
    /// Returns the validation error of a failed run.
    pub fn into_result(self) -> Result<SimulationArtifact, ValidationError> {
        match self {
            SimulationOutcome::Success { artifact, .. } => Ok(*artifact),
            SimulationOutcome::Failure { error, .. } => Err(error),
        }
    }
}
