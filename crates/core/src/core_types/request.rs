//! Simulation request: the input boundary of the engine

use crate::core_types::layout::LayoutSpec;
use crate::core_types::wind::WindResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which wake deficit model to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WakeModelVariant {
    /// Jensen (Park) top-hat wake
    #[default]
    Jensen,
    /// No wake interaction; every turbine sees free-stream wind
    NoWake,
}

impl fmt::Display for WakeModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WakeModelVariant::Jensen => write!(f, "Jensen"),
            WakeModelVariant::NoWake => write!(f, "No wake"),
        }
    }
}

/// Optional analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Wake deficit model
    pub wake_model: WakeModelVariant,
    /// Ambient turbulence intensity (fraction), drives wake expansion
    pub ambient_turbulence: f64,
    /// Air density in kg/m³. Echoed in the results only.
    pub air_density: f64,
    /// Terrain effects flag. Accepted but not modelled.
    pub terrain_effects: bool,
    /// Project lifetime used for cumulative projections
    pub analysis_years: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            wake_model: WakeModelVariant::Jensen,
            ambient_turbulence: 0.10,
            air_density: 1.225,
            terrain_effects: false,
            analysis_years: 20,
        }
    }
}

/// Everything needed for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Turbine positions and model
    pub layout: LayoutSpec,
    /// Site wind rose; the embedded default is substituted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_resource: Option<WindResource>,
    /// Analysis options; defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

impl SimulationRequest {
    /// Request with default wind resource and options
    pub fn new(layout: LayoutSpec) -> Self {
        Self {
            layout,
            wind_resource: None,
            options: None,
        }
    }

    /// Attach a site wind rose
    pub fn with_wind_resource(mut self, wind: WindResource) -> Self {
        self.wind_resource = Some(wind);
        self
    }

    /// Attach analysis options
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = Some(options);
        self
    }
}
