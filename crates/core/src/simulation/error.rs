//! Validation failures and non-fatal assumption warnings

use crate::core_types::units::{Megawatts, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural problems with a request. Raised before any wake computation;
/// no artifact is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The layout has no turbines
    EmptyLayout,
    /// The turbine model is not in the registry
    InvalidTurbineModel {
        /// Name that was asked for
        requested: String,
        /// Every registered model, sorted
        valid_models: Vec<String>,
    },
    /// A turbine coordinate is not a usable latitude/longitude
    InvalidTurbinePosition {
        /// Turbine identifier
        id: String,
        /// What was wrong
        message: String,
    },
    /// A wind condition has a negative or non-finite value
    InvalidWindCondition {
        /// Position in the wind resource
        index: usize,
        /// What was wrong
        message: String,
    },
    /// An analysis option is outside its usable range
    InvalidAnalysisOption {
        /// Option name
        option: String,
        /// What was wrong
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyLayout => {
                write!(f, "Layout contains no turbines; at least one position is required")
            }
            ValidationError::InvalidTurbineModel {
                requested,
                valid_models,
            } => write!(
                f,
                "Unknown turbine model '{requested}'. Valid models: {}",
                valid_models.join(", ")
            ),
            ValidationError::InvalidTurbinePosition { id, message } => {
                write!(f, "Invalid position for turbine '{id}': {message}")
            }
            ValidationError::InvalidWindCondition { index, message } => {
                write!(f, "Invalid wind condition #{index}: {message}")
            }
            ValidationError::InvalidAnalysisOption { option, message } => {
                write!(f, "Invalid analysis option '{option}': {message}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Assumptions the engine made to complete a run. Recorded in the artifact's
/// metadata; never stop the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// No (or an empty) wind resource was supplied; the embedded rose was used
    DefaultWindResource,
    /// Sector frequencies do not sum to ~100 %
    FrequencySumMismatch {
        /// Actual sum
        sum: Percent,
    },
    /// Terrain effects were requested but are not modelled
    TerrainEffectsIgnored,
    /// Declared capacity disagrees with turbine count x nameplate
    CapacityMismatch {
        /// Capacity in the layout
        declared: Megawatts,
        /// Turbine count x nameplate capacity
        computed: Megawatts,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DefaultWindResource => {
                write!(f, "No wind resource supplied; using the default 8-sector wind rose")
            }
            Warning::FrequencySumMismatch { sum } => write!(
                f,
                "Wind frequencies sum to {sum:.1} instead of 100%; results are not normalised"
            ),
            Warning::TerrainEffectsIgnored => {
                write!(f, "Terrain effects requested but not modelled; flat terrain assumed")
            }
            Warning::CapacityMismatch { declared, computed } => write!(
                f,
                "Declared capacity {declared:.2} differs from turbine count x nameplate {computed:.2}; declared value used"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_lists_valid_names() {
        let err = ValidationError::InvalidTurbineModel {
            requested: "Acme 9000".to_string(),
            valid_models: vec!["GE 2.5-120".to_string(), "Vestas V90-2.0".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Acme 9000"));
        assert!(msg.contains("GE 2.5-120, Vestas V90-2.0"));
    }

    #[test]
    fn test_warning_messages() {
        let w = Warning::FrequencySumMismatch {
            sum: Percent::new(87.5),
        };
        assert!(w.to_string().contains("87.5%"));
        assert!(Warning::DefaultWindResource.to_string().contains("8-sector"));
    }
}
