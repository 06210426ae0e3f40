//! Turbine specifications and the model registry
//!
//! A `TurbineSpec` is immutable once registered. The engine never consults
//! global state for turbine data: a `TurbineRegistry` value is handed to the
//! engine at construction, which lets tests inject custom turbine fixtures.

use crate::core_types::units::{Megawatts, Meters, MetersPerSecond};
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a manufacturer power curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerCurvePoint {
    /// Hub-height wind speed
    pub wind_speed: MetersPerSecond,
    /// Electrical output at that wind speed
    pub power: Megawatts,
}

impl PowerCurvePoint {
    /// Create a curve point from raw m/s and MW values
    pub fn new(wind_speed: f64, power: f64) -> Self {
        Self {
            wind_speed: MetersPerSecond::new(wind_speed),
            power: Megawatts::new(power),
        }
    }
}

/// Static description of a turbine model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineSpec {
    /// Model name, also the registry key
    pub name: String,
    /// Nameplate (rated) capacity
    pub capacity: Megawatts,
    /// Rotor diameter (D), the unit of turbine spacing
    pub rotor_diameter: Meters,
    /// Hub height above ground
    pub hub_height: Meters,
    /// Below this speed the turbine does not generate
    pub cut_in_speed: MetersPerSecond,
    /// Above this speed the turbine shuts down
    pub cut_out_speed: MetersPerSecond,
    /// Speed at which rated capacity is reached
    pub rated_speed: MetersPerSecond,
    /// Tabulated power curve, ascending by wind speed
    pub power_curve: Vec<PowerCurvePoint>,
}

impl TurbineSpec {
    /// Rotor radius (D / 2)
    pub fn rotor_radius(&self) -> Meters {
        self.rotor_diameter.half()
    }

    /// Check the structural invariants of the spec
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidSpec`] when the curve is empty, not
    /// strictly ascending by wind speed, decreasing anywhere, contains
    /// negative or above-capacity power, drops below capacity past rated
    /// speed, or when the characteristic speeds are out of order.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidSpec {
            model: self.name.clone(),
            reason,
        };

        if self.power_curve.is_empty() {
            return Err(invalid("power curve is empty".to_string()));
        }
        if *self.capacity <= 0.0 || *self.rotor_diameter <= 0.0 {
            return Err(invalid(
                "capacity and rotor diameter must be positive".to_string(),
            ));
        }
        if !(self.cut_in_speed < self.rated_speed && self.rated_speed <= self.cut_out_speed) {
            return Err(invalid(format!(
                "expected cut-in < rated <= cut-out, got {} / {} / {}",
                self.cut_in_speed, self.rated_speed, self.cut_out_speed
            )));
        }

        for pair in self.power_curve.windows(2) {
            if pair[1].wind_speed <= pair[0].wind_speed {
                return Err(invalid(format!(
                    "wind speeds must be strictly ascending ({} follows {})",
                    pair[1].wind_speed, pair[0].wind_speed
                )));
            }
        }

        // Non-decreasing in wind speed
        for pair in self.power_curve.windows(2) {
            if pair[1].power < pair[0].power {
                return Err(invalid(format!(
                    "power must not decrease with wind speed ({} at {} after {} at {})",
                    pair[1].power, pair[1].wind_speed, pair[0].power, pair[0].wind_speed
                )));
            }
        }

        // Tolerance covers curves that round rated output up slightly
        let power_limit = *self.capacity * 1.001;
        if let Some(point) = self
            .power_curve
            .iter()
            .find(|p| *p.power < 0.0 || *p.power > power_limit)
        {
            return Err(invalid(format!(
                "power {} at {} outside [0, {}]",
                point.power, point.wind_speed, self.capacity
            )));
        }

        // Flat at rated capacity from rated speed to cut-out
        let rated_floor = *self.capacity * 0.999;
        if let Some(point) = self
            .power_curve
            .iter()
            .find(|p| p.wind_speed >= self.rated_speed && *p.power < rated_floor)
        {
            return Err(invalid(format!(
                "power {} at {} below rated capacity {} past rated speed {}",
                point.power, point.wind_speed, self.capacity, self.rated_speed
            )));
        }

        Ok(())
    }

    /// GE 2.5-120: 2.5 MW, 120 m rotor
    ///
    /// The reference model of the bundled catalog. Its curve has an exact
    /// 2.0 MW entry at 10 m/s.
    pub fn ge_2_5_120() -> Self {
        Self {
            name: "GE 2.5-120".to_string(),
            capacity: Megawatts::new(2.5),
            rotor_diameter: Meters::new(120.0),
            hub_height: Meters::new(110.0),
            cut_in_speed: MetersPerSecond::new(3.0),
            cut_out_speed: MetersPerSecond::new(25.0),
            rated_speed: MetersPerSecond::new(12.0),
            power_curve: curve(&[
                (3.0, 0.0),
                (4.0, 0.1),
                (5.0, 0.3),
                (6.0, 0.6),
                (7.0, 0.95),
                (8.0, 1.35),
                (9.0, 1.75),
                (10.0, 2.0),
                (11.0, 2.3),
                (12.0, 2.5),
                (25.0, 2.5),
            ]),
        }
    }

    /// Vestas V90-2.0: 2.0 MW, 90 m rotor
    pub fn vestas_v90_2_0() -> Self {
        Self {
            name: "Vestas V90-2.0".to_string(),
            capacity: Megawatts::new(2.0),
            rotor_diameter: Meters::new(90.0),
            hub_height: Meters::new(80.0),
            cut_in_speed: MetersPerSecond::new(4.0),
            cut_out_speed: MetersPerSecond::new(25.0),
            rated_speed: MetersPerSecond::new(13.0),
            power_curve: curve(&[
                (4.0, 0.09),
                (5.0, 0.2),
                (6.0, 0.36),
                (7.0, 0.58),
                (8.0, 0.86),
                (9.0, 1.2),
                (10.0, 1.55),
                (11.0, 1.82),
                (12.0, 1.97),
                (13.0, 2.0),
            ]),
        }
    }

    /// Siemens SWT-3.6-130: 3.6 MW, 130 m rotor
    pub fn siemens_swt_3_6_130() -> Self {
        Self {
            name: "Siemens SWT-3.6-130".to_string(),
            capacity: Megawatts::new(3.6),
            rotor_diameter: Meters::new(130.0),
            hub_height: Meters::new(115.0),
            cut_in_speed: MetersPerSecond::new(3.0),
            cut_out_speed: MetersPerSecond::new(25.0),
            rated_speed: MetersPerSecond::new(12.0),
            power_curve: curve(&[
                (3.0, 0.0),
                (4.0, 0.14),
                (5.0, 0.42),
                (6.0, 0.82),
                (7.0, 1.35),
                (8.0, 1.95),
                (9.0, 2.6),
                (10.0, 3.15),
                (11.0, 3.5),
                (12.0, 3.6),
                (25.0, 3.6),
            ]),
        }
    }

    /// Nordex N100-2.5: 2.5 MW, 100 m rotor
    pub fn nordex_n100_2_5() -> Self {
        Self {
            name: "Nordex N100-2.5".to_string(),
            capacity: Megawatts::new(2.5),
            rotor_diameter: Meters::new(100.0),
            hub_height: Meters::new(100.0),
            cut_in_speed: MetersPerSecond::new(3.5),
            cut_out_speed: MetersPerSecond::new(20.0),
            rated_speed: MetersPerSecond::new(12.5),
            power_curve: curve(&[
                (3.5, 0.02),
                (4.5, 0.12),
                (6.0, 0.45),
                (7.5, 0.95),
                (9.0, 1.6),
                (10.5, 2.15),
                (12.5, 2.5),
                (20.0, 2.5),
            ]),
        }
    }
}

fn curve(points: &[(f64, f64)]) -> Vec<PowerCurvePoint> {
    points
        .iter()
        .map(|&(speed, power)| PowerCurvePoint::new(speed, power))
        .collect()
}

/// Immutable lookup table from model name to [`TurbineSpec`]
///
/// # Example
/// ```
/// use wake_sim_core::{TurbineRegistry, TurbineSpec};
///
/// let registry = TurbineRegistry::builder()
///     .with(TurbineSpec::ge_2_5_120())
///     .build()
///     .unwrap();
/// assert!(registry.get("GE 2.5-120").is_some());
/// assert_eq!(registry.model_names(), vec!["GE 2.5-120".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurbineRegistry {
    specs: FxHashMap<String, TurbineSpec>,
}

impl TurbineRegistry {
    /// Bundled catalog of utility-scale models
    pub fn standard() -> Self {
        let specs = [
            TurbineSpec::ge_2_5_120(),
            TurbineSpec::vestas_v90_2_0(),
            TurbineSpec::siemens_swt_3_6_130(),
            TurbineSpec::nordex_n100_2_5(),
        ];
        Self {
            specs: specs.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Start building a custom registry
    pub fn builder() -> TurbineRegistryBuilder {
        TurbineRegistryBuilder::default()
    }

    /// Look up a model by exact name
    pub fn get(&self, model: &str) -> Option<&TurbineSpec> {
        self.specs.get(model)
    }

    /// All registered model names, sorted
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.specs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over every registered spec (unordered)
    pub fn specs(&self) -> impl Iterator<Item = &TurbineSpec> {
        self.specs.values()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when no models are registered
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Builder collecting specs before the registry is frozen
#[derive(Debug, Default)]
pub struct TurbineRegistryBuilder {
    pending: Vec<TurbineSpec>,
}

impl TurbineRegistryBuilder {
    /// Queue a spec for registration
    pub fn with(mut self, spec: TurbineSpec) -> Self {
        self.pending.push(spec);
        self
    }

    /// Validate every queued spec and freeze the registry
    ///
    /// # Errors
    /// Returns the first invalid spec or duplicate model name encountered.
    pub fn build(self) -> Result<TurbineRegistry, RegistryError> {
        let mut specs =
            FxHashMap::with_capacity_and_hasher(self.pending.len(), FxBuildHasher);
        for spec in self.pending {
            spec.validate()?;
            if specs.contains_key(&spec.name) {
                return Err(RegistryError::DuplicateModel(spec.name));
            }
            specs.insert(spec.name.clone(), spec);
        }
        Ok(TurbineRegistry { specs })
    }
}

/// Errors raised while assembling a [`TurbineRegistry`]
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The same model name was registered twice
    DuplicateModel(String),
    /// A spec violated its structural invariants
    InvalidSpec {
        /// Offending model
        model: String,
        /// What was wrong
        reason: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateModel(name) => {
                write!(f, "Turbine model '{name}' registered more than once")
            }
            RegistryError::InvalidSpec { model, reason } => {
                write!(f, "Invalid turbine spec '{model}': {reason}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let registry = TurbineRegistry::standard();
        assert_eq!(registry.len(), 4);
        for spec in registry.specs() {
            spec.validate().unwrap();
        }
    }

    #[test]
    fn test_model_names_sorted() {
        let names = TurbineRegistry::standard().model_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"GE 2.5-120".to_string()));
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let result = TurbineRegistry::builder()
            .with(TurbineSpec::ge_2_5_120())
            .with(TurbineSpec::ge_2_5_120())
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateModel("GE 2.5-120".to_string())
        );
    }

    #[test]
    fn test_unordered_curve_rejected() {
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.power_curve.swap(2, 3);
        let err = TurbineRegistry::builder().with(spec).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSpec { .. }));
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn test_decreasing_power_below_rated_rejected() {
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.power_curve[5].power = Megawatts::new(0.5);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("must not decrease"));
    }

    #[test]
    fn test_storm_control_curve_rejected() {
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.name = "Storm".to_string();
        spec.power_curve = curve(&[(3.0, 0.0), (12.0, 2.5), (20.0, 2.5), (25.0, 1.0)]);
        let err = TurbineRegistry::builder().with(spec).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSpec { ref model, .. } if model == "Storm"));
        assert!(err.to_string().contains("must not decrease"));
    }

    #[test]
    fn test_below_capacity_past_rated_rejected() {
        // Single point past rated, so no decrease between neighbours
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.power_curve = curve(&[(3.0, 0.0), (12.0, 2.0)]);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("below rated capacity"));
    }

    #[test]
    fn test_curve_ending_before_cut_out_accepted() {
        let mut spec = TurbineSpec::siemens_swt_3_6_130();
        spec.power_curve.pop();
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_over_capacity_power_rejected() {
        let mut spec = TurbineSpec::vestas_v90_2_0();
        spec.power_curve.push(PowerCurvePoint::new(14.0, 2.4));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_speed_ordering_rejected() {
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.rated_speed = MetersPerSecond::new(30.0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry = TurbineRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(registry.get("GE 2.5-120").is_none());
    }
}
