//! Tunable engine constants
//!
//! Every number the pipeline relies on that is an engineering choice rather
//! than a physical law lives here, so it can be overridden per engine.

use crate::core_types::units::{Meters, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours in a (non-leap) year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// When per-direction analyses run on the rayon pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParallelMode {
    /// Parallel once turbines x conditions exceeds `parallel_threshold`
    #[default]
    Auto,
    /// Always use the pool
    Always,
    /// Always run on the calling thread
    Never,
}

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lower bound on wake-reduced wind speed as a fraction of free stream.
    /// Guardrail against zero output in deep multi-wake rows.
    pub wake_speed_floor_fraction: f64,

    /// Assumed capacity factor for the gross-AEP reference. Only used as the
    /// denominator of wake efficiency.
    pub reference_capacity_factor: f64,

    /// Illustrative energy price in USD per megawatt-hour, not market data
    pub energy_price_per_mwh: f64,

    /// Illustrative grid emissions displaced per megawatt-hour (tonnes CO2)
    pub co2_tonnes_per_mwh: f64,

    /// Allowed deviation of the frequency sum from 100 % before flagging
    pub frequency_tolerance: Percent,

    /// Relative deviation between declared and computed capacity before flagging
    pub capacity_tolerance: f64,

    /// Parallel scheduling policy
    pub parallel: ParallelMode,

    /// Work units (turbines x conditions) above which `Auto` goes parallel
    pub parallel_threshold: usize,

    /// Optimization advisor rule thresholds
    pub advisor: AdvisorThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wake_speed_floor_fraction: 0.30,
            reference_capacity_factor: 0.35,
            energy_price_per_mwh: 50.0,
            co2_tonnes_per_mwh: 0.4,
            frequency_tolerance: Percent::new(1.0),
            capacity_tolerance: 0.01,
            parallel: ParallelMode::Auto,
            parallel_threshold: 64,
            advisor: AdvisorThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Check that every tunable lies in its meaningful range
    ///
    /// # Errors
    /// Returns [`ConfigError`] for a speed floor outside `[0, 1]`, a
    /// reference capacity factor outside `(0, 1]`, or a negative (or NaN)
    /// tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = self.wake_speed_floor_fraction;
        if !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::FractionOutOfRange {
                field: "wake_speed_floor_fraction",
                value: floor,
                lower_inclusive: true,
            });
        }

        let reference = self.reference_capacity_factor;
        if reference.is_nan() || reference <= 0.0 || reference > 1.0 {
            return Err(ConfigError::FractionOutOfRange {
                field: "reference_capacity_factor",
                value: reference,
                lower_inclusive: false,
            });
        }

        for (field, value) in [
            ("frequency_tolerance", *self.frequency_tolerance),
            ("capacity_tolerance", self.capacity_tolerance),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeTolerance { field, value });
            }
        }

        Ok(())
    }

    /// Whether a run with this many work units should use the pool
    pub fn use_parallel(&self, work_units: usize) -> bool {
        match self.parallel {
            ParallelMode::Always => true,
            ParallelMode::Never => false,
            ParallelMode::Auto => work_units > self.parallel_threshold,
        }
    }
}

/// Errors raised by [`EngineConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A fraction fell outside `[0, 1]` (or `(0, 1]`)
    FractionOutOfRange {
        /// Offending field
        field: &'static str,
        /// Rejected value
        value: f64,
        /// Whether 0 itself is allowed
        lower_inclusive: bool,
    },
    /// A tolerance was negative or NaN
    NegativeTolerance {
        /// Offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FractionOutOfRange {
                field,
                value,
                lower_inclusive,
            } => {
                let open = if *lower_inclusive { '[' } else { '(' };
                write!(f, "Invalid engine config: {field} = {value} outside {open}0, 1]")
            }
            ConfigError::NegativeTolerance { field, value } => {
                write!(f, "Invalid engine config: {field} = {value} must be >= 0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Thresholds for the rule-based layout advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorThresholds {
    /// Average wake loss above which layout optimization is recommended
    pub high_wake_loss: Percent,
    /// Industry target band for wake loss (low, high)
    pub target_wake_loss: (Percent, Percent),
    /// Prevailing-direction loss / average loss ratio that triggers realignment
    pub alignment_ratio: f64,
    /// Minimum acceptable spacing in rotor diameters
    pub min_spacing_diameters: f64,
    /// Recommended spacing band in rotor diameters (low, high)
    pub target_spacing_diameters: (f64, f64),
    /// Capacity factor below which a site assessment is recommended
    pub low_capacity_factor: Percent,
    /// Rotor diameter below which larger rotors are recommended
    pub small_rotor: Meters,
    /// Turbine count above which a technology upgrade pays off
    pub large_farm_turbines: usize,
    /// Upper bound on any estimated improvement
    pub improvement_cap: Percent,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            high_wake_loss: Percent::new(15.0),
            target_wake_loss: (Percent::new(8.0), Percent::new(12.0)),
            alignment_ratio: 1.3,
            min_spacing_diameters: 5.0,
            target_spacing_diameters: (7.0, 9.0),
            low_capacity_factor: Percent::new(30.0),
            small_rotor: Meters::new(120.0),
            large_farm_turbines: 10,
            improvement_cap: Percent::new(25.0),
        }
    }
}
