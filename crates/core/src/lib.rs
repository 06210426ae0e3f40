//! Wind Farm Wake Simulation Core Library
//!
//! Estimates the energy yield of a wind farm layout under a directional wind
//! resource. Upstream turbines slow the air reaching downstream ones; the
//! engine models that interaction with the Jensen top-hat wake model and
//! reports annual energy production, capacity factor, wake losses and layout
//! recommendations.
//!
//! ## Pipeline
//!
//! - Geodetic turbine positions projected onto a local metric plane
//! - Per-direction wake analysis (optionally parallel across directions)
//! - Energy accumulation over the wind rose
//! - Per-direction and per-turbine performance metrics
//! - Rule-based layout recommendations
//!
//! ```
//! use wake_sim_core::physics::power_output;
//! use wake_sim_core::{MetersPerSecond, TurbineRegistry};
//!
//! let registry = TurbineRegistry::standard();
//! let spec = registry.get("GE 2.5-120").unwrap();
//! assert_eq!(*power_output(spec, MetersPerSecond::new(10.0)), 2.0);
//! assert_eq!(*power_output(spec, MetersPerSecond::new(26.0)), 0.0);
//! ```

// Engine-wide tunable constants
pub mod config;

// Units, turbines, layouts, wind resource, requests
pub mod core_types;

// Projection, power curves and wake models
pub mod physics;

// Engine, metrics, recommendations, outputs
pub mod simulation;

pub use config::{AdvisorThresholds, ConfigError, EngineConfig, ParallelMode};

// Re-export core types
pub use core_types::{
    AnalysisOptions, CardinalDirection, LayoutSpec, PowerCurvePoint, RegistryError,
    SimulationRequest, TurbinePosition, TurbineRegistry, TurbineSpec, Vec2, WakeModelVariant,
    WindCondition, WindResource,
};
pub use core_types::{Degrees, MegawattHours, Megawatts, Meters, MetersPerSecond, Percent};

// Re-export physics
pub use physics::{JensenWake, NoWake, WakeAnalysisResult, WakeModel};

// Re-export simulation types
pub use simulation::{
    PlainTextRenderer, Recommendation, SimulationArtifact, SimulationEngine, SimulationOutcome,
    TraceEvent, TraceRenderer, ValidationError, Warning,
};
