//! Core types and utilities

pub mod layout;
pub mod request;
pub mod turbine;
pub mod units;
pub mod wind;

pub use layout::{LayoutSpec, TurbinePosition, Vec2};
pub use request::{AnalysisOptions, SimulationRequest, WakeModelVariant};
pub use turbine::{PowerCurvePoint, RegistryError, TurbineRegistry, TurbineSpec};
pub use units::*;
pub use wind::{CardinalDirection, WindCondition, WindResource};
