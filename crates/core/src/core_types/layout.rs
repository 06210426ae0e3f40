//! Turbine placement inputs

use crate::core_types::units::{Megawatts, Meters};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Planar vector type for turbine positions and wind directions (meters,
/// x = east, y = north).
pub type Vec2 = Vector2<f64>;

/// A single turbine location
///
/// `x`/`y` are filled in by the coordinate transformer; for every turbine in
/// one layout they share the same reference point (the first turbine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbinePosition {
    /// Caller-assigned identifier
    pub id: String,
    /// Geodetic latitude in decimal degrees
    pub latitude: f64,
    /// Geodetic longitude in decimal degrees
    pub longitude: f64,
    /// Easting offset from the reference turbine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Meters>,
    /// Northing offset from the reference turbine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Meters>,
}

impl TurbinePosition {
    /// Create a position with no planar coordinates yet
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            x: None,
            y: None,
        }
    }

    /// Planar position, if it has been computed
    pub fn planar(&self) -> Option<Vec2> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vec2::new(*x, *y)),
            _ => None,
        }
    }
}

/// A wind farm layout: where the turbines stand and which model they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Turbine positions, the first one is the planar reference point
    pub turbines: Vec<TurbinePosition>,
    /// Registry key of the turbine model used for every position
    pub turbine_model: String,
    /// Declared installed capacity. When absent, turbine count times
    /// nameplate capacity is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<Megawatts>,
}

impl LayoutSpec {
    /// Create a layout without a declared capacity
    pub fn new(turbines: Vec<TurbinePosition>, turbine_model: impl Into<String>) -> Self {
        Self {
            turbines,
            turbine_model: turbine_model.into(),
            total_capacity: None,
        }
    }

    /// Set the declared installed capacity
    pub fn with_total_capacity(mut self, capacity: Megawatts) -> Self {
        self.total_capacity = Some(capacity);
        self
    }

    /// Number of turbines
    pub fn len(&self) -> usize {
        self.turbines.len()
    }

    /// True when the layout has no turbines
    pub fn is_empty(&self) -> bool {
        self.turbines.is_empty()
    }
}
