//! Geodetic to local planar projection
//!
//! Wind farms span a few kilometres, so an equirectangular projection about
//! the first turbine is accurate well below the resolution of the wake model.

use crate::core_types::layout::{TurbinePosition, Vec2};
use crate::core_types::units::Meters;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Local east/north frame anchored at a reference coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    ref_latitude: f64,
    ref_longitude: f64,
    cos_ref_latitude: f64,
}

impl LocalFrame {
    /// Frame with its origin at the given latitude/longitude
    pub fn new(ref_latitude: f64, ref_longitude: f64) -> Self {
        Self {
            ref_latitude,
            ref_longitude,
            cos_ref_latitude: ref_latitude.to_radians().cos(),
        }
    }

    /// Offset of a coordinate from the origin, in meters
    pub fn project(&self, latitude: f64, longitude: f64) -> Vec2 {
        Vec2::new(
            (longitude - self.ref_longitude) * self.cos_ref_latitude * METERS_PER_DEGREE,
            (latitude - self.ref_latitude) * METERS_PER_DEGREE,
        )
    }
}

/// Fill in planar `x`/`y` for every turbine, relative to the first one
///
/// Empty input returns an empty list.
pub fn project_to_local(positions: &[TurbinePosition]) -> Vec<TurbinePosition> {
    let Some(reference) = positions.first() else {
        return Vec::new();
    };
    let frame = LocalFrame::new(reference.latitude, reference.longitude);

    positions
        .iter()
        .map(|pos| {
            let planar = frame.project(pos.latitude, pos.longitude);
            TurbinePosition {
                x: Some(Meters::new(planar.x)),
                y: Some(Meters::new(planar.y)),
                ..pos.clone()
            }
        })
        .collect()
}

/// Pairwise spacing summary for a layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingStats {
    /// Smallest distance between any two turbines
    pub min_spacing: Meters,
    /// Mean over turbines of the distance to the nearest neighbour
    pub mean_nearest_neighbour: Meters,
}

/// Spacing statistics, `None` for fewer than two turbines
pub fn spacing_stats(points: &[Vec2]) -> Option<SpacingStats> {
    if points.len() < 2 {
        return None;
    }

    let mut nearest = vec![f64::INFINITY; points.len()];
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = (points[i] - points[j]).norm();
            nearest[i] = nearest[i].min(d);
            nearest[j] = nearest[j].min(d);
        }
    }

    let min = nearest.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = nearest.iter().sum::<f64>() / nearest.len() as f64;

    Some(SpacingStats {
        min_spacing: Meters::new(min),
        mean_nearest_neighbour: Meters::new(mean),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input_is_noop() {
        assert!(project_to_local(&[]).is_empty());
    }

    #[test]
    fn test_reference_turbine_at_origin() {
        let out = project_to_local(&[
            TurbinePosition::new("A", 55.0, 8.0),
            TurbinePosition::new("B", 55.01, 8.0),
        ]);
        assert_eq!(out[0].planar(), Some(Vec2::zeros()));
        assert_relative_eq!(*out[1].y.unwrap(), 0.01 * METERS_PER_DEGREE, epsilon = 1e-6);
        assert_relative_eq!(*out[1].x.unwrap(), 0.0);
        assert_eq!(out[1].id, "B");
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let equator = LocalFrame::new(0.0, 0.0).project(0.0, 0.01);
        let sixty = LocalFrame::new(60.0, 0.0).project(60.0, 0.01);
        assert_relative_eq!(sixty.x, equator.x * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_spacing_stats() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(300.0, 0.0), Vec2::new(1000.0, 0.0)];
        let stats = spacing_stats(&points).unwrap();
        assert_relative_eq!(*stats.min_spacing, 300.0);
        // nearest: 300, 300, 700
        assert_relative_eq!(*stats.mean_nearest_neighbour, 1300.0 / 3.0);

        assert!(spacing_stats(&points[..1]).is_none());
    }
}
