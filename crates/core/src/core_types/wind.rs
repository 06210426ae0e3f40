//! Wind resource description
//!
//! A wind resource is a discretised wind rose: an ordered list of
//! (direction, representative speed, frequency) sectors.

use crate::core_types::layout::Vec2;
use crate::core_types::units::{Degrees, MetersPerSecond, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sector of a wind rose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindCondition {
    /// Direction the wind blows FROM (0 = North, 90 = East)
    pub direction: Degrees,
    /// Representative hub-height wind speed for the sector
    pub speed: MetersPerSecond,
    /// Share of the year the sector occurs
    pub frequency: Percent,
}

impl WindCondition {
    /// Create a condition from raw degrees, m/s and percent
    pub fn new(direction: f64, speed: f64, frequency: f64) -> Self {
        Self {
            direction: Degrees::new(direction),
            speed: MetersPerSecond::new(speed),
            frequency: Percent::new(frequency),
        }
    }

    /// Unit vector pointing where the air flows TO
    ///
    /// Wind from the west (270°) flows east: `(1, 0)`.
    pub fn flow_unit_vector(&self) -> Vec2 {
        let angle = self.direction.to_radians();
        Vec2::new(-angle.sin(), -angle.cos())
    }

    /// Compass sector this direction falls in
    pub fn cardinal(&self) -> CardinalDirection {
        CardinalDirection::from_degrees(self.direction)
    }
}

/// 8-point compass sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum CardinalDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalDirection {
    const ALL: [CardinalDirection; 8] = [
        CardinalDirection::N,
        CardinalDirection::NE,
        CardinalDirection::E,
        CardinalDirection::SE,
        CardinalDirection::S,
        CardinalDirection::SW,
        CardinalDirection::W,
        CardinalDirection::NW,
    ];

    /// `round(degrees / 45) mod 8`
    pub fn from_degrees(direction: Degrees) -> Self {
        let index = (*direction.normalized() / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    /// Short compass label
    pub fn label(self) -> &'static str {
        match self {
            CardinalDirection::N => "N",
            CardinalDirection::NE => "NE",
            CardinalDirection::E => "E",
            CardinalDirection::SE => "SE",
            CardinalDirection::S => "S",
            CardinalDirection::SW => "SW",
            CardinalDirection::W => "W",
            CardinalDirection::NW => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Ordered set of wind conditions for a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResource {
    /// Sectors in caller order
    pub conditions: Vec<WindCondition>,
}

impl WindResource {
    /// Wrap a list of conditions
    pub fn new(conditions: Vec<WindCondition>) -> Self {
        Self { conditions }
    }

    /// Embedded 8-sector fallback rose used when the caller supplies none
    ///
    /// Prevailing south-westerlies with moderate representative speeds.
    /// Frequencies sum to exactly 100 %.
    pub fn default_rose() -> Self {
        Self::new(vec![
            WindCondition::new(0.0, 6.5, 8.0),
            WindCondition::new(45.0, 6.0, 7.0),
            WindCondition::new(90.0, 6.2, 9.0),
            WindCondition::new(135.0, 7.0, 11.0),
            WindCondition::new(180.0, 7.8, 15.0),
            WindCondition::new(225.0, 8.4, 20.0),
            WindCondition::new(270.0, 8.0, 18.0),
            WindCondition::new(315.0, 7.2, 12.0),
        ])
    }

    /// Sum of all sector frequencies
    pub fn frequency_sum(&self) -> Percent {
        self.conditions.iter().map(|c| c.frequency).sum()
    }

    /// True when frequencies sum to 100 % within `tolerance` points
    pub fn is_normalized(&self, tolerance: Percent) -> bool {
        (*self.frequency_sum() - 100.0).abs() <= *tolerance
    }

    /// The sector with the highest frequency (first one on ties)
    pub fn most_frequent(&self) -> Option<(usize, &WindCondition)> {
        self.conditions
            .iter()
            .enumerate()
            .fold(None, |best, (idx, cond)| match best {
                Some((_, b)) if b.frequency >= cond.frequency => best,
                _ => Some((idx, cond)),
            })
    }

    /// Number of sectors
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True when there are no sectors
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
