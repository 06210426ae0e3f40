//! Semantic unit types for type-safe physical quantity handling
//!
//! This module provides newtype wrappers for the quantities that flow through
//! the wake engine so that a wind speed can never be passed where a power
//! output or a distance is expected.
//!
//! # Design Philosophy
//! - All types use f64: energy accumulates over 8760 hours and many sectors
//! - Implements common traits (Add, Sub, Mul, Div, Ord, Display, etc.)
//! - Provides explicit conversion methods between related types
//! - Serde support for serialization (serialized as the bare number)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//!
//! # Usage
//! ```
//! use wake_sim_core::core_types::units::{Degrees, Megawatts, Meters};
//!
//! let rotor = Meters::new(120.0);
//! assert_eq!(*rotor.half(), 60.0);
//!
//! let dir = Degrees::new(-90.0).normalized();
//! assert_eq!(*dir, 270.0);
//!
//! let a = Megawatts::new(1.5);
//! let b = Megawatts::new(2.5);
//! assert_eq!(a.max(b), b);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Sub};

/// Implements the trait set shared by every scalar unit.
///
/// Each unit gets total ordering, `Deref<Target = f64>`, scalar
/// multiplication/division, same-unit addition/subtraction, summation and a
/// `Display` with the given suffix.
macro_rules! scalar_unit {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Zero value
            pub const ZERO: $name = $name(0.0);

            /// Create a new value. Asserts the value is finite.
            #[inline]
            #[must_use]
            #[track_caller]
            pub fn new(value: f64) -> Self {
                debug_assert!(
                    value.is_finite(),
                    concat!(stringify!($name), "::new: value must be finite")
                );
                $name(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                $name(iter.map(|v| v.0).sum())
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if let Some(precision) = f.precision() {
                    write!(f, "{:.*}{}", precision, self.0, $suffix)
                } else {
                    write!(f, "{}{}", self.0, $suffix)
                }
            }
        }
    };
}

// ============================================================================
// SPATIAL
// ============================================================================

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

scalar_unit!(Meters, " m");

impl Meters {
    /// Half of this length (rotor diameter to rotor radius)
    #[inline]
    #[must_use]
    pub fn half(self) -> Meters {
        Meters(self.0 * 0.5)
    }

    /// Express this distance as a multiple of a reference length
    /// (spacing in rotor diameters). Returns 0 for a zero reference.
    #[inline]
    #[must_use]
    pub fn in_units_of(self, reference: Meters) -> f64 {
        if reference.0 > 0.0 {
            self.0 / reference.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// VELOCITY
// ============================================================================

/// Wind speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

scalar_unit!(MetersPerSecond, " m/s");

// ============================================================================
// POWER AND ENERGY
// ============================================================================

/// Electrical power in megawatts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megawatts(f64);

scalar_unit!(Megawatts, " MW");

impl Megawatts {
    /// Energy produced when running at this power for `hours`
    #[inline]
    #[must_use]
    pub fn over_hours(self, hours: f64) -> MegawattHours {
        MegawattHours(self.0 * hours)
    }
}

/// Energy in megawatt-hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MegawattHours(f64);

scalar_unit!(MegawattHours, " MWh");

// ============================================================================
// ANGLE AND RATIO
// ============================================================================

/// Angle in degrees (meteorological convention for wind: direction the wind
/// blows FROM, 0 = North, 90 = East)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

scalar_unit!(Degrees, "°");

impl Degrees {
    /// Wrap into [0, 360)
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Degrees {
        let wrapped = self.0.rem_euclid(360.0);
        // rem_euclid can return 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            Degrees(0.0)
        } else {
            Degrees(wrapped)
        }
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Percentage value (0-100 for fractions of a whole, unbounded for ratios)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

scalar_unit!(Percent, "%");

impl Percent {
    /// Create from a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Percent {
        Percent(fraction * 100.0)
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// `part / whole` as a percentage, 0 when `whole` is zero
    #[inline]
    #[must_use]
    pub fn ratio(part: f64, whole: f64) -> Percent {
        if whole > 0.0 {
            Percent(part / whole * 100.0)
        } else {
            Percent(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degrees_normalization() {
        assert_eq!(*Degrees::new(360.0).normalized(), 0.0);
        assert_eq!(*Degrees::new(-45.0).normalized(), 315.0);
        assert_eq!(*Degrees::new(725.0).normalized(), 5.0);
        assert_eq!(*Degrees::new(-1e-18).normalized(), 0.0);
    }

    #[test]
    fn test_percent_helpers() {
        assert_relative_eq!(*Percent::from_fraction(0.35), 35.0);
        assert_relative_eq!(Percent::new(12.5).to_fraction(), 0.125);
        assert_eq!(*Percent::ratio(5.0, 0.0), 0.0);
        assert_relative_eq!(*Percent::ratio(1.0, 4.0), 25.0);
    }

    #[test]
    fn test_energy_from_power() {
        let energy = Megawatts::new(2.0).over_hours(8760.0);
        assert_relative_eq!(*energy, 17520.0);
    }

    #[test]
    fn test_spacing_in_diameters() {
        let spacing = Meters::new(700.0);
        assert_relative_eq!(spacing.in_units_of(Meters::new(100.0)), 7.0);
        assert_eq!(spacing.in_units_of(Meters::ZERO), 0.0);
    }

    #[test]
    fn test_total_ordering_and_sum() {
        let values = [Megawatts::new(1.0), Megawatts::new(3.0), Megawatts::new(2.0)];
        assert_eq!(values.iter().copied().max(), Some(Megawatts::new(3.0)));
        let total: Megawatts = values.iter().copied().sum();
        assert_eq!(total, 6.0);
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.1}", MetersPerSecond::new(7.26)), "7.3 m/s");
        assert_eq!(format!("{}", Percent::new(15.0)), "15%");
    }
}
