//! Power curve interpolation

use crate::core_types::turbine::TurbineSpec;
use crate::core_types::units::{Megawatts, MetersPerSecond};

/// Electrical output of `spec` at hub-height `wind_speed`
///
/// - below cut-in or above cut-out: 0
/// - exactly on a tabulated speed: the tabulated power
/// - between two tabulated speeds: linear interpolation (uneven spacing is fine)
/// - beyond the last tabulated speed but not past cut-out: rated capacity,
///   or the last tabulated power if that rounds above it
/// - between cut-in and a curve that starts above cut-in: ramp from 0 at cut-in
pub fn power_output(spec: &TurbineSpec, wind_speed: MetersPerSecond) -> Megawatts {
    if wind_speed < spec.cut_in_speed || wind_speed > spec.cut_out_speed {
        return Megawatts::ZERO;
    }

    let curve = &spec.power_curve;
    let idx = curve.partition_point(|p| p.wind_speed < wind_speed);

    if idx == curve.len() {
        return curve
            .last()
            .map_or(spec.capacity, |last| last.power.max(spec.capacity));
    }

    let upper = curve[idx];
    if upper.wind_speed == wind_speed {
        return upper.power;
    }

    let (lower_speed, lower_power) = if idx == 0 {
        (spec.cut_in_speed, Megawatts::ZERO)
    } else {
        (curve[idx - 1].wind_speed, curve[idx - 1].power)
    };

    let span = *upper.wind_speed - *lower_speed;
    if span <= 0.0 {
        return upper.power;
    }
    let t = (*wind_speed - *lower_speed) / span;
    lower_power + (upper.power - lower_power) * t
}

/// Output as a fraction of nameplate capacity, clamped to [0, 1]
///
/// Used as the thrust coefficient proxy by the wake model.
pub fn load_fraction(spec: &TurbineSpec, power: Megawatts) -> f64 {
    if *spec.capacity <= 0.0 {
        return 0.0;
    }
    (*power / *spec.capacity).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::turbine::{PowerCurvePoint, TurbineRegistry};
    use approx::assert_relative_eq;

    fn ms(v: f64) -> MetersPerSecond {
        MetersPerSecond::new(v)
    }

    #[test]
    fn test_exact_table_hit() {
        let spec = TurbineSpec::ge_2_5_120();
        assert_eq!(power_output(&spec, ms(10.0)), Megawatts::new(2.0));
        assert_eq!(power_output(&spec, ms(4.0)), Megawatts::new(0.1));
    }

    #[test]
    fn test_linear_interpolation() {
        let spec = TurbineSpec::ge_2_5_120();
        assert_relative_eq!(*power_output(&spec, ms(8.5)), 1.55, epsilon = 1e-12);
        assert_relative_eq!(*power_output(&spec, ms(6.25)), 0.6875, epsilon = 1e-12);
    }

    #[test]
    fn test_uneven_spacing() {
        let spec = TurbineSpec::nordex_n100_2_5();
        // between (7.5, 0.95) and (9.0, 1.6)
        assert_relative_eq!(*power_output(&spec, ms(8.0)), 0.95 + 0.65 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outside_operating_range_is_zero() {
        for spec in TurbineRegistry::standard().specs() {
            let below = ms(*spec.cut_in_speed * 0.99);
            let above = ms(*spec.cut_out_speed + 0.5);
            assert_eq!(*power_output(spec, below), 0.0, "{}", spec.name);
            assert_eq!(*power_output(spec, above), 0.0, "{}", spec.name);
            assert_eq!(*power_output(spec, ms(0.0)), 0.0, "{}", spec.name);
        }
    }

    #[test]
    fn test_beyond_table_returns_rated() {
        let spec = TurbineSpec::vestas_v90_2_0();
        // last tabulated point is 13 m/s, cut-out is 25
        assert_eq!(power_output(&spec, ms(18.0)), spec.capacity);
        assert_eq!(power_output(&spec, ms(25.0)), spec.capacity);
        assert_eq!(*power_output(&spec, ms(25.01)), 0.0);
    }

    #[test]
    fn test_beyond_table_keeps_rounded_up_rated_power() {
        let mut spec = TurbineSpec::vestas_v90_2_0();
        spec.power_curve.last_mut().unwrap().power = Megawatts::new(2.001);
        assert_eq!(*power_output(&spec, ms(13.0)), 2.001);
        assert_eq!(*power_output(&spec, ms(18.0)), 2.001);
    }

    #[test]
    fn test_curve_starting_above_cut_in_ramps_from_zero() {
        let mut spec = TurbineSpec::ge_2_5_120();
        spec.power_curve = vec![
            PowerCurvePoint::new(5.0, 0.5),
            PowerCurvePoint::new(12.0, 2.5),
        ];
        // cut-in 3, first point (5, 0.5)
        assert_relative_eq!(*power_output(&spec, ms(4.0)), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_load_fraction_clamped() {
        let spec = TurbineSpec::ge_2_5_120();
        assert_relative_eq!(load_fraction(&spec, Megawatts::new(1.25)), 0.5);
        assert_eq!(load_fraction(&spec, Megawatts::new(3.0)), 1.0);
    }
}
