//! Resistance and temperature conversion for platinum RTDs.
//!
//! Follows the Analog Devices AN-709 technique: closed-form solution of the
//! Callendar-Van Dusen quadratic for temperatures at or above 0 °C, and a
//! 5th-order polynomial fit below.

use num_traits::Float;

/// IEC 751 alpha coefficient for platinum RTDs
pub const RTD_A: f32 = 3.9083e-3;
/// IEC 751 beta coefficient for platinum RTDs
pub const RTD_B: f32 = -5.775e-7;

/// Scale a raw 15-bit RTD code to ohms against the reference resistor.
pub fn resistance_from_raw(raw: u16, ref_resistor: f32) -> f32 {
    f32::from(raw) / 32768.0 * ref_resistor
}

/// Convert an RTD resistance in ohms to degrees Celsius.
///
/// `rtd_nominal` is the 0 °C resistance of the element, usually 100 (PT100)
/// or 1000 (PT1000). The quadratic solution is computed first; only if it
/// comes out negative does the sub-zero polynomial take over.
pub fn temperature_from_resistance(ohms: f32, rtd_nominal: f32) -> f32 {
    let z1 = -RTD_A;
    let z2 = RTD_A * RTD_A - 4.0 * RTD_B;
    let z3 = (4.0 * RTD_B) / rtd_nominal;
    let z4 = 2.0 * RTD_B;

    let temp = (Float::sqrt(z2 + z3 * ohms) + z1) / z4;
    if temp >= 0.0 {
        return temp;
    }

    // Sub-zero fit, on the resistance ratio normalized to a 100 ohm element
    let rt = ohms / rtd_nominal * 100.0;
    let mut rpoly = rt;

    let mut temp = -242.02;
    temp += 2.2228 * rpoly;
    rpoly *= rt; // square
    temp += 2.5859e-3 * rpoly;
    rpoly *= rt; // ^3
    temp -= 4.8260e-6 * rpoly;
    rpoly *= rt; // ^4
    temp -= 2.8183e-8 * rpoly;
    rpoly *= rt; // ^5
    temp += 1.5243e-10 * rpoly;

    temp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32, eps: f32) {
        assert!(
            (actual - expected).abs() < eps,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn calibration_point_is_zero_celsius() {
        // 100.0 ohm on a PT100 is 0 C by definition
        let ohms = resistance_from_raw(8192, 400.0);
        assert_close(ohms, 100.0, 1e-4);
        assert_close(temperature_from_resistance(ohms, 100.0), 0.0, 1e-3);
    }

    #[test]
    fn positive_branch_matches_quadratic() {
        let ohms = resistance_from_raw(7621, 430.0);
        assert_close(ohms, 100.007, 1e-3);
        assert_close(temperature_from_resistance(ohms, 100.0), 0.018, 1e-3);

        let ohms = resistance_from_raw(9420, 430.0);
        assert_close(ohms, 123.6145, 1e-3);
        assert_close(temperature_from_resistance(ohms, 100.0), 60.9707, 1e-2);
    }

    #[test]
    fn negative_branch_uses_polynomial() {
        // 80.31 ohm is -50 C in the PT100 reference table
        let ohms = resistance_from_raw(6121, 430.0);
        assert_close(ohms, 80.3232, 1e-3);
        assert_close(temperature_from_resistance(ohms, 100.0), -49.958, 5e-2);

        let ohms = resistance_from_raw(5000, 430.0);
        assert_close(temperature_from_resistance(ohms, 100.0), -86.744, 5e-2);
    }

    #[test]
    fn pt1000_scales_with_nominal() {
        let ohms = resistance_from_raw(24437, 4300.0);
        assert_close(ohms, 3206.76, 1e-1);
        assert_close(temperature_from_resistance(ohms, 1000.0), 621.756, 1e-1);
    }
}
