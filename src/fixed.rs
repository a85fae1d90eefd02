//! Fixed-point decimal arithmetic.
//!
//! NMEA fields such as coordinates, speeds and dilution-of-precision values are
//! fixed-point decimals of varying, wire-determined precision. Representing them
//! as an integer `value` plus a power-of-ten `scale` keeps parsing exact and
//! allocation-free; conversion to `f32`/`f64` is deferred to the point of use.

use core::cmp::Ordering;

use num_traits::float::FloatCore;

/// A `value / scale` fixed-point number. `scale == 0` means "no value".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fixed {
    pub value: i32,
    pub scale: i32,
}

impl Fixed {
    /// The "no value" fixed-point number.
    pub const NONE: Fixed = Fixed { value: 0, scale: 0 };

    pub const fn new(value: i32, scale: i32) -> Self {
        Fixed { value, scale }
    }

    pub const fn is_valid(self) -> bool {
        self.scale != 0
    }

    /// Converts to `f64`, or `0.0` if `scale == 0`.
    pub fn to_f64(self) -> f64 {
        if self.scale == 0 {
            0.0
        } else {
            self.value as f64 / self.scale as f64
        }
    }

    /// Converts to `f32`, or `0.0` if `scale == 0`.
    pub fn to_f32(self) -> f32 {
        if self.scale == 0 {
            0.0
        } else {
            // `num-traits`' `libm` feature backs this division on targets
            // without a hardware FPU / without `std`.
            FloatCore::from(self.value).unwrap_or(0.0) / self.scale as f32
        }
    }

    /// Rescales to `new_scale`, using a 64-bit intermediate to avoid overflow.
    /// Returns `Fixed::NONE` if invalid or `new_scale == 0`.
    pub fn rescale(self, new_scale: i32) -> Fixed {
        if !self.is_valid() || new_scale == 0 {
            return Fixed::NONE;
        }
        if new_scale == self.scale {
            return self;
        }
        let v = (self.value as i64) * (new_scale as i64) / (self.scale as i64);
        Fixed::new(v as i32, new_scale)
    }

    /// Multiplies by an integer, keeping the scale.
    pub fn mul_int(self, n: i32) -> Fixed {
        if !self.is_valid() {
            return Fixed::NONE;
        }
        Fixed::new(self.value.wrapping_mul(n), self.scale)
    }

    /// Divides by an integer by multiplying the scale, keeping the value.
    ///
    /// Mirrors `fp_div_int` from the original fixed-point arithmetic: cheap,
    /// symmetric with [`Fixed::mul_int`], and used by the knots conversions below.
    pub fn div_int(self, n: i32) -> Fixed {
        if !self.is_valid() || n == 0 {
            return Fixed::NONE;
        }
        Fixed::new(self.value, self.scale.wrapping_mul(n))
    }

    /// Adds two fixed-point numbers, rescaling to the larger of the two scales.
    pub fn add(self, other: Fixed) -> Fixed {
        if !self.is_valid() {
            return other;
        }
        if !other.is_valid() {
            return self;
        }
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => Fixed::new(self.value.wrapping_add(other.value), self.scale),
            Ordering::Greater => {
                let rhs = other.rescale(self.scale);
                Fixed::new(self.value.wrapping_add(rhs.value), self.scale)
            }
            Ordering::Less => {
                let lhs = self.rescale(other.scale);
                Fixed::new(lhs.value.wrapping_add(other.value), other.scale)
            }
        }
    }
}

/// Converts a raw NMEA coordinate (`DDMM.MMMM` / `DDDMM.MMMM`) to signed decimal
/// degrees. Returns `NaN` if `raw` or `hemisphere` is invalid.
pub fn coord_to_degrees(raw: Fixed, hemisphere: u8) -> f64 {
    if !raw.is_valid() || hemisphere == 0 {
        return f64::NAN;
    }
    let whole = raw.value / raw.scale;
    let degrees = (whole / 100) as f64;
    let raw_f = raw.to_f64();
    let minutes = raw_f - degrees * 100.0;
    let result = degrees + minutes / 60.0;
    match hemisphere {
        b'S' | b'W' => -result,
        _ => result,
    }
}

/// Converts a raw NMEA coordinate to fixed-point degrees scaled by `1e7`,
/// using 64-bit intermediates throughout (no floating point).
pub fn coord_to_fixed_degrees(raw: Fixed, hemisphere: u8) -> Option<i64> {
    if !raw.is_valid() || hemisphere == 0 {
        return None;
    }
    let scale = raw.scale as i64;
    let value = raw.value as i64;
    let degrees = value / (100 * scale);
    let minutes_scaled = value - degrees * 100 * scale;
    let result = degrees * 10_000_000 + (minutes_scaled * 10_000_000) / (60 * scale);
    Some(if matches!(hemisphere, b'S' | b'W') {
        -result
    } else {
        result
    })
}

/// Converts a knots fixed-point value to `m/s * 1000` (thousandths of a m/s).
pub fn knots_to_mps_milli(value: Fixed) -> i64 {
    if value.scale == 0 {
        return 0;
    }
    (value.value as i64) * 514_444 / (value.scale as i64 * 1000)
}

/// Converts a knots fixed-point value to `km/h * 1000` (thousandths of a km/h).
pub fn knots_to_kph_milli(value: Fixed) -> i64 {
    if value.scale == 0 {
        return 0;
    }
    (value.value as i64) * 1852 / value.scale as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn to_float_invalid_is_zero() {
        assert_eq!(Fixed::NONE.to_f64(), 0.0);
        assert_eq!(Fixed::NONE.to_f32(), 0.0);
    }

    #[test]
    fn rescale_preserves_value() {
        let f = Fixed::new(1234, 100); // 12.34
        let rescaled = f.rescale(1000);
        assert_eq!(rescaled, Fixed::new(12340, 1000));
        assert_relative_eq!(rescaled.to_f64(), f.to_f64(), epsilon = 1e-9);
    }

    #[test]
    fn add_rescales_to_larger_scale() {
        let a = Fixed::new(12, 10); // 1.2
        let b = Fixed::new(345, 100); // 3.45
        let sum = a.add(b);
        assert_eq!(sum.scale, 100);
        assert_relative_eq!(sum.to_f64(), 4.65, epsilon = 1e-9);
    }

    #[test]
    fn mul_and_div_int() {
        let f = Fixed::new(500, 100); // 5.00
        assert_eq!(f.mul_int(3), Fixed::new(1500, 100));
        assert_eq!(f.div_int(2), Fixed::new(500, 200));
    }

    #[test]
    fn coordinate_round_trip() {
        // 4807.038,N -> 48 + 7.038/60
        let raw = Fixed::new(4807038, 1000);
        let degrees = coord_to_degrees(raw, b'N');
        assert_relative_eq!(degrees, 48.0 + 7.038 / 60.0, epsilon = 1e-7);
        let south = coord_to_degrees(raw, b'S');
        assert_relative_eq!(south, -(48.0 + 7.038 / 60.0), epsilon = 1e-7);
    }

    #[test]
    fn coordinate_invalid_is_nan() {
        assert!(coord_to_degrees(Fixed::NONE, b'N').is_nan());
        assert!(coord_to_degrees(Fixed::new(1, 1), 0).is_nan());
    }

    #[test]
    fn knots_conversions() {
        // 10 knots
        let ten_knots = Fixed::new(100, 10);
        assert_eq!(knots_to_mps_milli(ten_knots), 5144);
        assert_eq!(knots_to_kph_milli(ten_knots), 18520);
    }
}
