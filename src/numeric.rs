//! Basic numerical concepts used throughout the crate

use num_traits::PrimInt;

/// Floating-point precision of candidate attributes (configured here)
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// Integer type of ordinal and bitmask ID fields
pub type IdValue = i32;

/// Mathematical functions
pub mod functions {
    use super::*;

    /// Absolute value (NaN stays NaN, so every comparison against it fails)
    pub fn abs(x: Float) -> Float {
        x.abs()
    }

    /// Truth that every bit of `bits` is set in `value`
    pub fn has_bits<T: PrimInt>(value: T, bits: T) -> bool {
        (value & bits) == bits
    }
}

#[cfg(test)]
mod tests {
    use super::functions::*;

    #[test]
    fn bitmask_checks() {
        assert!(has_bits(16, 16));
        assert!(has_bits(0b11110, 0b10000));
        assert!(!has_bits(0b01111, 0b10000));
        assert!(has_bits(3u8, 2u8));
        assert!(!has_bits(1i64, 2i64));
        // Requiring no bits at all is trivially satisfied
        assert!(has_bits(0, 0));
    }

    #[test]
    fn abs_propagates_nan() {
        assert_eq!(abs(-2.5), 2.5);
        assert!(abs(super::Float::NAN).is_nan());
    }
}
