// Licensed under the Apache License, Version 2.0

/// Rounds to the nearest integer, halves away from zero.
///
/// `f32::round` needs `std` (or libm), so this is done with a biased truncation.
#[inline(always)]
pub fn round_to_int(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_int(3619.87), 3620);
        assert_eq!(round_to_int(2.5), 3);
        assert_eq!(round_to_int(2.49), 2);
        assert_eq!(round_to_int(-2.5), -3);
        assert_eq!(round_to_int(-0.2), 0);
    }
}
