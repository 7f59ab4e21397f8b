
/// 將 x 捨入到小數點後 digits 位。
///
/// 中點（剛好 .5）採 round-half-even，避免一律遠離零造成的系統性偏差；
/// digits > 22 時拆成兩段縮放，防止 10^digits 本身在 f64 中溢位。
pub fn round(x: f64, digits: u32) -> f64 {
    let (scale, guard) = if digits > 22 {
        (10f64.powi((digits - 22) as i32), 1e22)
    } else {
        (10f64.powi(digits as i32), 1.0)
    };

    let scaled = (x * scale) * guard;
    let mut nearest = scaled.round();
    if (scaled - nearest).abs() == 0.5 {
        nearest = 2.0 * (scaled / 2.0).round();
    }

    (nearest / guard) / scale
}

#[cfg(test)]
mod tests {
    use super::round;

    #[test]
    fn rounds_to_requested_digits() {
        assert_eq!(round(3.14159, 2), 3.14);
        assert_eq!(round(3.14159, 4), 3.1416);
        assert_eq!(round(-3.14159, 2), -3.14);
    }

    #[test]
    fn exact_midpoints_round_half_even() {
        assert_eq!(round(0.5, 0), 0.0);
        assert_eq!(round(1.5, 0), 2.0);
        assert_eq!(round(2.5, 0), 2.0);
        assert_eq!(round(-1.5, 0), -2.0);
    }

    #[test]
    fn integral_values_pass_through() {
        assert_eq!(round(7.0, 3), 7.0);
        assert_eq!(round(0.0, 10), 0.0);
    }
}
