//! Statistical primitives shared by the ledger analyzer and the predictor

/// Sum of all values
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, or `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator)
///
/// Undefined for fewer than two values; reported as 0.0 so a single-row
/// ledger has no volatility rather than a NaN.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = sum(values) / values.len() as f64;
    let squared: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (squared / (values.len() - 1) as f64).sqrt()
}

/// Population standard deviation (N denominator), `None` for an empty slice
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((squared / values.len() as f64).sqrt())
}

/// Round to 2 decimal places.
///
/// Rounds the exact binary value with ties to even, so `round2(2.675)` is
/// `2.67` (2.675 is stored as 2.67499...). Every reported figure goes through
/// this function.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_sum() {
        let values = [100.0, 100.0, 100.0, 100.0, 1000.0];
        assert_eq!(sum(&values), 1400.0);
        assert_eq!(mean(&values), Some(280.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sample_std() {
        // Deviations: -180 x4, 720 -> 648000 / 4
        let values = [100.0, 100.0, 100.0, 100.0, 1000.0];
        assert!((sample_std(&values) - 162_000f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_sample_std_degenerate() {
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(sample_std(&[42.0]), 0.0);
        assert_eq!(sample_std(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_population_std() {
        let values = [100.0, 100.0, 100.0, 100.0, 1000.0];
        assert!((population_std(&values).unwrap() - 360.0).abs() < 1e-9);
        assert_eq!(population_std(&[]), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(402.492_235_949_962_1), 402.49);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(2.675), 2.67);
        assert!(round2(f64::NAN).is_nan());
    }
}
