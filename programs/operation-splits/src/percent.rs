use crate::constants::{MAX_PERCENT, MIN_PERCENT};

/// Parses a user-entered share and clamps it into [0, 100]
/// Non-numeric input maps to 0
pub fn normalize(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return MIN_PERCENT;
    }

    // Accept a comma decimal marker from es-CL keyboards
    let parsed = trimmed.replace(',', ".").parse::<f64>().unwrap_or(MIN_PERCENT);
    clamp_percent(parsed)
}

/// Clamps an already-numeric share into [0, 100]
/// NaN and infinities are treated as non-numeric
pub fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_in_range() {
        assert_eq!(normalize("40"), 40.0);
        assert_eq!(normalize(" 14 "), 14.0);
        assert_eq!(normalize("12.5"), 12.5);
        assert_eq!(normalize("12,5"), 12.5);
    }

    #[test]
    fn normalize_clamps_bounds() {
        assert_eq!(normalize("-5"), 0.0);
        assert_eq!(normalize("150"), 100.0);
        assert_eq!(normalize("100"), 100.0);
        assert_eq!(normalize("0"), 0.0);
    }

    #[test]
    fn normalize_non_numeric_is_zero() {
        assert_eq!(normalize("abc"), 0.0);
        assert_eq!(normalize(""), 0.0);
        assert_eq!(normalize("NaN"), 0.0);
        assert_eq!(normalize("inf"), 0.0);
    }

    #[test]
    fn clamp_handles_non_finite() {
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 0.0);
        assert_eq!(clamp_percent(-0.5), 0.0);
        assert_eq!(clamp_percent(36.0), 36.0);
    }
}
