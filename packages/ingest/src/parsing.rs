//! Field coercion helpers shared by the table parsers.

/// Parses a count field, treating anything that is not a finite number as 0.
///
/// Missing cells, blanks, `"NaN"`, `"inf"` and free text all coerce to zero
/// so an invalid number can never reach a sum.
#[must_use]
pub fn coerce_count(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses a year field. Accepts integral floats such as `"2010.0"`.
#[must_use]
pub fn parse_year(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        return Some(value as i32);
    }
    None
}
