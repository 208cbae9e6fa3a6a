use crate::error::FormatError;

/// `"<n> <unit>"`, with the unit pluralized unless `n` is exactly 1
pub fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Render elapsed seconds using the two coarsest non-zero units.
///
/// Sub-minute values always read "seconds", even for 1.
pub fn format_duration(seconds: i64) -> Result<String, FormatError> {
    if seconds < 0 {
        return Err(FormatError::InvalidArgument(format!(
            "duration must be non-negative, got {}",
            seconds
        )));
    }

    if seconds < 60 {
        return Ok(format!("{} seconds", seconds));
    }

    let minutes = seconds / 60;
    let rem_seconds = seconds % 60;

    if minutes < 60 {
        if rem_seconds == 0 {
            return Ok(pluralize(minutes, "minute"));
        }
        return Ok(format!(
            "{} {}",
            pluralize(minutes, "minute"),
            pluralize(rem_seconds, "second")
        ));
    }

    let hours = minutes / 60;
    let rem_minutes = minutes % 60;

    if rem_minutes == 0 {
        Ok(pluralize(hours, "hour"))
    } else {
        Ok(format!(
            "{} {}",
            pluralize(hours, "hour"),
            pluralize(rem_minutes, "minute")
        ))
    }
}

/// Whole, non-negative seconds from a JSON number.
pub fn whole_seconds(seconds: f64) -> Result<i64, FormatError> {
    if !seconds.is_finite() || seconds.fract() != 0.0 {
        return Err(FormatError::InvalidArgument(format!(
            "{} is not a whole number",
            seconds
        )));
    }
    if seconds < 0.0 || seconds > i64::MAX as f64 {
        return Err(FormatError::InvalidArgument(format!(
            "{} is out of range",
            seconds
        )));
    }
    Ok(seconds as i64)
}
