use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ProdlineError, Result};

/// ISO-8601 with microseconds and an explicit `+00:00` offset, e.g.
/// `2026-02-01T00:00:00.000000+00:00`.
pub fn format_reading_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn reading_time_now() -> String {
    format_reading_time(Utc::now())
}

/// Accepts bare seconds (`15`, `0.5`) or a humantime duration (`500ms`, `1m`).
pub fn parse_wait_time(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if let Ok(secs) = trimmed.parse::<f64>() {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ProdlineError::Parse(format!(
                "wait time must be a non-negative number of seconds, got {input}"
            )));
        }
        return Ok(Duration::from_secs_f64(secs));
    }

    humantime::parse_duration(trimmed)
        .map_err(|e| ProdlineError::Parse(format!("invalid wait time {input}: {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_with_offset_and_micros() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();
        assert_eq!(format_reading_time(ts), "2026-02-01T08:30:00.000000+00:00");
    }

    #[test]
    fn reading_time_parses_back() {
        let now = reading_time_now();
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
        assert!(now.ends_with("+00:00"));
    }

    #[test]
    fn parses_seconds_and_durations() {
        assert_eq!(parse_wait_time("15").unwrap(), Duration::from_secs(15));
        assert_eq!(parse_wait_time("0.5").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_wait_time("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_wait_time("1m").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_invalid() {
        assert!(parse_wait_time("-1").is_err());
        assert!(parse_wait_time("soon").is_err());
    }
}
