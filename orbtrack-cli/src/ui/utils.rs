//! Formatting helpers and plain-text output for headless mode.

use std::time::Duration;

use chrono::{DateTime, Local};

use orbtrack::status::TrackingStatusSnapshot;

/// Latitude as `51.5000° N`.
pub fn format_latitude(latitude: f64) -> String {
    let hemisphere = if latitude < 0.0 { 'S' } else { 'N' };
    format!("{:.4}° {}", latitude.abs(), hemisphere)
}

/// Longitude as `0.1276° W`.
pub fn format_longitude(longitude: f64) -> String {
    let hemisphere = if longitude < 0.0 { 'W' } else { 'E' };
    format!("{:.4}° {}", longitude.abs(), hemisphere)
}

/// Unix seconds as local wall-clock time.
pub fn format_timestamp(unix_secs: u64) -> String {
    i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Short age such as `42s`, `3m10s` or `1h05m`.
pub fn format_age(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// One line describing the latest fetch, for headless output.
pub fn format_status_line(status: &TrackingStatusSnapshot) -> String {
    let now = Local::now().format("%H:%M:%S");

    if let Some(error) = &status.last_error {
        return format!(
            "[{}] {} | {} (failures: {})",
            now,
            status.follow.display_status(),
            error,
            status.fetch_failures
        );
    }

    match &status.latest {
        Some(record) => format!(
            "[{}] {}, {} | alt {:.1} km | {:.1} km/h | {} | {}",
            now,
            format_latitude(record.latitude),
            format_longitude(record.longitude),
            record.altitude,
            record.velocity,
            record.visibility,
            status.follow.display_status()
        ),
        None => format!("[{}] Acquiring ISS position...", now),
    }
}

/// Counters printed when headless mode stops.
pub fn print_session_summary(status: &TrackingStatusSnapshot) {
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Samples accepted: {}", status.samples_accepted);
    println!("  Samples rejected: {}", status.samples_rejected);
    println!("  Fetch failures:   {}", status.fetch_failures);
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbtrack::source::PositionRecord;

    fn record() -> PositionRecord {
        PositionRecord {
            latitude: -12.5,
            longitude: -45.25,
            altitude: 419.64,
            velocity: 27_582.4,
            visibility: "daylight".to_string(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_latitude(51.5), "51.5000° N");
        assert_eq!(format_latitude(-12.5), "12.5000° S");
        assert_eq!(format_longitude(-0.1276), "0.1276° W");
        assert_eq!(format_longitude(139.6917), "139.6917° E");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(42)), "42s");
        assert_eq!(format_age(Duration::from_secs(190)), "3m10s");
        assert_eq!(format_age(Duration::from_secs(3900)), "1h05m");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_700_000_000).len(), 8);
        assert_eq!(format_timestamp(u64::MAX), "-");
    }

    #[test]
    fn test_status_line_with_position() {
        let status = TrackingStatusSnapshot {
            latest: Some(record()),
            ..Default::default()
        };
        let line = format_status_line(&status);
        assert!(line.contains("12.5000° S, 45.2500° W"));
        assert!(line.contains("alt 419.6 km"));
        assert!(line.contains("27582.4 km/h"));
        assert!(line.ends_with("daylight | Following"));
    }

    #[test]
    fn test_status_line_prefers_error() {
        let status = TrackingStatusSnapshot {
            latest: Some(record()),
            last_error: Some("API error: 503".to_string()),
            fetch_failures: 2,
            ..Default::default()
        };
        assert!(format_status_line(&status).ends_with("API error: 503 (failures: 2)"));
    }
}
