//! Effort estimate.
//!
//! ```text
//! base       = modules × minutes_per_module
//! multiplier = clamp(0.5 + total_complexity / modules, min, max)
//! minutes    = round(base × multiplier)
//! ```
//!
//! Durations render as minutes below an hour, hours and minutes below one
//! 8-hour workday, and days and hours beyond that.

use refplan_core::config::EffortConfig;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 8 * MINUTES_PER_HOUR;

/// Estimated refactoring time in minutes. An empty graph takes no time.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn estimate_minutes(module_count: usize, total_complexity: f64, config: &EffortConfig) -> u64 {
    if module_count == 0 {
        return 0;
    }
    let n = module_count as f64;
    let base = n * f64::from(config.minutes_per_module);
    let average = if total_complexity.is_finite() {
        total_complexity / n
    } else {
        0.0
    };
    let multiplier = (0.5 + average)
        .max(config.min_multiplier)
        .min(config.max_multiplier);
    (base * multiplier).round().max(0.0) as u64
}

/// Render `minutes` as a human-readable duration.
#[must_use]
pub fn format_duration(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        return unit(minutes, "minute");
    }
    if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        let rest = minutes % MINUTES_PER_HOUR;
        return with_remainder(unit(hours, "hour"), rest, "minute");
    }
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    with_remainder(unit(days, "day"), hours, "hour")
}

fn unit(count: u64, name: &str) -> String {
    if count == 1 {
        format!("1 {name}")
    } else {
        format!("{count} {name}s")
    }
}

fn with_remainder(head: String, rest: u64, name: &str) -> String {
    if rest == 0 {
        head
    } else {
        format!("{head} {}", unit(rest, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_takes_no_time() {
        assert_eq!(estimate_minutes(0, 0.0, &EffortConfig::default()), 0);
        assert_eq!(format_duration(0), "0 minutes");
    }

    #[test]
    fn multiplier_follows_average_complexity() {
        // 3 modules, average 0.5: 60 × 1.0.
        assert_eq!(estimate_minutes(3, 1.5, &EffortConfig::default()), 60);
        // single module at 0.5: 20 × 1.0.
        assert_eq!(estimate_minutes(1, 0.5, &EffortConfig::default()), 20);
    }

    #[test]
    fn multiplier_is_clamped() {
        let config = EffortConfig::default();
        // average 0.0 gives the 0.5 floor.
        assert_eq!(estimate_minutes(4, 0.0, &config), 40);
        // average far above 1.5 hits the 2.0 ceiling.
        assert_eq!(estimate_minutes(2, 10.0, &config), 80);
    }

    #[test]
    fn rounds_to_nearest_minute() {
        // 20 × (0.5 + 0.33) = 16.6
        assert_eq!(estimate_minutes(1, 0.33, &EffortConfig::default()), 17);
    }

    #[test]
    fn minutes_format() {
        assert_eq!(format_duration(1), "1 minute");
        assert_eq!(format_duration(59), "59 minutes");
    }

    #[test]
    fn hours_format() {
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(61), "1 hour 1 minute");
        assert_eq!(format_duration(150), "2 hours 30 minutes");
        assert_eq!(format_duration(479), "7 hours 59 minutes");
    }

    #[test]
    fn days_format() {
        assert_eq!(format_duration(480), "1 day");
        assert_eq!(format_duration(540), "1 day 1 hour");
        assert_eq!(format_duration(1020), "2 days 1 hour");
        assert_eq!(format_duration(1440 + 150), "3 days 2 hours");
    }
}
