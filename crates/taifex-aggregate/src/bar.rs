//! K-line (OHLCV bar) data structure.

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Length of every bar in seconds.
pub const BAR_DURATION_SECS: i64 = 60;

/// Returns the length of every bar.
#[must_use]
pub fn bar_duration() -> TimeDelta {
    TimeDelta::seconds(BAR_DURATION_SECS)
}

/// One-minute OHLCV bar covering `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive); always `start` plus [`bar_duration`].
    pub end: NaiveDateTime,
    /// Product symbol of the aggregated ticks.
    pub symbol: String,
    /// Price of the first tick.
    pub open: Decimal,
    /// Highest tick price.
    pub high: Decimal,
    /// Lowest tick price.
    pub low: Decimal,
    /// Price of the last tick.
    pub close: Decimal,
    /// Sum of effective tick quantities.
    pub volume: Decimal,
    /// Number of ticks in the bar; never zero.
    pub tick_count: u32,
}

impl Bar {
    /// Returns true if `timestamp` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_bar() -> Bar {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Bar {
            start,
            end: start + bar_duration(),
            symbol: "TX".to_string(),
            open: Decimal::from(17_480),
            high: Decimal::from(17_495),
            low: Decimal::from(17_470),
            close: Decimal::from(17_490),
            volume: Decimal::new(125, 1),
            tick_count: 7,
        }
    }

    #[test]
    fn test_contains_is_half_open() {
        let bar = create_test_bar();
        assert!(bar.contains(bar.start));
        assert!(bar.contains(bar.end - TimeDelta::seconds(1)));
        assert!(!bar.contains(bar.end));
        assert!(!bar.contains(bar.start - TimeDelta::seconds(1)));
    }
}
