//! Streaming tick-to-bar bucketing.
//!
//! Bar boundaries are derived from the ticks themselves rather than from a
//! fixed calendar grid, so bars only exist where trades happened. During a
//! trading day a new bar starts at the minute containing its first tick. The
//! first bar after a day change starts at the exact timestamp of its first
//! tick instead, so it is not minute-aligned.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use rust_decimal::Decimal;
use taifex_types::TickRecord;
use thiserror::Error;

use crate::{Bar, bar_duration};

/// Errors raised while bucketing a tick sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A tick is earlier than the tick before it.
    #[error("Tick at {current} is earlier than previous tick at {previous}")]
    OutOfOrder {
        /// Timestamp of the previous tick.
        previous: NaiveDateTime,
        /// Timestamp of the offending tick.
        current: NaiveDateTime,
    },

    /// A bar's volume no longer fits in a decimal.
    #[error("Volume overflow in bar starting at {start}")]
    VolumeOverflow {
        /// Start of the overflowing bar.
        start: NaiveDateTime,
    },
}

/// Truncates a timestamp to the start of its minute.
#[must_use]
pub fn floor_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        - TimeDelta::seconds(i64::from(timestamp.second()))
        - TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()))
}

/// Half-open bucket `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Window {
    fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + bar_duration(),
        }
    }

    fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Derives the bucket following this one for a tick at or after `end`.
    fn next_for(&self, timestamp: NaiveDateTime) -> Self {
        if timestamp.date() == self.end.date() {
            Self::starting_at(floor_to_minute(timestamp))
        } else {
            // day rollover: start at the tick itself, unfloored
            Self::starting_at(timestamp)
        }
    }
}

#[derive(Debug)]
enum State {
    /// No bar is open. Holds the last derived window, if any.
    NoOpenBar(Option<Window>),
    BarOpen(BarBuilder),
}

/// Streaming one-minute bar bucketer for a single instrument.
///
/// Ticks must arrive in non-decreasing time order; a tick earlier than its
/// predecessor is rejected with [`AggregateError::OutOfOrder`].
#[derive(Debug)]
pub struct BarBucketer {
    state: State,
    last_seen: Option<NaiveDateTime>,
}

impl Default for BarBucketer {
    fn default() -> Self {
        Self::new()
    }
}

impl BarBucketer {
    /// Creates a bucketer with no open bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::NoOpenBar(None),
            last_seen: None,
        }
    }

    /// Processes a tick, potentially emitting a completed bar.
    ///
    /// Returns `Ok(Some(bar))` when this tick closes the open bar.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::OutOfOrder`] if the tick is earlier than the
    /// previous one, or [`AggregateError::VolumeOverflow`] if the open bar's
    /// volume would overflow. The bucketer is left unchanged in both cases.
    pub fn process(&mut self, tick: &TickRecord) -> Result<Option<Bar>, AggregateError> {
        let timestamp = tick.timestamp();
        if let Some(previous) = self.last_seen.filter(|p| timestamp < *p) {
            return Err(AggregateError::OutOfOrder {
                previous,
                current: timestamp,
            });
        }

        if let State::BarOpen(builder) = &mut self.state
            && builder.window.contains(timestamp)
        {
            builder.update(tick)?;
            self.last_seen = Some(timestamp);
            return Ok(None);
        }
        self.last_seen = Some(timestamp);

        let completed = match std::mem::replace(&mut self.state, State::NoOpenBar(None)) {
            State::BarOpen(builder) => {
                let next = builder.window.next_for(timestamp);
                self.open_or_wait(next, tick);
                Some(builder.finish())
            }
            State::NoOpenBar(Some(window)) => {
                let next = if window.contains(timestamp) {
                    window
                } else {
                    window.next_for(timestamp)
                };
                self.open_or_wait(next, tick);
                None
            }
            State::NoOpenBar(None) => {
                self.open_or_wait(Window::starting_at(floor_to_minute(timestamp)), tick);
                None
            }
        };

        Ok(completed)
    }

    /// Finishes bucketing, returning the open bar if there is one.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        match self.state {
            State::BarOpen(builder) => Some(builder.finish()),
            State::NoOpenBar(_) => None,
        }
    }

    /// Opens a bar in `window` if it holds the tick, otherwise waits for a later tick.
    fn open_or_wait(&mut self, window: Window, tick: &TickRecord) {
        self.state = if window.contains(tick.timestamp()) {
            State::BarOpen(BarBuilder::new(window, tick))
        } else {
            State::NoOpenBar(Some(window))
        };
    }
}

/// Buckets a whole time-ordered tick sequence of one instrument.
///
/// # Errors
///
/// Returns [`AggregateError::OutOfOrder`] if the sequence is not time-ordered
/// and [`AggregateError::VolumeOverflow`] if a bar's volume overflows.
pub fn aggregate<'a, I>(ticks: I) -> Result<Vec<Bar>, AggregateError>
where
    I: IntoIterator<Item = &'a TickRecord>,
{
    let mut bucketer = BarBucketer::new();
    let mut bars = Vec::new();

    for tick in ticks {
        if let Some(bar) = bucketer.process(tick)? {
            bars.push(bar);
        }
    }

    if let Some(bar) = bucketer.finish() {
        bars.push(bar);
    }

    Ok(bars)
}

/// Builder for an open bar.
#[derive(Debug)]
struct BarBuilder {
    window: Window,
    symbol: String,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a builder seeded with the first tick.
    fn new(window: Window, tick: &TickRecord) -> Self {
        Self {
            window,
            symbol: tick.symbol.clone(),
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume: tick.quantity,
            tick_count: 1,
        }
    }

    fn update(&mut self, tick: &TickRecord) -> Result<(), AggregateError> {
        self.volume = self
            .volume
            .checked_add(tick.quantity)
            .ok_or(AggregateError::VolumeOverflow {
                start: self.window.start,
            })?;
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        self.tick_count += 1;
        Ok(())
    }

    fn finish(self) -> Bar {
        Bar {
            start: self.window.start,
            end: self.window.end,
            symbol: self.symbol,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            tick_count: self.tick_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn make_tick(d: u32, hour: u32, minute: u32, second: u32, price: i64, reported: i64) -> TickRecord {
        TickRecord::from_reported(
            day(d),
            "TX",
            "202401",
            NaiveTime::from_hms_opt(hour, minute, second).unwrap(),
            Decimal::from(price),
            Decimal::from(reported),
        )
    }

    fn at(d: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        day(d).and_hms_opt(hour, minute, second).unwrap()
    }

    /// Replays `ticks` against `bars` and checks every per-bar invariant.
    fn assert_bar_invariants(ticks: &[TickRecord], bars: &[Bar]) {
        let total: u32 = bars.iter().map(|b| b.tick_count).sum();
        assert_eq!(total as usize, ticks.len(), "every tick lands in a bar");

        let mut rest = ticks;
        for bar in bars {
            assert!(bar.tick_count > 0);
            assert_eq!(bar.end, bar.start + bar_duration());

            let (assigned, tail) = rest.split_at(bar.tick_count as usize);
            rest = tail;

            let mut volume = Decimal::ZERO;
            for tick in assigned {
                assert!(bar.contains(tick.timestamp()), "{tick:?} outside {bar:?}");
                assert!(bar.high >= tick.price);
                assert!(bar.low <= tick.price);
                volume += tick.quantity;
            }
            assert_eq!(bar.volume, volume);
            assert_eq!(bar.open, assigned[0].price);
            assert_eq!(bar.close, assigned[assigned.len() - 1].price);
            assert!(assigned.iter().any(|t| t.price == bar.high));
            assert!(assigned.iter().any(|t| t.price == bar.low));
        }

        for (i, pair) in bars.windows(2).enumerate() {
            assert!(pair[0].start < pair[1].start);
            // the next bar only opens on a tick at or after the previous end
            let first_of_next: usize = bars[..=i].iter().map(|b| b.tick_count as usize).sum();
            assert!(ticks[first_of_next].timestamp() >= pair[0].end);
        }
    }

    #[test]
    fn test_minute_boundary() {
        let ticks = vec![
            make_tick(15, 9, 0, 0, 17_480, 4),
            make_tick(15, 9, 0, 30, 17_490, 2),
            make_tick(15, 9, 1, 5, 17_470, 6),
        ];
        let bars = aggregate(&ticks).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].start, at(15, 9, 0, 0));
        assert_eq!(bars[0].end, at(15, 9, 1, 0));
        assert_eq!(bars[0].tick_count, 2);
        assert_eq!(bars[0].open, Decimal::from(17_480));
        assert_eq!(bars[0].high, Decimal::from(17_490));
        assert_eq!(bars[0].low, Decimal::from(17_480));
        assert_eq!(bars[0].close, Decimal::from(17_490));
        assert_eq!(bars[0].volume, Decimal::from(3));

        assert_eq!(bars[1].start, at(15, 9, 1, 0));
        assert_eq!(bars[1].tick_count, 1);
        assert_eq!(bars[1].volume, Decimal::from(3));
        assert_bar_invariants(&ticks, &bars);
    }

    #[test]
    fn test_process_emits_on_boundary() {
        let mut bucketer = BarBucketer::new();
        assert!(bucketer.process(&make_tick(15, 9, 0, 0, 1, 2)).unwrap().is_none());
        assert!(bucketer.process(&make_tick(15, 9, 0, 59, 2, 2)).unwrap().is_none());

        // exactly at `end` closes the bar
        let bar = bucketer.process(&make_tick(15, 9, 1, 0, 3, 2)).unwrap().unwrap();
        assert_eq!(bar.tick_count, 2);
        assert_eq!(bar.close, Decimal::from(2));

        let last = bucketer.finish().unwrap();
        assert_eq!(last.start, at(15, 9, 1, 0));
        assert_eq!(last.open, Decimal::from(3));
    }

    #[test]
    fn test_day_rollover_uses_exact_timestamp() {
        let ticks = vec![
            make_tick(15, 13, 29, 58, 17_500, 2),
            make_tick(16, 8, 45, 12, 17_550, 2),
            // still inside [08:45:12, 08:46:12)
            make_tick(16, 8, 46, 5, 17_560, 2),
            make_tick(16, 8, 46, 30, 17_555, 2),
        ];
        let bars = aggregate(&ticks).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].start, at(15, 13, 29, 0));
        assert_eq!(bars[0].end, at(15, 13, 30, 0));

        assert_eq!(bars[1].start, at(16, 8, 45, 12));
        assert_eq!(bars[1].end, at(16, 8, 46, 12));
        assert_eq!(bars[1].tick_count, 2);

        // back on the minute grid once the day is unchanged
        assert_eq!(bars[2].start, at(16, 8, 46, 0));
        assert_eq!(bars[2].end, at(16, 8, 47, 0));
        assert_bar_invariants(&ticks, &bars);
    }

    #[test]
    fn test_gap_is_not_backfilled() {
        let ticks = vec![
            make_tick(15, 9, 0, 10, 100, 2),
            make_tick(15, 9, 7, 42, 101, 2),
        ];
        let bars = aggregate(&ticks).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].start, at(15, 9, 7, 0));
        assert_eq!(bars[1].end, at(15, 9, 8, 0));
    }

    #[test]
    fn test_bar_ending_at_midnight_is_not_a_rollover() {
        // bar [23:59, 00:00) ends on the next date, so a tick just after
        // midnight is on the same date as `end` and gets floored
        let ticks = vec![
            make_tick(15, 23, 59, 30, 100, 2),
            make_tick(16, 0, 0, 20, 101, 2),
        ];
        let bars = aggregate(&ticks).unwrap();
        assert_eq!(bars[1].start, at(16, 0, 0, 0));
    }

    #[test]
    fn test_quantity_halving() {
        let bars = aggregate(&[make_tick(15, 9, 0, 0, 100, 4)]).unwrap();
        assert_eq!(bars[0].volume, Decimal::from(2));
    }

    #[test]
    fn test_single_tick_stream() {
        let bars = aggregate(&[make_tick(15, 9, 0, 45, 100, 2)]).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].start, at(15, 9, 0, 0));
        assert_eq!(bars[0].tick_count, 1);
    }

    #[test]
    fn test_empty_stream() {
        assert!(aggregate(std::iter::empty()).unwrap().is_empty());
        assert!(BarBucketer::new().finish().is_none());
    }

    #[test]
    fn test_equal_timestamps_are_accepted() {
        let ticks = vec![
            make_tick(15, 9, 0, 5, 100, 2),
            make_tick(15, 9, 0, 5, 99, 2),
        ];
        let bars = aggregate(&ticks).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].low, Decimal::from(99));
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let mut bucketer = BarBucketer::new();
        bucketer.process(&make_tick(15, 9, 0, 30, 100, 2)).unwrap();

        let err = bucketer
            .process(&make_tick(15, 9, 0, 10, 101, 2))
            .unwrap_err();
        assert_eq!(
            err,
            AggregateError::OutOfOrder {
                previous: at(15, 9, 0, 30),
                current: at(15, 9, 0, 10),
            }
        );

        // rejected tick left no trace
        let bar = bucketer.finish().unwrap();
        assert_eq!(bar.tick_count, 1);
        assert_eq!(bar.close, Decimal::from(100));
    }

    #[test]
    fn test_volume_overflow_is_an_error() {
        let huge = |second| {
            TickRecord::new(
                day(15),
                "TX",
                "202401",
                NaiveTime::from_hms_opt(9, 0, second).unwrap(),
                Decimal::from(100),
                Decimal::MAX,
            )
        };
        let mut bucketer = BarBucketer::new();
        bucketer.process(&huge(1)).unwrap();

        let err = bucketer.process(&huge(2)).unwrap_err();
        assert_eq!(
            err,
            AggregateError::VolumeOverflow {
                start: at(15, 9, 0, 0)
            }
        );

        let bar = bucketer.finish().unwrap();
        assert_eq!(bar.tick_count, 1);
        assert_eq!(bar.volume, Decimal::MAX);
    }

    #[test]
    fn test_invariants_over_multi_day_session() {
        // deterministic pseudo-random walk across three sessions
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };

        let mut ticks = Vec::new();
        for d in 15..18 {
            let mut secs: u64 = 8 * 3600 + 45 * 60;
            let close = 13 * 3600 + 45 * 60;
            let mut price: i64 = 17_500;
            while secs < close {
                let time = NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0).unwrap();
                price += next(11) as i64 - 5;
                ticks.push(TickRecord::from_reported(
                    day(d),
                    "MTX",
                    "202401",
                    time,
                    Decimal::new(price * 10 + next(10) as i64, 1),
                    Decimal::from(next(20) + 1),
                ));
                // mostly dense, occasionally multi-minute gaps
                secs += if next(50) == 0 { 60 * next(15) } else { next(40) };
            }
        }

        let bars = aggregate(&ticks).unwrap();
        assert!(!bars.is_empty());
        assert_bar_invariants(&ticks, &bars);

        // each session opens with an unfloored bar, later bars are minute-aligned
        assert_eq!(bars[0].start.second(), 0);
        for pair in bars.windows(2) {
            if pair[1].start.date() == pair[0].end.date() {
                assert_eq!(pair[1].start.second(), 0);
            }
        }
    }

    #[test]
    fn test_floor_to_minute() {
        assert_eq!(floor_to_minute(at(15, 14, 37, 45)), at(15, 14, 37, 0));
        assert_eq!(floor_to_minute(at(15, 0, 0, 0)), at(15, 0, 0, 0));
    }
}
