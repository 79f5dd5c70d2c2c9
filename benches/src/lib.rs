//! Synthetic report data for taifex-kline benchmarks.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::fmt::Write;
use taifex_types::{Decimal, TickRecord};

/// Header line of a generated report.
pub const REPORT_HEADER: &str = "date,symbol,period,time,price,qty,near,far,auction";

/// Generates `count` ticks for one instrument spread over consecutive days.
///
/// Each day trades from 08:45:00 with one tick every `step_secs` seconds,
/// so long runs exercise both minute boundaries and day rollovers.
#[must_use]
pub fn session_ticks(count: usize, step_secs: i64) -> Vec<TickRecord> {
    let open = NaiveTime::from_hms_opt(8, 45, 0).unwrap_or_default();
    let per_day = (5 * 3600 / step_secs.max(1)).max(1) as usize;
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();

    (0..count)
        .map(|i| {
            let day = first_day + TimeDelta::days((i / per_day) as i64);
            let ts = NaiveDateTime::new(day, open)
                + TimeDelta::seconds((i % per_day) as i64 * step_secs);
            let price = Decimal::from(17_000 + (i as i64 * 7919) % 400);
            TickRecord::from_reported(
                ts.date(),
                "TX",
                "202401",
                ts.time(),
                price,
                Decimal::from(2 + (i % 5) as i64),
            )
        })
        .collect()
}

/// Renders ticks as report text, one outright row per tick.
#[must_use]
pub fn report_text(ticks: &[TickRecord]) -> String {
    let mut out = String::with_capacity(ticks.len() * 48);
    out.push_str(REPORT_HEADER);
    out.push('\n');
    for tick in ticks {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},-,-,",
            tick.trade_date.format("%Y%m%d"),
            tick.symbol,
            tick.settlement_period,
            tick.time.format("%H%M%S"),
            tick.price,
            tick.quantity * Decimal::TWO,
        );
    }
    out
}
