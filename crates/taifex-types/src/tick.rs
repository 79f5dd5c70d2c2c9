//! Trade tick representation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::InstrumentKey;

/// A single outright trade taken from a daily trade report.
///
/// Reports list every trade once per counter-party side, so the reported
/// quantity is twice the traded quantity. [`TickRecord::from_reported`]
/// applies that correction; `quantity` always holds the effective value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Exchange trade date.
    pub trade_date: NaiveDate,
    /// Product symbol (e.g. `TX`).
    pub symbol: String,
    /// Settlement period (contract month or week, e.g. `202401`).
    pub settlement_period: String,
    /// Time of day of the trade, second precision.
    pub time: NaiveTime,
    /// Trade price.
    pub price: Decimal,
    /// Effective traded quantity.
    pub quantity: Decimal,
}

impl TickRecord {
    /// Creates a tick whose quantity is already the effective quantity.
    #[must_use]
    pub fn new(
        trade_date: NaiveDate,
        symbol: impl Into<String>,
        settlement_period: impl Into<String>,
        time: NaiveTime,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            trade_date,
            symbol: symbol.into(),
            settlement_period: settlement_period.into(),
            time,
            price,
            quantity,
        }
    }

    /// Creates a tick from the quantity as printed in the report, halving it.
    #[must_use]
    pub fn from_reported(
        trade_date: NaiveDate,
        symbol: impl Into<String>,
        settlement_period: impl Into<String>,
        time: NaiveTime,
        price: Decimal,
        reported_quantity: Decimal,
    ) -> Self {
        Self::new(
            trade_date,
            symbol,
            settlement_period,
            time,
            price,
            reported_quantity / Decimal::TWO,
        )
    }

    /// Returns the full trade timestamp (date plus time of day).
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.trade_date, self.time)
    }

    /// Returns the instrument key this tick is grouped under.
    #[must_use]
    pub fn key(&self) -> InstrumentKey {
        InstrumentKey::new(&self.symbol, &self.settlement_period)
    }
}
