//! Line parsing for daily trade reports.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use taifex_types::{SymbolSet, TickRecord};
use thiserror::Error;

/// Minimum number of comma-separated fields in a trade row.
pub const FIELD_COUNT: usize = 8;

/// Value both spread-leg markers carry on an outright trade.
pub const OUTRIGHT_MARKER: &str = "-";

const DATE_FIELD: usize = 0;
const SYMBOL_FIELD: usize = 1;
const PERIOD_FIELD: usize = 2;
const TIME_FIELD: usize = 3;
const PRICE_FIELD: usize = 4;
const QUANTITY_FIELD: usize = 5;
const NEAR_LEG_FIELD: usize = 6;
const FAR_LEG_FIELD: usize = 7;

/// Report column whose value could not be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Trade date (`YYYYMMDD`).
    TradeDate,
    /// Trade time (`HHMMSS`).
    TradeTime,
    /// Trade price.
    Price,
    /// Reported quantity.
    Quantity,
}

impl Field {
    /// Returns the column name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TradeDate => "trade date",
            Self::TradeTime => "trade time",
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while parsing a report line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The row is shorter than the fixed layout. Fatal for the file.
    #[error("Expected at least {expected} fields, found {found}")]
    MissingFields {
        /// Required field count.
        expected: usize,
        /// Fields present on the line.
        found: usize,
    },

    /// A field could not be interpreted. Only the line is dropped.
    #[error("Invalid {field}: '{value}'")]
    InvalidField {
        /// The offending column.
        field: Field,
        /// The trimmed raw value.
        value: String,
    },
}

impl ParseError {
    /// Returns true if parsing may continue with the next line.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }
}

/// Turns report lines into [`TickRecord`]s.
///
/// Rows are kept only when both spread-leg markers are [`OUTRIGHT_MARKER`]
/// and the symbol is in the configured allow-list.
#[derive(Debug, Clone, Default)]
pub struct TickParser {
    symbols: SymbolSet,
}

impl TickParser {
    /// Creates a parser accepting the given symbols.
    #[must_use]
    pub const fn new(symbols: SymbolSet) -> Self {
        Self { symbols }
    }

    /// Returns the symbol allow-list.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Parses one data line.
    ///
    /// Returns `Ok(None)` for blank lines and for rows filtered out as spread
    /// trades or foreign symbols.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingFields`] for a truncated row and
    /// [`ParseError::InvalidField`] when a date, time or decimal is malformed.
    pub fn parse_line(&self, line: &str) -> Result<Option<TickRecord>, ParseError> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < FIELD_COUNT {
            return Err(ParseError::MissingFields {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        if fields[NEAR_LEG_FIELD] != OUTRIGHT_MARKER || fields[FAR_LEG_FIELD] != OUTRIGHT_MARKER {
            return Ok(None);
        }

        let symbol = fields[SYMBOL_FIELD];
        if !self.symbols.contains(symbol) {
            return Ok(None);
        }

        let trade_date = NaiveDate::parse_from_str(fields[DATE_FIELD], "%Y%m%d")
            .map_err(|_| invalid(Field::TradeDate, fields[DATE_FIELD]))?;
        let time = NaiveTime::parse_from_str(fields[TIME_FIELD], "%H%M%S")
            .map_err(|_| invalid(Field::TradeTime, fields[TIME_FIELD]))?;
        let price = parse_decimal(Field::Price, fields[PRICE_FIELD])?;
        let reported = parse_decimal(Field::Quantity, fields[QUANTITY_FIELD])?;

        Ok(Some(TickRecord::from_reported(
            trade_date,
            symbol,
            fields[PERIOD_FIELD],
            time,
            price,
            reported,
        )))
    }
}

/// Parses a non-negative fixed-point decimal.
fn parse_decimal(field: Field, value: &str) -> Result<Decimal, ParseError> {
    match Decimal::from_str(value) {
        Ok(d) if !d.is_sign_negative() => Ok(d),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: Field, value: &str) -> ParseError {
    ParseError::InvalidField {
        field,
        value: value.to_string(),
    }
}
