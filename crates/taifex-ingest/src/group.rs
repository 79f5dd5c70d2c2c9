//! Partitioning of a tick stream by instrument.

use std::collections::BTreeMap;
use taifex_types::{InstrumentKey, TickRecord};

/// Ticks of one report keyed by instrument, iterated in key order.
pub type InstrumentGroups = BTreeMap<InstrumentKey, Vec<TickRecord>>;

/// Groups ticks by [`InstrumentKey`].
///
/// Ticks keep their original relative order inside each group; the report
/// is already time-sorted and nothing here reorders it.
pub fn group_by_instrument<I>(ticks: I) -> InstrumentGroups
where
    I: IntoIterator<Item = TickRecord>,
{
    let mut groups = InstrumentGroups::new();
    for tick in ticks {
        groups.entry(tick.key()).or_default().push(tick);
    }
    groups
}
