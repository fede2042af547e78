// Entity Models
// Clients and the three transaction categories (VSS, GI, VSD), plus the
// snapshot that bundles them for one aggregation call.
//
// The engine never owns or mutates these: the data store hands over a
// snapshot, the engine returns derived values.

use chrono::NaiveDate;

pub mod client;
pub mod snapshot;
pub mod transaction;

pub use client::Client;
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionCategory, TransactionKind};

/// Any record that can be placed on the calendar
///
/// `None` means the record carries no usable date; time-windowed
/// aggregates skip it.
pub trait Dated {
    fn record_date(&self) -> Option<NaiveDate>;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn record_date(&self) -> Option<NaiveDate> {
        (**self).record_date()
    }
}
