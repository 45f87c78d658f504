//! Charge date computation
//!
//! Pure calendar arithmetic for the transaction processor: given a reference
//! instant and a transaction kind, produce the transaction date and, for
//! leases, the expiry date.
//!
//! Dates are structured [`NaiveDate`] values with defined arithmetic — never
//! formatted strings. Lease expiry adds 30 *calendar* days (not 30×24h), so
//! the result is unaffected by daylight-saving shifts and lands correctly
//! across month and leap-year boundaries.

use crate::types::TransactionKind;
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Length of a lease in calendar days
pub const LEASE_TERM_DAYS: u64 = 30;

/// The dates stamped onto a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeDates {
    /// UTC calendar date of the charge
    pub transaction_date: NaiveDate,

    /// Lease expiry; `None` for purchases
    pub expiry_date: Option<NaiveDate>,
}

/// Compute the dates for a charge made at `reference`
///
/// `transaction_date` is the UTC calendar date of the reference instant, with
/// no time-of-day component. For a lease, `expiry_date` is exactly
/// [`LEASE_TERM_DAYS`] calendar days later; for a purchase it is a true
/// absence.
pub fn charge_dates(reference: DateTime<Utc>, kind: TransactionKind) -> ChargeDates {
    let transaction_date = reference.date_naive();
    let expiry_date = match kind {
        TransactionKind::Lease => Some(transaction_date + Days::new(LEASE_TERM_DAYS)),
        TransactionKind::Purchase => None,
    };

    ChargeDates {
        transaction_date,
        expiry_date,
    }
}
