//! Core business logic module
//!
//! This module contains the transaction-creation core:
//! - `processor` - validation, cost computation, atomic debit, and ledger
//!   write with compensating action
//! - `dates` - pure charge-date computation (30-day lease term)
//! - `clock` - the processor's time source, swappable for tests

pub mod clock;
pub mod dates;
pub mod processor;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dates::{charge_dates, ChargeDates, LEASE_TERM_DAYS};
pub use processor::TransactionProcessor;
