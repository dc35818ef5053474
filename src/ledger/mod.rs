//! Installment ledger: works out where a charge sits in its installment plan.
//!
//! Everything in here is pure. Callers hand in a snapshot of a subscription
//! and its charges and get back a view; loading a consistent snapshot is the
//! store's job.

mod calculator;
mod error;
mod view;

pub use calculator::{describe_charge, summarize_plan};
pub use error::LedgerError;
pub use view::{InstallmentView, PaymentHistoryEntry, PlanProgress};
