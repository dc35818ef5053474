pub mod charges;
pub mod receipts;
pub mod subscriptions;
