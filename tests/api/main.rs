mod health_check;
mod receipts;
mod subscriptions;
