pub mod core;
pub mod db;
pub mod installment_receipts_web_server;
pub mod ledger;
pub mod models;
pub mod receipts;
pub mod routes;
