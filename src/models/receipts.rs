use serde::Serialize;

use crate::ledger::InstallmentView;
use crate::models::charges::Charge;
use crate::receipts::ReceiptMessages;

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub charge: Charge,
    pub amount_formatted: String,
    pub installment: InstallmentView,
    pub messages: ReceiptMessages,
}
