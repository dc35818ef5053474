#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid ledger input: {0}")]
    InvalidInput(String),
    #[error(
        "Ledger holds {recorded_charges} charge(s) for a {total_installments}-installment plan"
    )]
    InvalidLedgerState {
        recorded_charges: usize,
        total_installments: u32,
    },
}

impl LedgerError {
    pub fn invalid_input(reason: impl ToString) -> Self {
        Self::InvalidInput(reason.to_string())
    }
}
