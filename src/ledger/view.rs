use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentHistoryEntry {
    pub charged_at: NaiveDateTime,
    pub amount: i64,
}

/// Where a single charge sits within its installment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallmentView {
    /// More installments are still to come after this charge.
    Ongoing {
        current_ordinal: u32,
        total_installments: u32,
        next_ordinal: u32,
        next_charge_date: NaiveDateTime,
        amount_paid_to_date: i64,
        plan_initiated_on: NaiveDateTime,
        final_charge_date: NaiveDateTime,
    },
    /// This charge completed the plan.
    Final {
        total_installments: u32,
        total_amount_paid: i64,
        payment_history: Vec<PaymentHistoryEntry>,
        plan_initiated_on: NaiveDateTime,
    },
}

impl InstallmentView {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }

    pub fn total_installments(&self) -> u32 {
        match self {
            Self::Ongoing {
                total_installments, ..
            }
            | Self::Final {
                total_installments, ..
            } => *total_installments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanProgress {
    pub total_installments: u32,
    pub installments_paid: u32,
    pub installments_remaining: u32,
    pub is_complete: bool,
    pub amount_paid: i64,
    pub next_charge_date: Option<NaiveDateTime>,
    pub final_charge_date: Option<NaiveDateTime>,
}
