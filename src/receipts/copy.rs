use serde::Serialize;

use crate::core::{format_money, format_receipt_date};
use crate::ledger::InstallmentView;

/// Everything the copy needs besides the view itself.
#[derive(Debug, Clone)]
pub struct ReceiptContext {
    pub currency: String,
    pub manage_payment_settings_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptMessages {
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_payment_settings_url: Option<String>,
}

impl ReceiptMessages {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

pub trait ReceiptCopy: Send + Sync {
    fn messages(&self, view: &InstallmentView, context: &ReceiptContext) -> ReceiptMessages;
}

pub struct EnglishReceiptCopy;

impl ReceiptCopy for EnglishReceiptCopy {
    fn messages(&self, view: &InstallmentView, context: &ReceiptContext) -> ReceiptMessages {
        match view {
            InstallmentView::Ongoing {
                current_ordinal,
                total_installments,
                next_ordinal,
                next_charge_date,
                plan_initiated_on,
                final_charge_date,
                ..
            } => ReceiptMessages {
                lines: vec![
                    format!("Today's payment: {} of {}", current_ordinal, total_installments),
                    format!(
                        "Upcoming payment: {} of {} on {}",
                        next_ordinal,
                        total_installments,
                        format_receipt_date(*next_charge_date)
                    ),
                    format!(
                        "Installment plan initiated on {}.",
                        format_receipt_date(*plan_initiated_on)
                    ),
                    format!(
                        "Your final charge will be on {}.",
                        format_receipt_date(*final_charge_date)
                    ),
                    "You can manage your payment settings here.".to_string(),
                ],
                manage_payment_settings_url: Some(context.manage_payment_settings_url.clone()),
            },
            InstallmentView::Final {
                total_amount_paid,
                payment_history,
                ..
            } => {
                let mut lines = vec![
                    "This is your final payment for your installment plan.".to_string(),
                    "You will not be charged again.".to_string(),
                    "Payment history:".to_string(),
                ];
                lines.extend(payment_history.iter().map(|entry| {
                    format!(
                        "{}: {}",
                        format_receipt_date(entry.charged_at),
                        format_money(entry.amount, &context.currency)
                    )
                }));
                lines.push(format!(
                    "Total amount paid: {}",
                    format_money(*total_amount_paid, &context.currency)
                ));

                ReceiptMessages {
                    lines,
                    manage_payment_settings_url: None,
                }
            }
        }
    }
}
