use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::{InstallmentView, LedgerError, PaymentHistoryEntry, PlanProgress};
use crate::models::charges::Charge;
use crate::models::subscriptions::Subscription;

/// Describes `charge` relative to the rest of its installment plan.
///
/// `all_charges` is the full snapshot of charges recorded for `subscription`
/// and must contain `charge` itself. Order of the snapshot does not matter:
/// charges are ranked by timestamp, with the store-assigned sequence number
/// breaking ties.
pub fn describe_charge(
    charge: &Charge,
    subscription: &Subscription,
    all_charges: &[Charge],
) -> Result<InstallmentView, LedgerError> {
    if charge.subscription_id != subscription.id {
        return Err(LedgerError::invalid_input(format!(
            "charge {} belongs to subscription {}, not {}",
            charge.id, charge.subscription_id, subscription.id
        )));
    }

    let ledger = OrderedLedger::build(subscription, all_charges)?;

    let position = ledger
        .charges
        .iter()
        .position(|c| c.id == charge.id)
        .ok_or_else(|| {
            LedgerError::invalid_input(format!(
                "charge {} is missing from the snapshot of subscription {}",
                charge.id, subscription.id
            ))
        })?;

    if ledger.charges[position] != charge {
        return Err(LedgerError::invalid_input(format!(
            "charge {} does not match its copy in the snapshot",
            charge.id
        )));
    }

    let current_ordinal = ordinal_at(position)?;
    if current_ordinal > ledger.total_installments {
        return Err(LedgerError::InvalidLedgerState {
            recorded_charges: ledger.charges.len(),
            total_installments: ledger.total_installments,
        });
    }

    let amount_paid = sum_amounts(&ledger.charges[..=position])?;
    let plan_initiated_on = ledger.charges[0].created_at;

    if current_ordinal < ledger.total_installments {
        let next_charge_date = advance(subscription, charge.created_at, 1)?;
        let final_charge_date =
            advance(subscription, plan_initiated_on, ledger.total_installments - 1)?;

        return Ok(InstallmentView::Ongoing {
            current_ordinal,
            total_installments: ledger.total_installments,
            next_ordinal: current_ordinal + 1,
            next_charge_date,
            amount_paid_to_date: amount_paid,
            plan_initiated_on,
            final_charge_date,
        });
    }

    let payment_history = ledger
        .charges
        .iter()
        .map(|c| PaymentHistoryEntry {
            charged_at: c.created_at,
            amount: c.amount,
        })
        .collect();

    Ok(InstallmentView::Final {
        total_installments: ledger.total_installments,
        total_amount_paid: amount_paid,
        payment_history,
        plan_initiated_on,
    })
}

/// Summarises how far along its plan a subscription is.
///
/// Unlike [`describe_charge`] the snapshot may be empty, in which case no
/// dates can be projected yet.
pub fn summarize_plan(
    subscription: &Subscription,
    all_charges: &[Charge],
) -> Result<PlanProgress, LedgerError> {
    let ledger = OrderedLedger::build(subscription, all_charges)?;
    let total = ledger.total_installments;
    let paid = ledger.charges.len() as u32; // bounded by total_installments
    let is_complete = paid == total;

    let next_charge_date = match ledger.charges.last() {
        Some(last) if !is_complete => Some(advance(subscription, last.created_at, 1)?),
        _ => None,
    };
    let final_charge_date = match ledger.charges.first() {
        Some(first) => Some(advance(subscription, first.created_at, total - 1)?),
        None => None,
    };

    Ok(PlanProgress {
        total_installments: total,
        installments_paid: paid,
        installments_remaining: total - paid,
        is_complete,
        amount_paid: sum_amounts(&ledger.charges)?,
        next_charge_date,
        final_charge_date,
    })
}

/// A validated snapshot, oldest charge first.
struct OrderedLedger<'a> {
    total_installments: u32,
    charges: Vec<&'a Charge>,
}

impl<'a> OrderedLedger<'a> {
    fn build(subscription: &Subscription, all_charges: &'a [Charge]) -> Result<Self, LedgerError> {
        let total_installments = u32::try_from(subscription.total_installments)
            .ok()
            .filter(|total| *total >= 1)
            .ok_or_else(|| {
                LedgerError::invalid_input(format!(
                    "subscription {} has a non-positive installment count of {}",
                    subscription.id, subscription.total_installments
                ))
            })?;

        let mut seen = HashSet::with_capacity(all_charges.len());
        for charge in all_charges {
            if charge.subscription_id != subscription.id {
                return Err(LedgerError::invalid_input(format!(
                    "snapshot for subscription {} contains charge {} of subscription {}",
                    subscription.id, charge.id, charge.subscription_id
                )));
            }
            if !charge.currency.eq_ignore_ascii_case(&subscription.currency) {
                return Err(LedgerError::invalid_input(format!(
                    "charge {} is in {} but subscription {} bills in {}",
                    charge.id, charge.currency, subscription.id, subscription.currency
                )));
            }
            if charge.amount < 0 {
                return Err(LedgerError::invalid_input(format!(
                    "charge {} has a negative amount of {}",
                    charge.id, charge.amount
                )));
            }
            if !seen.insert(charge.id) {
                return Err(LedgerError::invalid_input(format!(
                    "charge {} appears more than once in the snapshot",
                    charge.id
                )));
            }
        }

        let mut charges: Vec<&Charge> = all_charges.iter().collect();
        charges.sort_by_key(|c| (c.created_at, c.sequence));

        let same_slot =
            |a: &Charge, b: &Charge| (a.created_at, a.sequence) == (b.created_at, b.sequence);
        if let Some(pair) = charges.windows(2).find(|pair| same_slot(pair[0], pair[1])) {
            return Err(LedgerError::invalid_input(format!(
                "charges {} and {} share both timestamp and sequence number",
                pair[0].id, pair[1].id
            )));
        }

        if charges.len() > total_installments as usize {
            return Err(LedgerError::InvalidLedgerState {
                recorded_charges: charges.len(),
                total_installments,
            });
        }

        Ok(Self {
            total_installments,
            charges,
        })
    }
}

fn ordinal_at(position: usize) -> Result<u32, LedgerError> {
    u32::try_from(position + 1)
        .map_err(|_| LedgerError::invalid_input("charge position does not fit an ordinal"))
}

fn sum_amounts(charges: &[&Charge]) -> Result<i64, LedgerError> {
    charges.iter().try_fold(0i64, |total, charge| {
        total
            .checked_add(charge.amount)
            .ok_or_else(|| LedgerError::invalid_input("total amount paid overflows"))
    })
}

fn advance(
    subscription: &Subscription,
    from: NaiveDateTime,
    steps: u32,
) -> Result<NaiveDateTime, LedgerError> {
    subscription.recurrence.advance(from, steps).ok_or_else(|| {
        LedgerError::invalid_input(format!(
            "{} {} interval(s) after {} is out of calendar range",
            steps,
            subscription.recurrence.as_str(),
            from
        ))
    })
}
