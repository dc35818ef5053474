use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{
    charge_currency, plan_complete_error, subscription_not_found, LedgerSnapshot, LedgerStore,
};
use crate::core::AppError;
use crate::models::charges::{Charge, NewCharge};
use crate::models::subscriptions::{NewSubscription, Subscription};

#[derive(Default)]
struct LedgerState {
    subscriptions: HashMap<Uuid, Subscription>,
    charges: Vec<Charge>,
    next_sequence: i64,
}

/// Process-local ledger store. A single mutex covers every map, so each
/// operation observes and mutates one consistent state.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    state: Mutex<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, AppError> {
        self.state
            .lock()
            .map_err(|e| AppError::internal_error(format!("Ledger state lock poisoned: {}", e)))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn create_subscription(
        &self,
        request: &NewSubscription,
    ) -> Result<Subscription, AppError> {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            buyer_id: request.buyer_id,
            product_id: request.product_id,
            total_installments: request.total_installments,
            recurrence: request.recurrence,
            currency: request.currency.clone(),
            created_at: Utc::now().naive_utc(),
        };

        self.lock()?
            .subscriptions
            .insert(subscription.id, subscription.clone());

        Ok(subscription)
    }

    async fn find_charge(&self, charge_id: Uuid) -> Result<Option<Charge>, AppError> {
        Ok(self
            .lock()?
            .charges
            .iter()
            .find(|c| c.id == charge_id)
            .cloned())
    }

    async fn load_snapshot(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<LedgerSnapshot>, AppError> {
        let state = self.lock()?;

        Ok(state
            .subscriptions
            .get(&subscription_id)
            .map(|subscription| LedgerSnapshot {
                subscription: subscription.clone(),
                charges: state
                    .charges
                    .iter()
                    .filter(|c| c.subscription_id == subscription_id)
                    .cloned()
                    .collect(),
            }))
    }

    async fn record_charge(
        &self,
        subscription_id: Uuid,
        charge: NewCharge,
    ) -> Result<Charge, AppError> {
        let mut state = self.lock()?;

        let subscription = state
            .subscriptions
            .get(&subscription_id)
            .ok_or_else(|| subscription_not_found(subscription_id))?;
        let total = subscription.total_installments;
        let currency = charge_currency(subscription, charge.currency)?;

        let recorded = state
            .charges
            .iter()
            .filter(|c| c.subscription_id == subscription_id)
            .count();
        if recorded as i64 >= i64::from(total) {
            return Err(plan_complete_error(subscription_id));
        }

        state.next_sequence += 1;
        let charge = Charge {
            id: Uuid::new_v4(),
            subscription_id,
            sequence: state.next_sequence,
            amount: charge.amount,
            currency,
            created_at: charge.created_at,
        };
        state.charges.push(charge.clone());

        Ok(charge)
    }
}
