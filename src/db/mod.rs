use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::AppError;
use crate::models::charges::{Charge, NewCharge};
use crate::models::subscriptions::{NewSubscription, Subscription};

pub mod charges;
pub mod memory;
pub mod subscriptions;

pub use memory::InMemoryLedgerStore;

/// A subscription together with every charge recorded against it, read at a
/// single point in time.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub subscription: Subscription,
    pub charges: Vec<Charge>,
}

/// Persistence for installment plans and their charges.
///
/// Implementations must hand out consistent snapshots and must refuse to
/// record a charge once a plan has all its installments.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn create_subscription(
        &self,
        request: &NewSubscription,
    ) -> Result<Subscription, AppError>;

    async fn find_charge(&self, charge_id: Uuid) -> Result<Option<Charge>, AppError>;

    async fn load_snapshot(&self, subscription_id: Uuid)
        -> Result<Option<LedgerSnapshot>, AppError>;

    async fn record_charge(
        &self,
        subscription_id: Uuid,
        charge: NewCharge,
    ) -> Result<Charge, AppError>;
}

pub(crate) fn plan_complete_error(subscription_id: Uuid) -> AppError {
    AppError::conflict(format!(
        "Installment plan {} has already been paid in full",
        subscription_id
    ))
}

/// Resolves the currency a new charge is stored in. A plan bills in a single
/// currency, so a charge naming a different one is refused.
pub(crate) fn charge_currency(
    subscription: &Subscription,
    requested: Option<String>,
) -> Result<String, AppError> {
    match requested {
        Some(currency) if !currency.eq_ignore_ascii_case(&subscription.currency) => {
            Err(AppError::bad_request(format!(
                "Charge is in {} but installment plan {} bills in {}",
                currency, subscription.id, subscription.currency
            )))
        }
        _ => Ok(subscription.currency.clone()),
    }
}

pub(crate) fn subscription_not_found(subscription_id: Uuid) -> AppError {
    AppError::not_found(format!("Subscription {} was not found", subscription_id))
}

pub struct MySqlLedgerStore {
    pool: MySqlPool,
}

impl MySqlLedgerStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for MySqlLedgerStore {
    #[tracing::instrument(name = "Insert installment subscription", skip(self))]
    async fn create_subscription(
        &self,
        request: &NewSubscription,
    ) -> Result<Subscription, AppError> {
        subscriptions::insert_subscription(&self.pool, request).await
    }

    #[tracing::instrument(name = "Fetch charge", skip(self))]
    async fn find_charge(&self, charge_id: Uuid) -> Result<Option<Charge>, AppError> {
        charges::get_charge_by_id(&self.pool, charge_id).await
    }

    // InnoDB's default REPEATABLE READ pins both reads to one snapshot.
    #[tracing::instrument(name = "Load ledger snapshot", skip(self))]
    async fn load_snapshot(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<LedgerSnapshot>, AppError> {
        let mut transaction = self.pool.begin().await?;

        let Some(subscription) =
            subscriptions::get_subscription_by_id(&mut transaction, subscription_id, false).await?
        else {
            return Ok(None);
        };
        let charges = charges::get_subscription_charges(&mut transaction, subscription_id).await?;

        transaction.commit().await?;

        Ok(Some(LedgerSnapshot {
            subscription,
            charges,
        }))
    }

    #[tracing::instrument(name = "Record installment charge", skip(self))]
    async fn record_charge(
        &self,
        subscription_id: Uuid,
        charge: NewCharge,
    ) -> Result<Charge, AppError> {
        let mut transaction = self.pool.begin().await?;

        let subscription =
            subscriptions::get_subscription_by_id(&mut transaction, subscription_id, true)
                .await?
                .ok_or_else(|| subscription_not_found(subscription_id))?;

        let currency = charge_currency(&subscription, charge.currency)?;

        let recorded =
            charges::count_subscription_charges(&mut transaction, subscription_id).await?;
        if recorded >= i64::from(subscription.total_installments) {
            return Err(plan_complete_error(subscription_id));
        }

        let charge = charges::insert_charge(
            &mut transaction,
            subscription_id,
            charge.amount,
            &currency,
            charge.created_at,
        )
        .await?;
        transaction.commit().await?;

        Ok(charge)
    }
}
