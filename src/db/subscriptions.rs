use crate::core::AppError;
use crate::models::subscriptions::{NewSubscription, Recurrence, Subscription};
use chrono::{NaiveDateTime, Utc};
use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    buyer_id: i32,
    product_id: i32,
    total_installments: i32,
    recurrence: String,
    currency: String,
    created_at: NaiveDateTime,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = AppError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: row.id,
            buyer_id: row.buyer_id,
            product_id: row.product_id,
            total_installments: row.total_installments,
            recurrence: Recurrence::try_from(row.recurrence).map_err(AppError::internal_error)?,
            currency: row.currency,
            created_at: row.created_at,
        })
    }
}

// Create installment plan subscription
pub async fn insert_subscription(
    pool: &MySqlPool,
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

    sqlx::query(
        r#"
        INSERT INTO tbl_installment_subscriptions
        (id, buyer_id, product_id, total_installments, recurrence, currency, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(subscription.id)
    .bind(subscription.buyer_id)
    .bind(subscription.product_id)
    .bind(subscription.total_installments)
    .bind(subscription.recurrence.as_str())
    .bind(&subscription.currency)
    .bind(subscription.created_at)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(subscription)
}

// Get subscription by ID, optionally locking the row until the transaction ends
pub async fn get_subscription_by_id(
    transaction: &mut Transaction<'_, MySql>,
    subscription_id: Uuid,
    for_update: bool,
) -> Result<Option<Subscription>, AppError> {
    let query = if for_update {
        r#"
        SELECT id, buyer_id, product_id, total_installments, recurrence, currency, created_at
        FROM tbl_installment_subscriptions
        WHERE id = ?
        FOR UPDATE
        "#
    } else {
        r#"
        SELECT id, buyer_id, product_id, total_installments, recurrence, currency, created_at
        FROM tbl_installment_subscriptions
        WHERE id = ?
        "#
    };

    let row = sqlx::query_as::<_, SubscriptionRow>(query)
        .bind(subscription_id)
        .fetch_optional(&mut **transaction)
        .await
        .map_err(AppError::db_error)?;

    row.map(Subscription::try_from).transpose()
}
