use crate::core::AppError;
use crate::models::charges::Charge;
use chrono::NaiveDateTime;
use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

const CHARGE_COLUMNS: &str = "id, subscription_id, sequence, amount, currency, created_at";

// Get charge by ID
pub async fn get_charge_by_id(
    pool: &MySqlPool,
    charge_id: Uuid,
) -> Result<Option<Charge>, AppError> {
    let query = format!(
        "SELECT {} FROM tbl_installment_charges WHERE id = ?",
        CHARGE_COLUMNS
    );

    sqlx::query_as::<_, Charge>(&query)
        .bind(charge_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::db_error)
}

// Get every charge recorded for a subscription, oldest first
pub async fn get_subscription_charges(
    transaction: &mut Transaction<'_, MySql>,
    subscription_id: Uuid,
) -> Result<Vec<Charge>, AppError> {
    let query = format!(
        "SELECT {} FROM tbl_installment_charges \
         WHERE subscription_id = ? ORDER BY created_at ASC, sequence ASC",
        CHARGE_COLUMNS
    );

    sqlx::query_as::<_, Charge>(&query)
        .bind(subscription_id)
        .fetch_all(&mut **transaction)
        .await
        .map_err(AppError::db_error)
}

pub async fn count_subscription_charges(
    transaction: &mut Transaction<'_, MySql>,
    subscription_id: Uuid,
) -> Result<i64, AppError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tbl_installment_charges WHERE subscription_id = ?")
            .bind(subscription_id)
            .fetch_one(&mut **transaction)
            .await
            .map_err(AppError::db_error)?;

    Ok(count)
}

// Insert charge; the sequence column is filled in by AUTO_INCREMENT
pub async fn insert_charge(
    transaction: &mut Transaction<'_, MySql>,
    subscription_id: Uuid,
    amount: i64,
    currency: &str,
    created_at: NaiveDateTime,
) -> Result<Charge, AppError> {
    let charge_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO tbl_installment_charges (id, subscription_id, amount, currency, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(charge_id)
    .bind(subscription_id)
    .bind(amount)
    .bind(currency)
    .bind(created_at)
    .execute(&mut **transaction)
    .await
    .map_err(AppError::db_error)?;

    let query = format!(
        "SELECT {} FROM tbl_installment_charges WHERE id = ?",
        CHARGE_COLUMNS
    );

    sqlx::query_as::<_, Charge>(&query)
        .bind(charge_id)
        .fetch_one(&mut **transaction)
        .await
        .map_err(AppError::db_error)
}
