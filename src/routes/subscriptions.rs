use crate::core::{AppError, AppSuccessResponse};
use crate::db::LedgerStore;
use crate::ledger::summarize_plan;
use crate::models::charges::{NewCharge, RecordChargeRequest};
use crate::models::subscriptions::{
    CreateInstallmentPlanRequest, InstallmentPlanStatus, NewSubscription,
};

use actix_web::{get, post, web, HttpResponse, Result};
use chrono::Utc;
use uuid::Uuid;

use super::{ledger_failure, normalize_currency};

#[tracing::instrument(name = "Create Installment Plan", skip(store))]
#[post("")]
pub async fn create_installment_plan(
    store: web::Data<dyn LedgerStore>,
    request: web::Json<CreateInstallmentPlanRequest>,
) -> Result<HttpResponse, AppError> {
    if request.total_installments < 1 {
        return Err(AppError::bad_request(
            "An installment plan needs at least one installment",
        ));
    }

    let request = request.into_inner();
    let subscription = store
        .create_subscription(&NewSubscription {
            buyer_id: request.buyer_id,
            product_id: request.product_id,
            total_installments: request.total_installments,
            recurrence: request.recurrence,
            currency: normalize_currency(request.currency)?,
        })
        .await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: subscription,
        message: "Installment plan created successfully".to_string(),
    }))
}

#[tracing::instrument(name = "Get Installment Plan Status", skip(store))]
#[get("/{subscription_id}/installments")]
pub async fn get_installment_plan_status(
    store: web::Data<dyn LedgerStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let subscription_id = path.into_inner();

    let snapshot = store
        .load_snapshot(subscription_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Subscription {} was not found", subscription_id))
        })?;

    let progress =
        summarize_plan(&snapshot.subscription, &snapshot.charges).map_err(ledger_failure)?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: InstallmentPlanStatus {
            subscription: snapshot.subscription,
            progress,
        },
        message: "Installment plan status retrieved successfully".to_string(),
    }))
}

#[tracing::instrument(name = "Record Installment Charge", skip(store))]
#[post("/{subscription_id}/charges")]
pub async fn record_charge(
    store: web::Data<dyn LedgerStore>,
    path: web::Path<Uuid>,
    request: web::Json<RecordChargeRequest>,
) -> Result<HttpResponse, AppError> {
    let subscription_id = path.into_inner();
    let request = request.into_inner();

    if request.amount < 0 {
        return Err(AppError::bad_request("Charge amount cannot be negative"));
    }

    // Left unset, the store bills in the plan's own currency.
    let currency = request
        .currency
        .filter(|c| !c.trim().is_empty())
        .map(|c| normalize_currency(Some(c)))
        .transpose()?;

    let charge = store
        .record_charge(
            subscription_id,
            NewCharge {
                amount: request.amount,
                currency,
                created_at: request.charged_at.unwrap_or_else(|| Utc::now().naive_utc()),
            },
        )
        .await?;

    tracing::info!(
        charge_id = %charge.id,
        sequence = charge.sequence,
        "Recorded installment charge"
    );

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: charge,
        message: "Charge recorded successfully".to_string(),
    }))
}
