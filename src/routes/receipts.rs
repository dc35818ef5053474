use crate::core::config::ApplicationConfig;
use crate::core::{format_money, AppError, AppSuccessResponse};
use crate::db::LedgerStore;
use crate::ledger::describe_charge;
use crate::models::receipts::ReceiptResponse;
use crate::receipts::{ReceiptContext, ReceiptCopy};

use actix_web::{get, web, HttpResponse, Result};
use uuid::Uuid;

use super::ledger_failure;

#[tracing::instrument(name = "Get Purchase Receipt", skip(store, application, copy))]
#[get("/{charge_id}/receipt")]
pub async fn get_receipt(
    store: web::Data<dyn LedgerStore>,
    application: web::Data<ApplicationConfig>,
    copy: web::Data<dyn ReceiptCopy>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let charge_id = path.into_inner();

    let charge = store
        .find_charge(charge_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Purchase {} was not found", charge_id)))?;

    let snapshot = store
        .load_snapshot(charge.subscription_id)
        .await?
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "Purchase {} refers to missing subscription {}",
                charge.id, charge.subscription_id
            ))
        })?;

    let installment = describe_charge(&charge, &snapshot.subscription, &snapshot.charges)
        .map_err(ledger_failure)?;

    let context = ReceiptContext {
        currency: charge.currency.clone(),
        manage_payment_settings_url: application
            .manage_payment_settings_url(snapshot.subscription.id),
    };
    let messages = copy.messages(&installment, &context);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: ReceiptResponse {
            amount_formatted: format_money(charge.amount, &charge.currency),
            charge,
            installment,
            messages,
        },
        message: "Receipt retrieved successfully".to_string(),
    }))
}
