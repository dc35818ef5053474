use actix_web::web::{scope, ServiceConfig};
use actix_web::Scope;
use self::health_check::health_check as health_check_route;
use receipts::get_receipt;
use subscriptions::{create_installment_plan, get_installment_plan_status, record_charge};

use crate::core::AppError;
use crate::ledger::LedgerError;

mod health_check;
mod receipts;
mod subscriptions;

fn util_routes() -> Scope {
    scope("").service(health_check_route)
}

fn subscriptions_routes() -> Scope {
    scope("subscriptions")
        .service(create_installment_plan)
        .service(get_installment_plan_status)
        .service(record_charge)
}

fn purchases_routes() -> Scope {
    scope("purchases").service(get_receipt)
}

pub fn installment_receipts_routes(conf: &mut ServiceConfig) {
    conf.service(
        scope("api/v1")
            .service(subscriptions_routes())
            .service(purchases_routes())
            .service(util_routes()),
    );
}

/// Converts a ledger failure for the response, logging integrity problems
/// since they point at bad data upstream rather than a bad request.
fn ledger_failure(error: LedgerError) -> AppError {
    if let LedgerError::InvalidLedgerState { .. } = error {
        tracing::error!(
            error.cause_chain = ?error,
            error.message = %error,
            "Installment ledger is inconsistent"
        );
    }
    error.into()
}

const DEFAULT_CURRENCY: &str = "usd";

/// Lower-cases a requested currency code, falling back to the default.
fn normalize_currency(currency: Option<String>) -> Result<String, AppError> {
    let currency = currency
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::bad_request(format!(
            "{} is not a three-letter currency code",
            currency
        )));
    }
    Ok(currency)
}
