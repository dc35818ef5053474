use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One realized payment against a subscription.
///
/// `sequence` is assigned by the store on insert and only ever grows; it
/// orders charges that share a timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Charge {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub sequence: i64,
    pub amount: i64, // minor units, e.g. cents
    pub currency: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecordChargeRequest {
    pub amount: i64,
    pub currency: Option<String>,
    pub charged_at: Option<NaiveDateTime>,
}

/// A charge that has been validated but not yet given an id or sequence.
///
/// Without a currency the charge is taken in its plan's currency.
#[derive(Debug, Clone)]
pub struct NewCharge {
    pub amount: i64,
    pub currency: Option<String>,
    pub created_at: NaiveDateTime,
}
