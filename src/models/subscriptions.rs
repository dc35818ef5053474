use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How far apart consecutive installments of a plan are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    BiAnnually,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::BiAnnually => "bi_annually",
            Self::Yearly => "yearly",
        }
    }

    /// Moves `from` forward by `steps` whole intervals.
    ///
    /// Calendar intervals are added as months in one go, so Jan 31 + 2 months
    /// lands on Mar 31 rather than drifting through Feb 28. Returns `None`
    /// when the result falls outside chrono's representable range.
    pub fn advance(&self, from: NaiveDateTime, steps: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Daily => from.checked_add_signed(Duration::days(i64::from(steps))),
            Self::Weekly => from.checked_add_signed(Duration::weeks(i64::from(steps))),
            Self::Monthly => from.checked_add_months(Months::new(steps)),
            Self::Quarterly => from.checked_add_months(Months::new(steps.checked_mul(3)?)),
            Self::BiAnnually => from.checked_add_months(Months::new(steps.checked_mul(6)?)),
            Self::Yearly => from.checked_add_months(Months::new(steps.checked_mul(12)?)),
        }
    }
}

impl TryFrom<String> for Recurrence {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "bi_annually" => Ok(Self::BiAnnually),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("{} is not a supported recurrence", other)),
        }
    }
}

/// The billing agreement behind an installment plan.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Uuid,
    pub buyer_id: i32,
    pub product_id: i32,
    pub total_installments: i32,
    pub recurrence: Recurrence,
    pub currency: String, // every charge of the plan is in this currency
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CreateInstallmentPlanRequest {
    pub buyer_id: i32,
    pub product_id: i32,
    pub total_installments: i32,
    pub recurrence: Recurrence,
    pub currency: Option<String>,
}

/// A plan request after validation, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub buyer_id: i32,
    pub product_id: i32,
    pub total_installments: i32,
    pub recurrence: Recurrence,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct InstallmentPlanStatus {
    pub subscription: Subscription,
    pub progress: crate::ledger::PlanProgress,
}
