//! Payment models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::UnknownStatus;

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Payment entity
///
/// Payments have a lifecycle independent of their order; several payments
/// may reference the same order_id and no sum-equals-total rule is
/// enforced.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
}

/// Request for payment creation
///
/// `amount` accepts either a JSON number or a numeric string; anything
/// else is rejected at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: i32,
    #[serde(deserialize_with = "flexible_amount")]
    pub amount: f64,
    pub method: String,
}

/// Sparse patch for payment updates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaymentRequest {
    #[serde(default, deserialize_with = "flexible_amount_opt")]
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub status: Option<PaymentStatus>,
}

/// Accept a numeric amount given as a JSON number or a numeric string
fn flexible_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("amount is not numeric: {s:?}"))),
    }
}

fn flexible_amount_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    flexible_amount(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_json_number() {
        let req: CreatePaymentRequest =
            serde_json::from_str(r#"{"order_id": 1, "amount": 99.5, "method": "card"}"#).unwrap();
        assert_eq!(req.amount, 99.5);
    }

    #[test]
    fn amount_accepts_numeric_string() {
        let req: CreatePaymentRequest =
            serde_json::from_str(r#"{"order_id": 1, "amount": "120.00", "method": "card"}"#)
                .unwrap();
        assert_eq!(req.amount, 120.0);
    }

    #[test]
    fn amount_rejects_non_numeric_string() {
        let result = serde_json::from_str::<CreatePaymentRequest>(
            r#"{"order_id": 1, "amount": "a lot", "method": "card"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn patch_amount_is_optional() {
        let req: UpdatePaymentRequest = serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(req.amount, None);
        assert_eq!(req.status, Some(PaymentStatus::Completed));

        let req: UpdatePaymentRequest = serde_json::from_str(r#"{"amount": "45"}"#).unwrap();
        assert_eq!(req.amount, Some(45.0));
    }
}
