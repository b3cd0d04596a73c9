use crate::error::StoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a payment, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaymentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A non-negative monetary amount owed on a payment.
///
/// Wraps `rust_decimal::Decimal` so that negative dues cannot be constructed,
/// including through deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds an amount from a whole number of cents, e.g. `9999` is `99.99`.
    pub const fn from_cents(cents: u32) -> Self {
        Self(Decimal::from_parts(cents, 0, 0, false, 2))
    }

    pub fn new(value: Decimal) -> Result<Self, StoreError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(StoreError::Validation(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = StoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "overdue" => Ok(PaymentStatus::Overdue),
            other => Err(StoreError::Validation(format!(
                "Unknown payment status: {other}"
            ))),
        }
    }
}

/// Denormalized snapshot of the member a payment is attached to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Member {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Reminder schedule: which channels to use and how many days before the
/// due date each reminder would go out.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct Reminders {
    pub types: Vec<String>,
    pub days: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: String,
    pub member: Member,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
}

/// Payload accepted by payment creation.
///
/// Carries every field of a [`Payment`] except its id. A status may be
/// supplied but it is ignored: new payments always start out pending.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub member_id: String,
    pub member: Member,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reminders: Option<Reminders>,
}

impl NewPayment {
    /// Turns the payload into a stored record under `id`, forcing it to pending.
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            member_id: self.member_id,
            member: self.member,
            amount: self.amount,
            kind: self.kind,
            due_date: self.due_date,
            status: PaymentStatus::Pending,
            description: self.description,
            reminders: self.reminders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload(status: Option<PaymentStatus>) -> NewPayment {
        NewPayment {
            member_id: "7".to_string(),
            member: Member {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+441234".to_string(),
            },
            amount: Amount::new(dec!(25.00)).unwrap(),
            kind: "Drop-in".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status,
            description: Some("guest pass".to_string()),
            reminders: None,
        }
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(Amount::new(dec!(0.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(-0.01)),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_amount_from_cents() {
        assert_eq!(Amount::from_cents(9999).value(), dec!(99.99));
        assert_eq!(Amount::from_cents(0), Amount::ZERO);
        assert_eq!(Amount::from_cents(14999).to_string(), "149.99");
    }

    #[test]
    fn test_negative_amount_rejected_on_deserialize() {
        let json = r#"{"memberId":"1","member":{"name":"a","email":"b","phone":"c"},
            "amount":-5,"type":"x","dueDate":"2024-01-01"}"#;
        assert!(serde_json::from_str::<NewPayment>(json).is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(
            " Overdue ".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Overdue
        );
        assert!("cancelled".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_into_payment_forces_pending() {
        let payment = payload(Some(PaymentStatus::Paid)).into_payment(PaymentId::new("42"));
        assert_eq!(payment.id.as_str(), "42");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.description.as_deref(), Some("guest pass"));
    }

    #[test]
    fn test_payment_json_shape() {
        let payment = payload(None).into_payment(PaymentId::new("9"));
        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["memberId"], "7");
        assert_eq!(value["type"], "Drop-in");
        assert_eq!(value["dueDate"], "2024-05-01");
        assert_eq!(value["status"], "pending");
        assert!(value.get("reminders").is_none());
    }
}
