use super::payment::{Payment, PaymentId, PaymentStatus};
use super::stats::PaymentStats;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery channel for a payment reminder.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Email,
    Whatsapp,
}

impl fmt::Display for ReminderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderChannel::Email => f.write_str("email"),
            ReminderChannel::Whatsapp => f.write_str("whatsapp"),
        }
    }
}

impl FromStr for ReminderChannel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(ReminderChannel::Email),
            "whatsapp" => Ok(ReminderChannel::Whatsapp),
            other => Err(StoreError::Validation(format!(
                "Unknown reminder channel: {other}"
            ))),
        }
    }
}

/// The backend the store talks to. Every action goes through one call here.
#[async_trait]
pub trait PaymentTransport: Send + Sync {
    async fn fetch_payments(&self) -> Result<Vec<Payment>>;
    async fn fetch_stats(&self) -> Result<PaymentStats>;
    /// Acknowledges a new record before the store appends it.
    async fn create_payment(&self, payment: &Payment) -> Result<()>;
    async fn update_status(&self, id: &PaymentId, status: PaymentStatus) -> Result<()>;
    async fn send_reminder(&self, id: &PaymentId, channel: ReminderChannel) -> Result<()>;
}

/// Source of ids for newly created payments. Must never repeat an id.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> PaymentId;
}

/// User-facing success messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

pub type PaymentTransportBox = Box<dyn PaymentTransport>;
pub type IdGeneratorBox = Box<dyn IdGenerator>;
pub type NotifierBox = Box<dyn Notifier>;
