use super::seed;
use crate::config::SimulationConfig;
use crate::domain::payment::{Payment, PaymentId, PaymentStatus};
use crate::domain::ports::{PaymentTransport, ReminderChannel};
use crate::domain::stats::PaymentStats;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

/// A stand-in backend that answers every call after a fixed delay.
///
/// Fetches always return the data set it was built with. Creation and status
/// updates are acknowledged without being recorded anywhere; the store owns
/// the resulting state. Reminder sends fail only when configured to.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    config: SimulationConfig,
    payments: Vec<Payment>,
    stats: PaymentStats,
}

impl SimulatedTransport {
    /// Creates a transport serving the built-in seed data.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_data(config, seed::payments(), seed::stats())
    }

    pub fn with_data(config: SimulationConfig, payments: Vec<Payment>, stats: PaymentStats) -> Self {
        Self {
            config,
            payments,
            stats,
        }
    }

    async fn round_trip(&self, call: &str) {
        debug!(call, delay_ms = self.config.delay.as_millis() as u64, "simulated request");
        sleep(self.config.delay).await;
    }
}

#[async_trait]
impl PaymentTransport for SimulatedTransport {
    async fn fetch_payments(&self) -> Result<Vec<Payment>> {
        self.round_trip("fetch_payments").await;
        Ok(self.payments.clone())
    }

    async fn fetch_stats(&self) -> Result<PaymentStats> {
        self.round_trip("fetch_stats").await;
        Ok(self.stats.clone())
    }

    async fn create_payment(&self, _payment: &Payment) -> Result<()> {
        self.round_trip("create_payment").await;
        Ok(())
    }

    async fn update_status(&self, _id: &PaymentId, _status: PaymentStatus) -> Result<()> {
        self.round_trip("update_status").await;
        Ok(())
    }

    async fn send_reminder(&self, id: &PaymentId, channel: ReminderChannel) -> Result<()> {
        self.round_trip("send_reminder").await;
        if self.config.fail_reminders {
            return Err(StoreError::Transport(format!(
                "{channel} gateway rejected reminder for payment {id}"
            )));
        }
        Ok(())
    }
}
