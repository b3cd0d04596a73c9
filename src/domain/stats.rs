use super::payment::{Payment, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate figures shown on the payments dashboard.
///
/// The snapshot is fetched independently of the payment list; nothing ties
/// its totals to the records currently held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_due: Decimal,
    pub overdue: Decimal,
    pub paid: Decimal,
    pub pending: Decimal,
    pub overdue_count: u32,
    pub paid_count: u32,
    pub pending_count: u32,
    /// Signed percentage strings such as `"+12%"`, for display only.
    pub due_trend: String,
    pub overdue_trend: String,
    pub paid_trend: String,
    pub pending_trend: String,
}

impl PaymentStats {
    /// Derives totals and counts from a list of payments.
    ///
    /// `total_due` covers everything not yet paid. Trends have no history to
    /// compare against and are reported flat.
    pub fn summarize(payments: &[Payment]) -> Self {
        let mut stats = Self {
            due_trend: "0%".to_string(),
            overdue_trend: "0%".to_string(),
            paid_trend: "0%".to_string(),
            pending_trend: "0%".to_string(),
            ..Self::default()
        };

        for payment in payments {
            let amount = payment.amount.value();
            match payment.status {
                PaymentStatus::Pending => {
                    stats.pending += amount;
                    stats.pending_count += 1;
                    stats.total_due += amount;
                }
                PaymentStatus::Overdue => {
                    stats.overdue += amount;
                    stats.overdue_count += 1;
                    stats.total_due += amount;
                }
                PaymentStatus::Paid => {
                    stats.paid += amount;
                    stats.paid_count += 1;
                }
            }
        }
        stats
    }
}
