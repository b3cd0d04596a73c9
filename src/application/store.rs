use crate::config::SimulationConfig;
use crate::domain::filter::{FilterField, PaymentFilters};
use crate::domain::payment::{NewPayment, Payment, PaymentId, PaymentStatus};
use crate::domain::ports::{IdGeneratorBox, NotifierBox, PaymentTransportBox, ReminderChannel};
use crate::domain::stats::PaymentStats;
use crate::error::{Result, StoreError};
use crate::infrastructure::id::SequentialIdGenerator;
use crate::infrastructure::notifier::TracingNotifier;
use crate::infrastructure::seed;
use crate::infrastructure::simulated::SimulatedTransport;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// How many ids a create draws before giving up on finding an unused one.
const MAX_ID_ATTEMPTS: usize = 64;

const CREATE_FAILED: &str = "Failed to create payment";

/// Everything the payments screen reads.
///
/// `filtered_payments` is always `filters` applied to `payments`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentsState {
    pub payments: Vec<Payment>,
    pub filtered_payments: Vec<Payment>,
    pub filters: PaymentFilters,
    pub stats: Option<PaymentStats>,
    /// True while at least one action is waiting on the backend.
    pub is_loading: bool,
    /// Most recent failure message. Successful actions leave it in place.
    pub error: Option<String>,
    in_flight: usize,
}

impl PaymentsState {
    fn refilter(&mut self) {
        self.filtered_payments = self.filters.apply(&self.payments);
    }
}

/// View-model store for the membership payments screen.
///
/// State sits in a `watch` channel: each mutation is a single atomic
/// modification, and UI code can [`subscribe`](Self::subscribe) to changes.
/// Actions take `&self`, so several may be in flight at once; no lock is
/// held across a backend call.
pub struct PaymentStore {
    state: watch::Sender<PaymentsState>,
    transport: PaymentTransportBox,
    ids: IdGeneratorBox,
    notifier: NotifierBox,
}

impl PaymentStore {
    /// Creates a store with no payments and no stats.
    ///
    /// # Arguments
    ///
    /// * `transport` - The backend every action calls.
    /// * `ids` - Id source for created payments.
    /// * `notifier` - Receives success messages.
    pub fn new(transport: PaymentTransportBox, ids: IdGeneratorBox, notifier: NotifierBox) -> Self {
        Self {
            state: watch::Sender::new(PaymentsState::default()),
            transport,
            ids,
            notifier,
        }
    }

    /// Replaces the initial data the store shows before any fetch.
    pub fn with_initial(self, payments: Vec<Payment>, stats: Option<PaymentStats>) -> Self {
        self.state.send_modify(|state| {
            state.payments = payments;
            state.stats = stats;
            state.refilter();
        });
        self
    }

    /// A store over the simulated backend, preloaded with `payments` and the
    /// built-in stats.
    pub fn simulated(config: SimulationConfig, payments: Vec<Payment>) -> Self {
        let ids = SequentialIdGenerator::after(payments.iter().map(|p| &p.id));
        let transport = SimulatedTransport::with_data(config, payments.clone(), seed::stats());
        Self::new(Box::new(transport), Box::new(ids), Box::new(TracingNotifier))
            .with_initial(payments, Some(seed::stats()))
    }

    pub fn subscribe(&self) -> watch::Receiver<PaymentsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PaymentsState {
        self.state.borrow().clone()
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.state.borrow().payments.clone()
    }

    pub fn filtered_payments(&self) -> Vec<Payment> {
        self.state.borrow().filtered_payments.clone()
    }

    pub fn filters(&self) -> PaymentFilters {
        self.state.borrow().filters.clone()
    }

    pub fn stats(&self) -> Option<PaymentStats> {
        self.state.borrow().stats.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Reloads the payment list from the backend.
    pub async fn fetch_payments(&self) {
        self.begin("fetch_payments");
        match self.transport.fetch_payments().await {
            Ok(payments) => self.finish(|state| {
                state.payments = payments;
                state.refilter();
            }),
            Err(e) => self.fail("Failed to fetch payments", &e),
        }
    }

    /// Reloads the statistics snapshot from the backend.
    pub async fn fetch_payment_stats(&self) {
        self.begin("fetch_payment_stats");
        match self.transport.fetch_stats().await {
            Ok(stats) => self.finish(|state| state.stats = Some(stats)),
            Err(e) => self.fail("Failed to fetch payment stats", &e),
        }
    }

    /// Creates a payment from `data` and returns the stored record.
    ///
    /// The new record always starts out pending. It shows up in the filtered
    /// view only if it satisfies the active filters. Failures are recorded in
    /// `error` and yield `None`.
    pub async fn create_payment(&self, data: NewPayment) -> Option<Payment> {
        self.begin("create_payment");
        let id = {
            let state = self.state.borrow();
            self.unused_id(&state.payments)
        };
        let Some(id) = id else {
            let e = StoreError::Validation(format!(
                "no unused payment id after {MAX_ID_ATTEMPTS} attempts"
            ));
            self.fail(CREATE_FAILED, &e);
            return None;
        };
        let payment = data.into_payment(id);

        if let Err(e) = self.transport.create_payment(&payment).await {
            self.fail(CREATE_FAILED, &e);
            return None;
        }

        // Another create may have taken the id while this one was in flight.
        let mut created = None;
        self.state.send_modify(|state| {
            if state.payments.iter().any(|p| p.id == payment.id) {
                state.error = Some(CREATE_FAILED.to_string());
            } else {
                created = Some(payment.clone());
                state.payments.push(payment);
                state.refilter();
            }
            Self::settle(state);
        });
        if created.is_none() {
            error!("{CREATE_FAILED}: payment id taken by a concurrent create");
        }
        created
    }

    /// Sets the status of the payment with `id`. Unknown ids change nothing.
    pub async fn update_payment_status(&self, id: &PaymentId, status: PaymentStatus) {
        self.begin("update_payment_status");
        match self.transport.update_status(id, status).await {
            Ok(()) => self.finish(|state| {
                let Some(payment) = state.payments.iter_mut().find(|p| p.id == *id) else {
                    debug!(%id, "status update for unknown payment ignored");
                    return;
                };
                payment.status = status;
                state.refilter();
            }),
            Err(e) => self.fail("Failed to update payment status", &e),
        }
    }

    /// Sends a reminder for a payment. Payments are not modified.
    ///
    /// Unlike the other actions, a failure here is returned to the caller
    /// after being recorded in `error`.
    pub async fn send_reminder(&self, id: &PaymentId, channel: ReminderChannel) -> Result<()> {
        self.begin("send_reminder");
        match self.transport.send_reminder(id, channel).await {
            Ok(()) => {
                self.notifier.success(&format!("Reminder sent via {channel}"));
                self.finish(|_| {});
                Ok(())
            }
            Err(e) => {
                let message = format!("Failed to send {channel} reminder");
                self.fail(&message, &e);
                Err(StoreError::Reminder {
                    channel: channel.to_string(),
                    message,
                })
            }
        }
    }

    /// Sets one filter field from its UI string form and refilters.
    ///
    /// `"all"` clears the field. A value that does not parse for `field`
    /// is rejected and the state is left untouched.
    pub fn set_filter(&self, field: FilterField, value: &str) -> Result<()> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| match state.filters.set(field, value) {
            Ok(()) => {
                state.refilter();
                true
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        if let Err(e) = &outcome {
            warn!(%field, value, "rejected filter value: {e}");
        }
        outcome
    }

    pub fn clear_filters(&self) {
        self.state.send_modify(|state| {
            state.filters = PaymentFilters::default();
            state.filtered_payments = state.payments.clone();
        });
    }

    /// Draws ids until one is not used by any of `payments`.
    fn unused_id(&self, payments: &[Payment]) -> Option<PaymentId> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| self.ids.next_id())
            .find(|id| payments.iter().all(|p| p.id != *id))
    }

    fn begin(&self, action: &str) {
        debug!(action, "action started");
        self.state.send_modify(|state| {
            state.in_flight += 1;
            state.is_loading = true;
        });
    }

    fn finish(&self, apply: impl FnOnce(&mut PaymentsState)) {
        self.state.send_modify(|state| {
            apply(state);
            Self::settle(state);
        });
    }

    fn fail(&self, message: &str, cause: &StoreError) {
        error!(cause = %cause, "{message}");
        self.state.send_modify(|state| {
            state.error = Some(message.to_string());
            Self::settle(state);
        });
    }

    fn settle(state: &mut PaymentsState) {
        state.in_flight = state.in_flight.saturating_sub(1);
        state.is_loading = state.in_flight > 0;
    }
}
