use crate::domain::ports::Notifier;
use tracing::info;

/// Emits success notifications as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "dues::notify", "{message}");
    }
}
