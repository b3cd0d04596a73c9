use std::time::Duration;

/// Delay applied to every simulated backend call unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Knobs for the simulated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// How long each call waits before answering.
    pub delay: Duration,
    /// Forces every reminder send to fail.
    pub fail_reminders: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            fail_reminders: false,
        }
    }
}

impl SimulationConfig {
    /// No delay at all; used by tests and one-shot CLI runs.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_failing_reminders(mut self, fail: bool) -> Self {
        self.fail_reminders = fail;
        self
    }
}
