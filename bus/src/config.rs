//! Bus configuration.

/// What the bus does when a subscriber fails during a dispatch pass.
///
/// In both cases every live subscriber in the pass still receives the event; the policy
/// only decides what the caller of `publish` sees afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log each failure at `warn` and report success.
    #[default]
    LogAndContinue,
    /// Log each failure and return them all as a
    /// [`PublishError`](crate::PublishError) once the pass completes.
    Propagate,
}

/// Configuration for an [`EventBus`](crate::EventBus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// How subscriber failures are surfaced.
    pub failure_policy: FailurePolicy,
    /// Initial registry capacity.
    pub capacity: usize,
}

impl BusConfig {
    /// Default initial registry capacity.
    pub const DEFAULT_CAPACITY: usize = 16;

    #[inline]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[inline]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
