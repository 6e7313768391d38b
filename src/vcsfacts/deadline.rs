use std::time::{Duration, Instant};

/// Optional point in time after which fact gathering stops.
///
/// Threaded through every long-running backend call. When it passes, the
/// engine returns whatever it has accumulated so far; derive and filter still
/// run on the partial findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub const fn none() -> Self {
        Self(None)
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now().checked_add(timeout))
    }

    pub fn from_millis(timeout_ms: Option<u64>) -> Self {
        timeout_ms
            .map(|ms| Self::after(Duration::from_millis(ms)))
            .unwrap_or_default()
    }

    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}
