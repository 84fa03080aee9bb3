//! Logging helpers.

use std::time::Instant;

use log::{log_enabled, Level};

/// RAII timer that traces how long a scope took.
pub(crate) struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!("{} took {} µs", self.label, self.start.elapsed().as_micros());
        }
    }
}
