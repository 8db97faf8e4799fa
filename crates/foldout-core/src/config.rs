#![forbid(unsafe_code)]

//! Controller configuration.

use std::time::Duration;

/// Default storage key namespace (`"panel-open-{index}"`).
pub const DEFAULT_NAMESPACE: &str = "panel";

/// Default duration of the post-open dynamic-height tracking window.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(500);

/// Default cap on the undrained domain-event queue.
pub const DEFAULT_EVENT_BUFFER_MAX: usize = 256;

/// Tunables for a [`DisclosureController`](crate::DisclosureController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Prefix of persisted keys; change it to keep entries from older page
    /// generations readable (the legacy pages used `"dropdown"`).
    pub namespace: String,
    /// How long after opening a panel its content height keeps being tracked
    /// for late layout changes (asynchronously loaded sub-content).
    pub settle_window: Duration,
    /// Oldest events are dropped once the undrained queue reaches this size.
    pub event_buffer_max: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            settle_window: DEFAULT_SETTLE_WINDOW,
            event_buffer_max: DEFAULT_EVENT_BUFFER_MAX,
        }
    }
}

impl ControllerConfig {
    /// Replace the storage key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the settle-window duration.
    #[must_use]
    pub fn with_settle_window(mut self, window: Duration) -> Self {
        self.settle_window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reasonable() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.namespace, "panel");
        assert_eq!(cfg.settle_window, Duration::from_millis(500));
        assert!(cfg.event_buffer_max > 0);
    }

    #[test]
    fn builders_override_fields() {
        let cfg = ControllerConfig::default()
            .with_namespace("dropdown")
            .with_settle_window(Duration::from_millis(250));
        assert_eq!(cfg.namespace, "dropdown");
        assert_eq!(cfg.settle_window, Duration::from_millis(250));
    }
}
