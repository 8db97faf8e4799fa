#![forbid(unsafe_code)]

//! Domain events, queued for the host to drain.
//!
//! The controller never calls back into the host; it pushes events into a
//! bounded queue that the adapter drains after each operation. When the host
//! stops draining, the oldest events are dropped first.

use serde::{Deserialize, Serialize};

/// Something observable happened to a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelEvent {
    /// A user toggle flipped the panel's open state.
    Toggled { index: usize, is_open: bool },
    /// A click outside a closable open panel closed it.
    OutsideClickClosed { index: usize },
    /// The viewport resized; `open_panels` panels need re-measuring.
    ViewportResized { open_panels: usize },
}

/// Append to `queue`, evicting from the front past `limit`.
pub(crate) fn push_bounded(queue: &mut Vec<PanelEvent>, event: PanelEvent, limit: usize) {
    if queue.len() >= limit {
        let overflow = queue.len() - limit + 1;
        queue.drain(..overflow);
    }
    queue.push(event);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_bounded_drops_oldest() {
        let mut queue = Vec::new();
        for index in 0..5 {
            push_bounded(
                &mut queue,
                PanelEvent::OutsideClickClosed { index },
                3,
            );
        }
        assert_eq!(
            queue,
            vec![
                PanelEvent::OutsideClickClosed { index: 2 },
                PanelEvent::OutsideClickClosed { index: 3 },
                PanelEvent::OutsideClickClosed { index: 4 },
            ]
        );
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&PanelEvent::Toggled {
            index: 1,
            is_open: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"toggled","index":1,"is_open":true}"#);
    }
}
