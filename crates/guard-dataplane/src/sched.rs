//! Scheduler-switch tracer
//!
//! Passive probe for task-context-switch notifications. Structurally
//! independent of the egress monitor: no lookup, no decision, just a copy
//! of the switch into its own bounded ring.

use std::sync::Arc;

use guard_common::SchedSwitchEvent;

use crate::ring::EventRing;

/// Records task switches into a dedicated event ring
pub struct SchedSwitchTracer {
    events: Arc<EventRing<SchedSwitchEvent>>,
}

impl SchedSwitchTracer {
    /// Build a tracer over its ring
    pub fn new(events: Arc<EventRing<SchedSwitchEvent>>) -> Self {
        Self { events }
    }

    /// Record one context switch, best-effort
    ///
    /// Task names are truncated to the kernel comm length and null-padded.
    /// Returns whether the record was accepted; a full ring loses the
    /// observation and nothing else.
    #[inline]
    pub fn on_switch(
        &self,
        prev_pid: i32,
        prev_comm: &str,
        next_pid: i32,
        next_comm: &str,
    ) -> bool {
        self.events
            .try_submit(SchedSwitchEvent::new(prev_pid, prev_comm, next_pid, next_comm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard_common::SchedSwitchEvent;

    #[test]
    fn test_switch_recorded() {
        let events = Arc::new(EventRing::new());
        let tracer = SchedSwitchTracer::new(Arc::clone(&events));

        assert!(tracer.on_switch(1234, "kworker/0:1", 0, "swapper/0"));

        let event = events.try_recv().unwrap();
        assert_eq!(event.prev_pid, 1234);
        assert_eq!(event.next_pid, 0);
        assert_eq!(event.prev_comm_str(), "kworker/0:1");
        assert_eq!(event.next_comm_str(), "swapper/0");
    }

    #[test]
    fn test_full_ring_loses_switch_only() {
        let events: Arc<EventRing<SchedSwitchEvent>> =
            Arc::new(EventRing::with_byte_budget(SchedSwitchEvent::WIRE_SIZE));
        let tracer = SchedSwitchTracer::new(Arc::clone(&events));

        assert!(tracer.on_switch(1, "a", 2, "b"));
        assert!(!tracer.on_switch(3, "c", 4, "d"));

        let event = events.try_recv().unwrap();
        assert_eq!(event.prev_pid, 1);
        assert!(events.try_recv().is_none());
    }
}
