//! Tuning events and the reporter capability.

/// One explanatory message per tuning call; delivered and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuningEvent {
    pub message: String,
}

impl TuningEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sink for tuning events.
///
/// The engine owns no queue or log; the caller passes a reporter per call
/// and decides how (or whether) to forward events.
pub trait EventReporter {
    fn report(&mut self, event: TuningEvent);
}

/// Reporter that keeps every event in memory, oldest first.
#[derive(Debug, Default)]
pub struct EventCollector {
    pub events: Vec<TuningEvent>,
}

impl EventReporter for EventCollector {
    fn report(&mut self, event: TuningEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_keeps_events_in_order() {
        let mut collector = EventCollector::default();
        collector.report(TuningEvent::new("first"));
        collector.report(TuningEvent::new("second"));
        assert_eq!(collector.events[0].message, "first");
        assert_eq!(collector.events[1].message, "second");
    }
}
