use enumset::EnumSet;

use super::BooleanDomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// While propagation runs, the assignments it performs are captured as events in the event sink.
/// The engine drains the sink to notify all the propagators that subscribe to those events.
///
/// The event sink ignores duplicate events.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<BooleanDomainEvent>>,
    events: Vec<(BooleanDomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: BooleanDomainEvent, domain: DomainId) {
        let elem = &mut self.present[domain];

        if elem.insert(event) {
            self.events.push((event, domain));
        }
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (BooleanDomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_sink_is_empty() {
        let mut sink = EventSink::default();

        assert_eq!(sink.drain().count(), 0);
    }

    #[test]
    fn captured_events_are_drained_in_order() {
        let mut sink = EventSink::default();
        sink.grow();
        sink.grow();

        sink.event_occurred(BooleanDomainEvent::AssignedTrue, DomainId::new(1));
        sink.event_occurred(BooleanDomainEvent::AssignedFalse, DomainId::new(0));

        let events = sink.drain().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                (BooleanDomainEvent::AssignedTrue, DomainId::new(1)),
                (BooleanDomainEvent::AssignedFalse, DomainId::new(0)),
            ]
        );
        assert_eq!(sink.drain().count(), 0);
    }

    #[test]
    fn duplicate_events_are_ignored() {
        let mut sink = EventSink::default();
        sink.grow();

        sink.event_occurred(BooleanDomainEvent::AssignedTrue, DomainId::new(0));
        sink.event_occurred(BooleanDomainEvent::AssignedTrue, DomainId::new(0));

        assert_eq!(sink.drain().count(), 1);
    }
}
