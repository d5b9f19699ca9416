//! Delivers domain changes to the propagators which watch them.
//!
//! Assignments are recorded as events in the [`EventSink`] of the
//! [`Assignments`](crate::engine::Assignments). After every propagator call (and before the
//! first one of a round) the [`NotificationEngine`] drains those events and calls
//! [`Propagator::notify`](crate::propagation::Propagator::notify) on every watcher, enqueueing
//! the propagators which ask for it. All events of a round are therefore delivered before any
//! watching propagator runs again.
mod domain_events;
mod event_sink;
mod opaque_domain_event;
mod watch_list;

pub use domain_events::*;
pub(crate) use event_sink::EventSink;
pub use opaque_domain_event::OpaqueDomainEvent;
pub(crate) use watch_list::WatchListDomainEvents;
pub use watch_list::Watchers;

use crate::engine::Assignments;
use crate::engine::PropagatorQueue;
use crate::engine::variables::DomainId;
use crate::propagation::EnqueueDecision;
use crate::propagation::NotificationContext;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;
use crate::propagation::store::PropagatorStore;

#[derive(Clone, Debug, Default)]
pub(crate) struct NotificationEngine {
    watch_list_domain_events: WatchListDomainEvents,
    /// Reused buffer for the events drained from the assignments.
    event_drain: Vec<(BooleanDomainEvent, DomainId)>,
}

impl NotificationEngine {
    pub(crate) fn grow(&mut self) {
        self.watch_list_domain_events.grow();
    }

    pub(crate) fn watchers(&mut self, propagator_var: PropagatorVarId) -> Watchers<'_> {
        Watchers::new(propagator_var, &mut self.watch_list_domain_events)
    }

    /// Removes the watchers of a retired propagator.
    pub(crate) fn remove_propagator(&mut self, propagator: PropagatorId) {
        self.watch_list_domain_events.unwatch_propagator(propagator);
    }

    #[cfg(test)]
    pub(crate) fn num_watchers(&self) -> usize {
        self.watch_list_domain_events.num_watchers()
    }

    /// Drain the pending domain events and notify the watching propagators, enqueueing those
    /// which request it.
    ///
    /// Returns the number of notifications which were delivered.
    pub(crate) fn notify_propagators_about_domain_events(
        &mut self,
        assignments: &mut Assignments,
        propagators: &mut PropagatorStore,
        propagator_queue: &mut PropagatorQueue,
    ) -> usize {
        self.event_drain.extend(assignments.drain_domain_events());

        let mut num_notifications = 0;

        for (event, domain) in self.event_drain.drain(..) {
            for watcher in self.watch_list_domain_events.get_affected(event, domain) {
                let Some(propagator) = propagators.get_mut(watcher.propagator) else {
                    continue;
                };

                num_notifications += 1;

                let context = NotificationContext::new(assignments);
                let decision =
                    propagator.notify(context, watcher.variable, OpaqueDomainEvent::from(event));

                if decision == EnqueueDecision::Enqueue {
                    propagator_queue.enqueue_propagator(watcher.propagator, propagator.priority());
                }
            }
        }

        num_notifications
    }
}
