use enumset::EnumSet;

use super::BooleanDomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;

/// For every domain, the propagator variables watching each of its events.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchListDomainEvents {
    watchers: KeyedVec<DomainId, DomainEventWatcher>,
    /// For every propagator, the domains it has registered watchers on.
    watched_domains: KeyedVec<PropagatorId, Vec<DomainId>>,
}

#[derive(Clone, Debug, Default)]
struct DomainEventWatcher {
    true_watchers: Vec<PropagatorVarId>,
    false_watchers: Vec<PropagatorVarId>,
}

impl WatchListDomainEvents {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(DomainEventWatcher::default());
    }

    pub(crate) fn get_affected(
        &self,
        event: BooleanDomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        let watcher = &self.watchers[domain];

        match event {
            BooleanDomainEvent::AssignedTrue => &watcher.true_watchers,
            BooleanDomainEvent::AssignedFalse => &watcher.false_watchers,
        }
    }

    /// Removes every watcher of `propagator`.
    pub(crate) fn unwatch_propagator(&mut self, propagator: PropagatorId) {
        let Some(domains) = self.watched_domains.get_mut(propagator) else {
            return;
        };

        for domain in std::mem::take(domains) {
            let domain_watcher = &mut self.watchers[domain];
            domain_watcher
                .true_watchers
                .retain(|watcher| watcher.propagator != propagator);
            domain_watcher
                .false_watchers
                .retain(|watcher| watcher.propagator != propagator);
        }
    }

    #[cfg(test)]
    pub(crate) fn num_watchers(&self) -> usize {
        self.watchers
            .iter()
            .map(|watcher| watcher.true_watchers.len() + watcher.false_watchers.len())
            .sum()
    }

    fn watch(
        &mut self,
        watcher: PropagatorVarId,
        domain: DomainId,
        events: EnumSet<BooleanDomainEvent>,
    ) {
        self.watched_domains
            .accomodate(watcher.propagator, Vec::default());
        let domains = &mut self.watched_domains[watcher.propagator];
        if !domains.contains(&domain) {
            domains.push(domain);
        }

        let domain_watcher = &mut self.watchers[domain];

        for event in events {
            let event_watchers = match event {
                BooleanDomainEvent::AssignedTrue => &mut domain_watcher.true_watchers,
                BooleanDomainEvent::AssignedFalse => &mut domain_watcher.false_watchers,
            };

            if !event_watchers.contains(&watcher) {
                event_watchers.push(watcher);
            }
        }
    }
}

/// Used by variables to register a single propagator variable in the watch lists; variables
/// translate the events they are asked to watch to events on their underlying domain.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchListDomainEvents,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(
        propagator_var: PropagatorVarId,
        watch_list: &'a mut WatchListDomainEvents,
    ) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<BooleanDomainEvent>) {
        self.watch_list.watch(self.propagator_var, domain, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::LocalId;
    use crate::propagation::PropagatorId;

    #[test]
    fn watchers_are_only_affected_by_their_events() {
        let mut watch_list = WatchListDomainEvents::default();
        watch_list.grow();
        let domain = DomainId::new(0);

        let watcher = PropagatorVarId {
            propagator: PropagatorId(0),
            variable: LocalId::from(3),
        };
        Watchers::new(watcher, &mut watch_list)
            .watch_all(domain, EnumSet::only(BooleanDomainEvent::AssignedTrue));

        assert_eq!(
            watch_list.get_affected(BooleanDomainEvent::AssignedTrue, domain),
            &[watcher]
        );
        assert!(watch_list
            .get_affected(BooleanDomainEvent::AssignedFalse, domain)
            .is_empty());
    }

    #[test]
    fn watching_twice_registers_once() {
        let mut watch_list = WatchListDomainEvents::default();
        watch_list.grow();
        let domain = DomainId::new(0);

        let watcher = PropagatorVarId {
            propagator: PropagatorId(1),
            variable: LocalId::from(0),
        };
        let mut watchers = Watchers::new(watcher, &mut watch_list);
        watchers.watch_all(domain, EnumSet::all());
        watchers.watch_all(domain, EnumSet::all());

        assert_eq!(
            watch_list
                .get_affected(BooleanDomainEvent::AssignedFalse, domain)
                .len(),
            1
        );
    }

    #[test]
    fn unwatching_a_propagator_keeps_the_other_watchers() {
        let mut watch_list = WatchListDomainEvents::default();
        watch_list.grow();
        watch_list.grow();
        let domains = [DomainId::new(0), DomainId::new(1)];

        let retired = PropagatorId(0);
        let kept = PropagatorVarId {
            propagator: PropagatorId(1),
            variable: LocalId::from(0),
        };

        for (index, &domain) in domains.iter().enumerate() {
            let watcher = PropagatorVarId {
                propagator: retired,
                variable: LocalId::from(index as u32),
            };
            Watchers::new(watcher, &mut watch_list).watch_all(domain, EnumSet::all());
        }
        Watchers::new(kept, &mut watch_list).watch_all(domains[1], EnumSet::all());
        assert_eq!(watch_list.num_watchers(), 6);

        watch_list.unwatch_propagator(retired);

        assert_eq!(watch_list.num_watchers(), 2);
        assert!(watch_list
            .get_affected(BooleanDomainEvent::AssignedTrue, domains[0])
            .is_empty());
        assert_eq!(
            watch_list.get_affected(BooleanDomainEvent::AssignedFalse, domains[1]),
            &[kept]
        );

        // Unwatching again is a no-op, as is unwatching a propagator without watchers.
        watch_list.unwatch_propagator(retired);
        watch_list.unwatch_propagator(PropagatorId(7));
        assert_eq!(watch_list.num_watchers(), 2);
    }
}
