use std::fmt::Debug;

use super::Propagator;
use super::PropagatorHandle;
use super::PropagatorId;
use crate::containers::KeyedVec;

/// A central store for propagators.
///
/// A propagator which is subsumed or rewritten is retired: its slot is emptied but its
/// [`PropagatorId`] is never handed out again, so stale watchers and queue entries can be
/// recognised and skipped.
#[derive(Clone, Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Option<Box<dyn Propagator>>>,
    num_active: usize,
}

impl PropagatorStore {
    /// The identifier the next added propagator will receive.
    pub(crate) fn next_id(&self) -> PropagatorId {
        PropagatorId(self.propagators.len() as u32)
    }

    pub(crate) fn push(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        self.num_active += 1;
        self.propagators.push(Some(propagator))
    }

    /// The number of propagators which have not been retired.
    pub(crate) fn num_active(&self) -> usize {
        self.num_active
    }

    /// Returns the propagator, or [`None`] if it was retired.
    pub(crate) fn get_mut(&mut self, id: PropagatorId) -> Option<&mut Box<dyn Propagator>> {
        self.propagators.get_mut(id).and_then(Option::as_mut)
    }

    /// Remove the propagator from the store for good.
    pub(crate) fn retire(&mut self, id: PropagatorId) {
        if let Some(slot) = self.propagators.get_mut(id) {
            if slot.take().is_some() {
                self.num_active -= 1;
            }
        }
    }

    /// Get a reference to the propagator identified by the given handle, or [`None`] if it was
    /// retired.
    pub(crate) fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators
            .get(handle.untyped())
            .and_then(Option::as_ref)
            .and_then(|propagator| (**propagator).downcast_ref::<P>())
    }

    pub(crate) fn iter_active(&self) -> impl Iterator<Item = &dyn Propagator> + '_ {
        self.propagators.iter().flatten().map(|b| b.as_ref())
    }
}

impl Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let propagators: Vec<_> = self
            .propagators
            .iter()
            .map(|propagator| propagator.as_ref().map_or("<retired>", |p| p.name()))
            .collect();

        write!(f, "{propagators:?}")
    }
}
