#![cfg(test)]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows setting
//! up specific scenarios under which to test the various operations of a propagator.
use crate::basic_types::PropagationStatusCP;
use crate::engine::notifications::NotificationEngine;
use crate::engine::variables::BooleanVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::PropagatorQueue;
use crate::propagation::store::PropagatorStore;
use crate::propagation::DynPropagatorConstructor;
use crate::propagation::EnqueueDecision;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;

/// A container for literals and propagators, which can be used to test propagators in
/// isolation: nothing happens unless the test asks for it.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    pub(crate) propagator_store: PropagatorStore,
    notification_engine: NotificationEngine,
}

impl TestSolver {
    pub(crate) fn new_literal(&mut self) -> Literal {
        self.notification_engine.grow();
        Literal::new(self.assignments.grow())
    }

    pub(crate) fn new_literals(&mut self, n: usize) -> Vec<Literal> {
        (0..n).map(|_| self.new_literal()).collect()
    }

    /// Create the propagator without running it.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = self.propagator_store.next_id();
        let context = PropagatorConstructorContext::new(
            propagator_id,
            &self.assignments,
            &mut self.notification_engine,
        );
        let propagator = constructor.create(context);

        PropagatorHandle::new(self.propagator_store.push(Box::new(propagator)))
    }

    pub(crate) fn propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> &P {
        self.propagator_store
            .get_propagator(handle)
            .expect("the propagator is still active")
    }

    pub(crate) fn value(&self, var: impl BooleanVariable) -> Option<bool> {
        var.value(&self.assignments)
    }

    /// Fix the literal without notifying any propagator.
    pub(crate) fn assign(&mut self, literal: Literal, value: bool) -> Result<(), EmptyDomain> {
        let _ = literal.assign(&mut self.assignments, value)?;
        Ok(())
    }

    /// Fix the literal and deliver the resulting event to the watching propagators.
    ///
    /// Returns whether `handle` asked to be enqueued.
    pub(crate) fn set_literal<P>(
        &mut self,
        handle: PropagatorHandle<P>,
        literal: Literal,
        value: bool,
    ) -> Result<EnqueueDecision, EmptyDomain> {
        let _ = literal.assign(&mut self.assignments, value)?;

        Ok(self.notify(handle))
    }

    /// Deliver all pending events, returning whether `handle` asked to be enqueued.
    pub(crate) fn notify<P>(&mut self, handle: PropagatorHandle<P>) -> EnqueueDecision {
        let mut propagator_queue = PropagatorQueue::default();
        let _ = self.notification_engine.notify_propagators_about_domain_events(
            &mut self.assignments,
            &mut self.propagator_store,
            &mut propagator_queue,
        );

        if propagator_queue.is_propagator_enqueued(handle.untyped()) {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    /// Run the propagator once.
    pub(crate) fn propagate<P>(&mut self, handle: PropagatorHandle<P>) -> PropagationStatusCP {
        let propagator_id = handle.untyped();
        let propagator = self
            .propagator_store
            .get_mut(propagator_id)
            .expect("the propagator is still active");

        propagator.propagate(PropagationContext::new(&mut self.assignments, propagator_id))
    }

    /// Take the propagator out of the store, as the engine does when it is subsumed.
    pub(crate) fn retire<P>(&mut self, handle: PropagatorHandle<P>) {
        self.propagator_store.retire(handle.untyped());
        self.notification_engine.remove_propagator(handle.untyped());
    }

    /// Replace the propagator by the one built from `constructor`, as the engine does when a
    /// propagator rewrites itself. The replacement is not run.
    pub(crate) fn rewrite<Old, New>(
        &mut self,
        handle: PropagatorHandle<Old>,
        constructor: Box<dyn DynPropagatorConstructor>,
    ) -> PropagatorHandle<New> {
        self.retire(handle);

        let context = PropagatorConstructorContext::new(
            self.propagator_store.next_id(),
            &self.assignments,
            &mut self.notification_engine,
        );
        let propagator = constructor.create_boxed(context);

        PropagatorHandle::new(self.propagator_store.push(propagator))
    }
}
