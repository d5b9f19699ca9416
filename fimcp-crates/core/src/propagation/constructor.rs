use std::fmt::Debug;

use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::NotificationEngine;
use crate::engine::variables::BooleanVariable;
use crate::engine::Assignments;
use crate::propagation::HasAssignments;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialized with values that come from the
/// current domains.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// An object-safe [`PropagatorConstructor`], used to hand a replacement propagator to the engine
/// through [`PropagatorStatus::Rewrite`](super::PropagatorStatus::Rewrite).
pub trait DynPropagatorConstructor: Debug {
    fn create_boxed(self: Box<Self>, context: PropagatorConstructorContext) -> Box<dyn Propagator>;
}

impl<Constructor> DynPropagatorConstructor for Constructor
where
    Constructor: PropagatorConstructor + Debug,
{
    fn create_boxed(self: Box<Self>, context: PropagatorConstructorContext) -> Box<dyn Propagator> {
        Box::new((*self).create(context))
    }
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to register to domain changes of variables and to read the current
/// values of variables.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    assignments: &'a Assignments,
    notification_engine: &'a mut NotificationEngine,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
        notification_engine: &'a mut NotificationEngine,
    ) -> Self {
        PropagatorConstructorContext {
            assignments,
            notification_engine,
            propagator_id,
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the propagator.
    /// The [`LocalId`] is internal information related to the propagator, which is used when
    /// calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be its index of the
    /// variable in the internal array of variables.
    pub fn register(
        &mut self,
        var: impl BooleanVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = self.notification_engine.watchers(propagator_var);
        var.watch_all(&mut watchers, domain_events.events());
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
