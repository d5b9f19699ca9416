use std::fmt::Debug;

use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::DynPropagatorConstructor;
use super::LocalId;
use super::NotificationContext;
use super::PropagationContext;
use crate::basic_types::PropagationStatusCP;
use crate::engine::notifications::OpaqueDomainEvent;
#[cfg(doc)]
use crate::propagation::PropagatorConstructor;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;

// We need to use this to cast from `Box<dyn Propagator>` to the concrete propagator in tests and
// through `State::get_propagator`.
impl_downcast!(Propagator);

// A cloned `State` carries its own copy of every propagator.
clone_trait_object!(Propagator);

/// A propagator fixes variables whose value is implied by its constraint, or reports that the
/// constraint cannot be satisfied.
///
/// The only required functions are [`Propagator::name`] and [`Propagator::propagate`]; by
/// default a propagator is enqueued for every event it is subscribed to.
///
/// See the [`crate::propagation`] documentation for more details.
pub trait Propagator: Downcast + DynClone + Debug {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Fixes the variables whose value follows from the current domains, using
    /// [`PropagationContext::assign`].
    ///
    /// In case no inconsistency has been detected this function returns [`Result::Ok`] with a
    /// [`PropagatorStatus`] describing what should happen to the propagator next. Otherwise it
    /// returns an [`Inconsistency`](crate::Inconsistency); either because an assignment emptied
    /// a domain, or because the propagator found the current domains to be infeasible.
    ///
    /// Failed assignments are not retried; the store is considered failed afterwards.
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatusCP;

    /// Returns whether the propagator should be enqueued for propagation when a domain event
    /// happens to one of the variables the propagator is subscribed to (as registered during
    /// creation with [`PropagatorConstructor`] using [`PropagatorConstructorContext::register`]).
    ///
    /// This is called exactly once for every subscribed event which changed a domain, and all
    /// events of a round are delivered before the propagator runs. It can be used to
    /// incrementally maintain data structures, and should only be used for computationally cheap
    /// logic.
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called.
    ///
    /// By default the priority is set to [`Priority::VeryLow`].
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued; its conclusion may have changed.
    Enqueue,
    /// The propagator is still at fix-point.
    Skip,
}

/// What the engine should do with a propagator after it has propagated successfully.
#[derive(Debug)]
pub enum PropagatorStatus {
    /// Running the propagator again would not change any domain.
    AtFixpoint,
    /// The constraint is resolved given the current domains. The propagator is retired and is
    /// never notified or run again.
    Subsumed,
    /// The propagator is retired and replaced by the propagator built from the given
    /// constructor, which takes over the remaining work.
    Rewrite(Box<dyn DynPropagatorConstructor>),
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called.
///
/// Propagators with high priority are propagated before propagators with low(er) priority. If two
/// propagators have the same priority, then they are propagated in the order they were enqueued.
///
/// Typically, propagators with low computational complexity should be assigned a high
/// priority.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        ((*self) as u8).partial_cmp(&((*other) as u8))
    }
}
