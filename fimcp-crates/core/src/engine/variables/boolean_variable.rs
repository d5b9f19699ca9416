use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// A trait specifying the required behaviour of a Boolean variable such as retrieving its
/// tri-state value and fixing it.
pub trait BooleanVariable: Clone + Debug + 'static {
    /// Returns the value of the variable, or [`None`] when it is not yet fixed.
    fn value(&self, assignments: &Assignments) -> Option<bool>;

    fn is_true(&self, assignments: &Assignments) -> bool {
        self.value(assignments) == Some(true)
    }

    fn is_false(&self, assignments: &Assignments) -> bool {
        self.value(assignments) == Some(false)
    }

    fn is_unknown(&self, assignments: &Assignments) -> bool {
        self.value(assignments).is_none()
    }

    /// Fix the variable to `value`.
    ///
    /// Returns whether the underlying domain changed; fixing it to the value it already has is a
    /// no-op, fixing it to the opposite value results in [`EmptyDomain`].
    fn assign(&self, assignments: &mut Assignments, value: bool) -> Result<bool, EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<BooleanDomainEvent>);

    /// Decode a domain event for this variable.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> BooleanDomainEvent;
}
