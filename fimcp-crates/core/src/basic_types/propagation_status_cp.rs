use crate::engine::EmptyDomain;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorStatus;

/// The result of invoking a propagator. Propagation either succeeds with a [`PropagatorStatus`]
/// telling the engine what to do with the propagator next, or it identifies a failure of the
/// current store.
pub type PropagationStatusCP = Result<PropagatorStatus, Inconsistency>;

/// A store-level failure: the current domains admit no solution.
///
/// This is the normal way in which propagation prunes a search branch and is deliberately kept
/// apart from [`ConstraintOperationError`](crate::ConstraintOperationError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// An assignment contradicted the value a domain was already fixed to.
    EmptyDomain,
    /// A propagator found the current domains infeasible without making an assignment.
    Conflict(PropagatorConflict),
    /// A constraint was found to be infeasible while it was posted.
    InfeasibleConstraint,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The propagator which identified the conflict.
    pub propagator: PropagatorId,
}
