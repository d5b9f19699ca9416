use crate::basic_types::PropagatorConflict;
use crate::engine::variables::BooleanVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::propagation::PropagatorId;

/// Gives read access to the current assignments.
pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

/// Read the current values of variables.
///
/// Implemented for every context which has access to the assignments.
pub trait ReadDomains: HasAssignments {
    /// The value of `var`, or [`None`] while it is unassigned.
    fn value<Var: BooleanVariable>(&self, var: &Var) -> Option<bool> {
        var.value(self.assignments())
    }

    fn is_true<Var: BooleanVariable>(&self, var: &Var) -> bool {
        var.is_true(self.assignments())
    }

    fn is_false<Var: BooleanVariable>(&self, var: &Var) -> bool {
        var.is_false(self.assignments())
    }

    fn is_fixed<Var: BooleanVariable>(&self, var: &Var) -> bool {
        !var.is_unknown(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

/// Provided to the propagator when it is notified of a domain event.
///
/// The difference with [`PropagationContext`] is that it is not possible to fix variables in the
/// notify callback.
#[derive(Clone, Copy, Debug)]
pub struct NotificationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        NotificationContext { assignments }
    }
}

impl HasAssignments for NotificationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Provides information about the current domains to a propagator, and lets it fix variables
/// through [`PropagationContext::assign`].
#[derive(Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a mut Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments, propagator_id: PropagatorId) -> Self {
        PropagationContext {
            assignments,
            propagator_id,
        }
    }

    /// Fix `var` to `value`.
    ///
    /// Fixing a variable to the value it already has is a no-op; fixing it to the opposite value
    /// fails with [`EmptyDomain`].
    pub fn assign<Var: BooleanVariable>(
        &mut self,
        var: &Var,
        value: bool,
    ) -> Result<(), EmptyDomain> {
        let _ = var.assign(self.assignments, value)?;
        Ok(())
    }

    /// Creates the conflict to report when the propagator finds the current domains infeasible.
    pub fn create_conflict(&self) -> PropagatorConflict {
        PropagatorConflict {
            propagator: self.propagator_id,
        }
    }
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
