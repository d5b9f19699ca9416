use log::trace;

use super::at_most;
use super::fewer_than;
use super::remove_fixed_literals;
use super::UnfixedLiterals;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::variables::BooleanVariable;
use crate::fimcp_assert_advanced;
use crate::propagation::DomainEvents;
use crate::propagation::EnqueueDecision;
use crate::propagation::HasAssignments;
use crate::propagation::LocalId;
use crate::propagation::NotificationContext;
use crate::propagation::OpaqueDomainEvent;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorStatus;
use crate::propagation::Priority;
use crate::propagation::ReadDomains;
use crate::State;

/// Arguments to construct a [`GreaterOrEqualPropagator`], which enforces that at least
/// `threshold` of `literals` are true.
#[derive(Clone, Debug)]
pub struct GreaterOrEqualArgs<Var> {
    pub literals: Box<[Var]>,
    pub threshold: i32,
}

impl<Var: BooleanVariable> PropagatorConstructor for GreaterOrEqualArgs<Var> {
    type PropagatorImpl = GreaterOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let GreaterOrEqualArgs {
            literals,
            threshold,
        } = self;

        // Literals may have been fixed since the arguments were put together, e.g. when a
        // half-reified propagator hands over its remaining literals.
        let mut literals = literals.into_vec();
        let num_true = remove_fixed_literals(context.assignments(), &mut literals);

        for (index, literal) in literals.iter().enumerate() {
            context.register(
                literal.clone(),
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }

        GreaterOrEqualPropagator {
            literals: UnfixedLiterals::new(literals),
            threshold: threshold.saturating_sub(num_true),
        }
    }
}

/// Propagator for `sum(literals) >= threshold`.
///
/// Only the number of unfixed literals and the number of literals which still have to become
/// true are tracked. Once both are equal every unfixed literal has to become true.
#[derive(Clone, Debug)]
pub struct GreaterOrEqualPropagator<Var> {
    literals: UnfixedLiterals<Var>,
    /// The number of unfixed literals which still have to become true.
    threshold: i32,
}

impl<Var> GreaterOrEqualPropagator<Var> {
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn num_unfixed(&self) -> usize {
        self.literals.len()
    }

    /// Whether the propagator has something to do: the constraint is entailed, or all unfixed
    /// literals are needed to reach the threshold.
    fn is_tight(&self) -> bool {
        self.threshold <= 0 || at_most(self.literals.len(), self.threshold)
    }
}

impl<Var: BooleanVariable> Propagator for GreaterOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "GreaterOrEqual"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn notify(
        &mut self,
        _context: NotificationContext,
        local_id: LocalId,
        event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        let Some(literal) = self.literals.remove(local_id) else {
            return EnqueueDecision::Skip;
        };

        if literal.unpack_event(event) == BooleanDomainEvent::AssignedTrue {
            self.threshold = self.threshold.saturating_sub(1);
        }

        if self.is_tight() {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        fimcp_assert_advanced!(self
            .literals
            .iter()
            .all(|literal| !context.is_fixed(literal)));

        if self.threshold <= 0 {
            return Ok(PropagatorStatus::Subsumed);
        }

        if fewer_than(self.literals.len(), self.threshold) {
            return Err(context.create_conflict().into());
        }

        if at_most(self.literals.len(), self.threshold) {
            for literal in self.literals.iter() {
                context.assign(literal, true)?;
            }

            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::AtFixpoint)
    }
}

/// Posts `sum(literals) >= threshold`.
///
/// Trivial cases are resolved without creating a propagator: when the threshold is already met
/// nothing is posted, when it cannot be met the state fails, and when every literal is needed
/// they are all fixed to true.
pub(crate) fn post_greater_or_equal<Var: BooleanVariable>(
    state: &mut State,
    mut literals: Vec<Var>,
    threshold: i32,
) {
    if state.is_failed() {
        return;
    }

    let threshold =
        threshold.saturating_sub(remove_fixed_literals(state.assignments(), &mut literals));

    if threshold <= 0 {
        trace!("sum >= {threshold} over {} literals is entailed", literals.len());
        return;
    }

    if fewer_than(literals.len(), threshold) {
        trace!("sum >= {threshold} over {} literals is infeasible", literals.len());
        state.fail_at_post(Inconsistency::InfeasibleConstraint);
        return;
    }

    if at_most(literals.len(), threshold) {
        for literal in &literals {
            state.fix_at_post(literal, true);
        }
        return;
    }

    let _ = state.add_propagator(GreaterOrEqualArgs {
        literals: literals.into(),
        threshold,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn forces_the_remaining_literals_when_they_are_all_needed() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(3);

        let propagator = solver.new_propagator(GreaterOrEqualArgs {
            literals: x.clone().into(),
            threshold: 1,
        });

        let _ = solver.set_literal(propagator, x[0], false).expect("unassigned");
        let decision = solver.set_literal(propagator, x[1], false).expect("unassigned");
        assert_eq!(decision, EnqueueDecision::Enqueue);

        let status = solver.propagate(propagator).expect("no conflict");
        assert!(matches!(status, PropagatorStatus::Subsumed));
        assert_eq!(solver.value(x[2]), Some(true));
    }

    #[test]
    fn is_not_enqueued_while_there_is_slack() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(4);

        let propagator = solver.new_propagator(GreaterOrEqualArgs {
            literals: x.clone().into(),
            threshold: 2,
        });

        let decision = solver.set_literal(propagator, x[0], false).expect("unassigned");
        assert_eq!(decision, EnqueueDecision::Skip);

        let status = solver.propagate(propagator).expect("no conflict");
        assert!(matches!(status, PropagatorStatus::AtFixpoint));
        assert_eq!(solver.propagator(propagator).num_unfixed(), 3);
        assert_eq!(solver.propagator(propagator).threshold(), 2);
    }

    #[test]
    fn reports_a_conflict_when_the_threshold_cannot_be_reached() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(3);

        let propagator = solver.new_propagator(GreaterOrEqualArgs {
            literals: x.clone().into(),
            threshold: 2,
        });

        let _ = solver.set_literal(propagator, x[0], false).expect("unassigned");
        let _ = solver.set_literal(propagator, x[1], false).expect("unassigned");

        let result = solver.propagate(propagator);
        assert!(matches!(result, Err(Inconsistency::Conflict(_))));
    }

    #[test]
    fn is_subsumed_once_enough_literals_are_true() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(3);

        let propagator = solver.new_propagator(GreaterOrEqualArgs {
            literals: x.clone().into(),
            threshold: 1,
        });

        let decision = solver.set_literal(propagator, x[1], true).expect("unassigned");
        assert_eq!(decision, EnqueueDecision::Enqueue);

        let status = solver.propagate(propagator).expect("no conflict");
        assert!(matches!(status, PropagatorStatus::Subsumed));
        assert_eq!(solver.value(x[0]), None);
        assert_eq!(solver.value(x[2]), None);
    }

    #[test]
    fn fixed_literals_are_removed_at_creation() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(4);
        solver.assign(x[0], true).expect("unassigned");
        solver.assign(x[1], false).expect("unassigned");

        let propagator = solver.new_propagator(GreaterOrEqualArgs {
            literals: x.clone().into(),
            threshold: 3,
        });

        assert_eq!(solver.propagator(propagator).num_unfixed(), 2);
        assert_eq!(solver.propagator(propagator).threshold(), 2);

        let _ = solver.propagate(propagator).expect("no conflict");
        assert_eq!(solver.value(x[2]), Some(true));
        assert_eq!(solver.value(x[3]), Some(true));
    }

    #[test]
    fn posting_with_exactly_enough_literals_fixes_them() {
        let mut state = State::default();
        let x = [state.new_literal(), state.new_literal()];

        post_greater_or_equal(&mut state, x.to_vec(), 2);

        assert_eq!(state.num_active_propagators(), 0);
        assert_eq!(state.literal_value(x[0]), Some(true));
        assert_eq!(state.literal_value(x[1]), Some(true));
    }

    #[test]
    fn posting_an_unreachable_threshold_fails_the_state() {
        let mut state = State::default();
        let x = [state.new_literal(), state.new_literal()];

        post_greater_or_equal(&mut state, x.to_vec(), 3);

        assert_eq!(state.failure(), Some(Inconsistency::InfeasibleConstraint));
    }

    #[test]
    fn extreme_thresholds_do_not_overflow() {
        let mut state = State::default();
        let x = [state.new_literal(), state.new_literal()];

        let _ = state.add_propagator(GreaterOrEqualArgs {
            literals: x.into(),
            threshold: i32::MAX,
        });
        state.assign(x[0], false).expect("unassigned");

        assert!(matches!(
            state.propagate_to_fixed_point(),
            Err(Inconsistency::Conflict(_))
        ));

        let mut state = State::default();
        let y = [state.new_literal(), state.new_literal()];

        let handle = state.add_propagator(GreaterOrEqualArgs {
            literals: y.into(),
            threshold: i32::MIN,
        });
        state.assign(y[0], true).expect("unassigned");

        state.propagate_to_fixed_point().expect("no conflict");
        assert!(state.get_propagator(handle).is_none());
    }
}
