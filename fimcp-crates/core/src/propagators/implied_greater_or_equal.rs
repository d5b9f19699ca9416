use log::trace;

use super::fewer_than;
use super::post_greater_or_equal;
use super::remove_fixed_literals;
use super::GreaterOrEqualArgs;
use super::UnfixedLiterals;
use crate::basic_types::PropagationStatusCP;
use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::variables::BooleanVariable;
use crate::engine::variables::Literal;
use crate::fimcp_assert_advanced;
use crate::fimcp_assert_eq_simple;
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

/// Arguments to construct an [`ImpliedGreaterOrEqualPropagator`], which enforces
/// `reification_literal -> sum(literals) >= threshold`.
#[derive(Clone, Debug)]
pub struct ImpliedGreaterOrEqualArgs<Var> {
    pub reification_literal: Literal,
    pub literals: Box<[Var]>,
    pub threshold: i32,
}

impl<Var: BooleanVariable> PropagatorConstructor for ImpliedGreaterOrEqualArgs<Var> {
    type PropagatorImpl = ImpliedGreaterOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let ImpliedGreaterOrEqualArgs {
            reification_literal,
            literals,
            threshold,
        } = self;

        let mut literals = literals.into_vec();
        let num_true = remove_fixed_literals(context.assignments(), &mut literals);

        for (index, literal) in literals.iter().enumerate() {
            context.register(
                literal.clone(),
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }

        let reification_id = LocalId::from(literals.len() as u32);
        context.register(reification_literal, DomainEvents::ASSIGN, reification_id);

        ImpliedGreaterOrEqualPropagator {
            reification_literal,
            reification_id,
            num_unfixed: literals.len(),
            literals: UnfixedLiterals::new(literals),
            threshold: threshold.saturating_sub(num_true),
        }
    }
}

/// Propagator for `reification_literal -> sum(literals) >= threshold`.
///
/// Every fixed literal only updates two counters: the number of unfixed literals and the number
/// of them which still have to become true. The propagator is only enqueued once the threshold
/// is reached or can no longer be reached, or when the reification literal is fixed.
///
/// When it runs with the reification literal
/// - unassigned and the threshold out of reach, the reification literal is fixed to false;
/// - unassigned and the threshold reached, nothing follows for the reification literal;
/// - true, the propagator rewrites itself into a [`GreaterOrEqualPropagator`] over the remaining
///   literals;
/// - false, the implication holds whatever the literals become.
///
/// In all of these cases the propagator is done afterwards.
///
/// [`GreaterOrEqualPropagator`]: super::GreaterOrEqualPropagator
#[derive(Clone, Debug)]
pub struct ImpliedGreaterOrEqualPropagator<Var> {
    reification_literal: Literal,
    reification_id: LocalId,
    literals: UnfixedLiterals<Var>,
    /// The number of unfixed literals which still have to become true.
    threshold: i32,
    /// The number of unfixed literals, always equal to the size of `literals`.
    num_unfixed: usize,
}

impl<Var> ImpliedGreaterOrEqualPropagator<Var> {
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn num_unfixed(&self) -> usize {
        self.num_unfixed
    }

    fn is_unreachable(&self) -> bool {
        fewer_than(self.num_unfixed, self.threshold)
    }

    fn is_reached(&self) -> bool {
        self.threshold <= 0
    }
}

impl<Var: BooleanVariable> Propagator for ImpliedGreaterOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "ImpliedGreaterOrEqual"
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
        if local_id == self.reification_id {
            return EnqueueDecision::Enqueue;
        }

        let Some(literal) = self.literals.remove(local_id) else {
            return EnqueueDecision::Skip;
        };

        if literal.unpack_event(event) == BooleanDomainEvent::AssignedTrue {
            self.threshold = self.threshold.saturating_sub(1);
        }
        self.num_unfixed -= 1;

        fimcp_assert_eq_simple!(self.num_unfixed, self.literals.len());

        if self.is_unreachable() || self.is_reached() {
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

        match context.value(&self.reification_literal) {
            None if self.is_unreachable() => {
                context.assign(&self.reification_literal, false)?;
                Ok(PropagatorStatus::Subsumed)
            }
            // The threshold is met whatever happens, and nothing follows for the reification
            // literal from a half-reified constraint.
            None if self.is_reached() => Ok(PropagatorStatus::Subsumed),
            None => Ok(PropagatorStatus::AtFixpoint),
            Some(true) if self.is_reached() => Ok(PropagatorStatus::Subsumed),
            Some(true) => {
                let literals = self.literals.take();
                self.num_unfixed = 0;

                Ok(PropagatorStatus::Rewrite(Box::new(GreaterOrEqualArgs {
                    literals: literals.into(),
                    threshold: self.threshold,
                })))
            }
            Some(false) => Ok(PropagatorStatus::Subsumed),
        }
    }
}

/// Posts `reification_literal -> sum(literals) >= threshold`.
///
/// A fixed reification literal either makes the implication vacuous or turns it into
/// `sum(literals) >= threshold`. Otherwise fixed literals are eliminated first. When the
/// remaining literals cannot reach the threshold the reification literal is fixed to false, and
/// when the threshold is already met nothing is posted. Only otherwise a propagator is created.
pub(crate) fn post_implied_greater_or_equal<Var: BooleanVariable>(
    state: &mut State,
    reification_literal: Literal,
    mut literals: Vec<Var>,
    threshold: i32,
) {
    if state.is_failed() {
        return;
    }

    match state.literal_value(reification_literal) {
        Some(false) => return,
        Some(true) => {
            post_greater_or_equal(state, literals, threshold);
            return;
        }
        None => {}
    }

    let threshold =
        threshold.saturating_sub(remove_fixed_literals(state.assignments(), &mut literals));

    if fewer_than(literals.len(), threshold) {
        trace!(
            "{} literals cannot reach {threshold}, fixing {reification_literal} to false",
            literals.len()
        );
        state.fix_at_post(&reification_literal, false);
        return;
    }

    if threshold <= 0 {
        trace!("sum >= {threshold} implied by {reification_literal} is entailed");
        return;
    }

    let _ = state.add_propagator(ImpliedGreaterOrEqualArgs {
        reification_literal,
        literals: literals.into(),
        threshold,
    });
}
