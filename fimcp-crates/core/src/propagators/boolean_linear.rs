use crate::basic_types::PropagationStatusCP;
use crate::constraints::Relation;
use crate::engine::variables::BooleanVariable;
use crate::engine::variables::Literal;
use crate::fimcp_assert_simple;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorStatus;
use crate::propagation::Priority;
use crate::propagation::ReadDomains;

/// Arguments to construct a [`BooleanLinearPropagator`], which enforces
/// `[reification_literal ->] sum(weights[i] * literals[i]) <relation> rhs`.
#[derive(Clone, Debug)]
pub struct BooleanLinearArgs<Var> {
    pub weights: Box<[i32]>,
    pub literals: Box<[Var]>,
    pub relation: Relation,
    pub rhs: i32,
    /// When present, the constraint only has to hold when this literal is true.
    pub reification_literal: Option<Literal>,
}

impl<Var: BooleanVariable> PropagatorConstructor for BooleanLinearArgs<Var> {
    type PropagatorImpl = BooleanLinearPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BooleanLinearArgs {
            weights,
            literals,
            relation,
            rhs,
            reification_literal,
        } = self;

        fimcp_assert_simple!(weights.len() == literals.len());

        for (index, literal) in literals.iter().enumerate() {
            context.register(
                literal.clone(),
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }

        if let Some(reification_literal) = reification_literal {
            context.register(
                reification_literal,
                DomainEvents::ASSIGN,
                LocalId::from(literals.len() as u32),
            );
        }

        let (relation, rhs) = relation.non_strict(i64::from(rhs));
        let relation = match relation {
            Relation::Equal => LinearRelation::Equal,
            Relation::NotEqual => LinearRelation::NotEqual,
            Relation::LessThanOrEqual | Relation::LessThan => LinearRelation::AtMost,
            Relation::GreaterThanOrEqual | Relation::GreaterThan => LinearRelation::AtLeast,
        };

        BooleanLinearPropagator {
            weights: weights.iter().map(|&weight| i64::from(weight)).collect(),
            literals,
            relation,
            rhs,
            reification_literal,
        }
    }
}

/// The non-strict relations the propagator reasons about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LinearRelation {
    Equal,
    NotEqual,
    AtMost,
    AtLeast,
}

/// Propagator for `[reification_literal ->] sum(weights[i] * literals[i]) <relation> rhs` with
/// arbitrary integer weights.
///
/// Every call recomputes the smallest and largest sum the literals can still reach. If the
/// relation cannot hold anymore the reification literal is fixed to false (or a conflict is
/// reported when there is none). If it is still undecided and the constraint has to hold, every
/// literal whose other value would make the relation unsatisfiable is fixed.
#[derive(Clone, Debug)]
pub struct BooleanLinearPropagator<Var> {
    weights: Box<[i64]>,
    literals: Box<[Var]>,
    relation: LinearRelation,
    rhs: i64,
    reification_literal: Option<Literal>,
}

/// The range of sums which can still be reached.
#[derive(Clone, Copy, Debug)]
struct SumBounds {
    lower: i64,
    upper: i64,
    /// The index of an unfixed term, if there is exactly one.
    single_unfixed: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Entailment {
    Entailed,
    Disentailed,
    Undecided,
}

impl<Var: BooleanVariable> BooleanLinearPropagator<Var> {
    fn bounds(&self, context: &PropagationContext) -> SumBounds {
        let mut lower = 0;
        let mut upper = 0;
        let mut num_unfixed = 0;
        let mut last_unfixed = 0;

        for (index, (&weight, literal)) in
            self.weights.iter().zip(self.literals.iter()).enumerate()
        {
            match context.value(literal) {
                Some(true) => {
                    lower += weight;
                    upper += weight;
                }
                Some(false) => {}
                None => {
                    lower += weight.min(0);
                    upper += weight.max(0);
                    num_unfixed += 1;
                    last_unfixed = index;
                }
            }
        }

        SumBounds {
            lower,
            upper,
            single_unfixed: (num_unfixed == 1).then_some(last_unfixed),
        }
    }

    fn entailment(&self, bounds: SumBounds) -> Entailment {
        let SumBounds { lower, upper, .. } = bounds;
        let rhs = self.rhs;

        let (entailed, disentailed) = match self.relation {
            LinearRelation::AtMost => (upper <= rhs, lower > rhs),
            LinearRelation::AtLeast => (lower >= rhs, upper < rhs),
            LinearRelation::Equal => (
                lower == rhs && upper == rhs,
                rhs < lower || rhs > upper,
            ),
            LinearRelation::NotEqual => (
                rhs < lower || rhs > upper,
                lower == rhs && upper == rhs,
            ),
        };

        if entailed {
            Entailment::Entailed
        } else if disentailed {
            Entailment::Disentailed
        } else {
            Entailment::Undecided
        }
    }

    /// Fix the terms whose other value would make the relation unsatisfiable.
    fn prune(&self, context: &mut PropagationContext, bounds: SumBounds) -> PropagationStatusCP {
        let enforce_at_most = matches!(
            self.relation,
            LinearRelation::AtMost | LinearRelation::Equal
        );
        let enforce_at_least = matches!(
            self.relation,
            LinearRelation::AtLeast | LinearRelation::Equal
        );

        if enforce_at_most || enforce_at_least {
            for (&weight, literal) in self.weights.iter().zip(self.literals.iter()) {
                if context.is_fixed(literal) {
                    continue;
                }

                // The lower bound assumes the term takes its smallest contribution; the other
                // value adds |weight|. Symmetrically for the upper bound.
                if enforce_at_most && bounds.lower + weight.abs() > self.rhs {
                    context.assign(literal, weight < 0)?;
                }
                if enforce_at_least && bounds.upper - weight.abs() < self.rhs {
                    context.assign(literal, weight > 0)?;
                }
            }
        }

        if self.relation == LinearRelation::NotEqual {
            // Only a single unfixed term can be forced away from the forbidden sum.
            if let Some(index) = bounds.single_unfixed {
                let weight = self.weights[index];
                let literal = &self.literals[index];
                let sum_if_false = bounds.lower - weight.min(0);

                if sum_if_false == self.rhs {
                    context.assign(literal, true)?;
                } else if sum_if_false + weight == self.rhs {
                    context.assign(literal, false)?;
                }
            }
        }

        Ok(PropagatorStatus::AtFixpoint)
    }
}

impl<Var: BooleanVariable> Propagator for BooleanLinearPropagator<Var> {
    fn name(&self) -> &str {
        "BooleanLinear"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        let reification_value = self
            .reification_literal
            .map(|reification_literal| context.value(&reification_literal));

        if reification_value == Some(Some(false)) {
            return Ok(PropagatorStatus::Subsumed);
        }

        let bounds = self.bounds(&context);

        match self.entailment(bounds) {
            Entailment::Entailed => Ok(PropagatorStatus::Subsumed),
            Entailment::Disentailed => match (self.reification_literal, reification_value) {
                (Some(reification_literal), Some(None)) => {
                    context.assign(&reification_literal, false)?;
                    Ok(PropagatorStatus::Subsumed)
                }
                _ => Err(context.create_conflict().into()),
            },
            // Nothing can be concluded about the literals before the implication is triggered.
            Entailment::Undecided if reification_value == Some(None) => {
                Ok(PropagatorStatus::AtFixpoint)
            }
            Entailment::Undecided => self.prune(&mut context, bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::test_solver::TestSolver;

    fn args(
        weights: &[i32],
        literals: &[Literal],
        relation: Relation,
        rhs: i32,
        reification_literal: Option<Literal>,
    ) -> BooleanLinearArgs<Literal> {
        BooleanLinearArgs {
            weights: weights.into(),
            literals: literals.into(),
            relation,
            rhs,
            reification_literal,
        }
    }

    #[test]
    fn heavy_terms_are_fixed_by_an_upper_bound() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(3);

        // 3 x0 + 2 x1 + x2 <= 2
        let propagator = solver.new_propagator(args(
            &[3, 2, 1],
            &x,
            Relation::LessThanOrEqual,
            2,
            None,
        ));

        let _ = solver.propagate(propagator).expect("no conflict");

        assert_eq!(solver.value(x[0]), Some(false));
        assert_eq!(solver.value(x[1]), None);
        assert_eq!(solver.value(x[2]), None);
    }

    #[test]
    fn negative_weights_are_fixed_to_true_by_a_lower_bound() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(2);

        // 2 x0 - 3 x1 >= 0
        let propagator = solver.new_propagator(args(
            &[2, -3],
            &x,
            Relation::GreaterThanOrEqual,
            0,
            None,
        ));

        let _ = solver.propagate(propagator).expect("no conflict");

        assert_eq!(solver.value(x[1]), Some(false));
        assert_eq!(solver.value(x[0]), None);
    }

    #[test]
    fn strict_relations_are_tightened() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(2);

        // x0 + x1 > 1
        let propagator =
            solver.new_propagator(args(&[1, 1], &x, Relation::GreaterThan, 1, None));

        let _ = solver.propagate(propagator).expect("no conflict");

        assert_eq!(solver.value(x[0]), Some(true));
        assert_eq!(solver.value(x[1]), Some(true));
    }

    #[test]
    fn a_disentailed_relation_fixes_the_reification_literal_to_false() {
        let mut solver = TestSolver::default();
        let b = solver.new_literal();
        let x = solver.new_literals(2);

        // b -> 2 x0 + 2 x1 == 5
        let propagator =
            solver.new_propagator(args(&[2, 2], &x, Relation::Equal, 5, Some(b)));

        let status = solver.propagate(propagator).expect("no conflict");

        assert!(matches!(status, PropagatorStatus::Subsumed));
        assert_eq!(solver.value(b), Some(false));
    }

    #[test]
    fn an_unreified_disentailed_relation_is_a_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(2);

        let propagator =
            solver.new_propagator(args(&[2, 2], &x, Relation::Equal, 5, None));

        let result = solver.propagate(propagator);
        assert!(matches!(result, Err(Inconsistency::Conflict(_))));
    }

    #[test]
    fn literals_are_untouched_while_the_reification_literal_is_unassigned() {
        let mut solver = TestSolver::default();
        let b = solver.new_literal();
        let x = solver.new_literals(2);

        let propagator = solver.new_propagator(args(
            &[5, 1],
            &x,
            Relation::LessThanOrEqual,
            1,
            Some(b),
        ));

        let status = solver.propagate(propagator).expect("no conflict");
        assert!(matches!(status, PropagatorStatus::AtFixpoint));
        assert_eq!(solver.value(x[0]), None);

        let _ = solver.set_literal(propagator, b, true).expect("unassigned");
        let _ = solver.propagate(propagator).expect("no conflict");
        assert_eq!(solver.value(x[0]), Some(false));
    }

    #[test]
    fn not_equal_forces_the_last_unfixed_term() {
        let mut solver = TestSolver::default();
        let x = solver.new_literals(3);

        // x0 + x1 + x2 != 2
        let propagator = solver.new_propagator(args(
            &[1, 1, 1],
            &x,
            Relation::NotEqual,
            2,
            None,
        ));

        let _ = solver.set_literal(propagator, x[0], true).expect("unassigned");
        let _ = solver.set_literal(propagator, x[1], true).expect("unassigned");
        let _ = solver.propagate(propagator).expect("no conflict");

        assert_eq!(solver.value(x[2]), Some(true));
    }

    #[test]
    fn a_false_reification_literal_subsumes_the_propagator() {
        let mut solver = TestSolver::default();
        let b = solver.new_literal();
        let x = solver.new_literals(2);

        let propagator =
            solver.new_propagator(args(&[2, 2], &x, Relation::Equal, 5, Some(b)));
        let _ = solver.set_literal(propagator, b, false).expect("unassigned");

        let status = solver.propagate(propagator).expect("no conflict");
        assert!(matches!(status, PropagatorStatus::Subsumed));
    }
}
