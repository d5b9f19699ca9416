use log::debug;

use super::normalised_linear::check_argument_sizes;
use super::normalised_linear::NormalisedLinear;
use super::Constraint;
use super::NegatableConstraint;
use super::Relation;
use crate::basic_types::Inconsistency;
use crate::propagators::post_greater_or_equal;
use crate::propagators::post_implied_greater_or_equal;
use crate::propagators::BooleanLinearArgs;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::State;

/// Creates the [`Constraint`] `sum(coefficients[i] * literals[i]) <relation> rhs`.
pub fn boolean_linear(
    coefficients: impl Into<Box<[i32]>>,
    literals: impl Into<Box<[Literal]>>,
    relation: Relation,
    rhs: i32,
) -> BooleanLinear {
    BooleanLinear {
        coefficients: coefficients.into(),
        literals: literals.into(),
        relation,
        rhs,
    }
}

/// See [`boolean_linear`].
#[derive(Clone, Debug)]
pub struct BooleanLinear {
    coefficients: Box<[i32]>,
    literals: Box<[Literal]>,
    relation: Relation,
    rhs: i32,
}

impl Constraint for BooleanLinear {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        linear(
            state,
            &self.coefficients,
            &self.literals,
            self.relation,
            self.rhs,
        )
    }

    fn implied_by(
        self,
        state: &mut State,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        imply_linear(
            state,
            reification_literal,
            &self.coefficients,
            &self.literals,
            self.relation,
            self.rhs,
        )
    }
}

impl NegatableConstraint for BooleanLinear {
    type NegatedConstraint = BooleanLinear;

    fn negation(&self) -> Self::NegatedConstraint {
        BooleanLinear {
            relation: self.relation.negation(),
            ..self.clone()
        }
    }
}

/// Posts `reification_literal -> sum(coefficients[i] * literals[i]) <relation> rhs`.
///
/// The sum is normalised first: fixed literals are moved into the right-hand side, duplicate
/// literals are merged and strict relations are made non-strict. When all remaining
/// coefficients are 1 or -1 and the relation is `>=`, `<=` or `==`, the constraint is enforced by
/// incremental threshold propagators
/// ([`ImpliedGreaterOrEqualPropagator`](crate::propagators::ImpliedGreaterOrEqualPropagator));
/// otherwise a [`BooleanLinearPropagator`](crate::propagators::BooleanLinearPropagator) is used.
///
/// A false `reification_literal` makes the constraint vacuous and a true one posts it
/// unconditionally (see [`linear`]). When the relation cannot hold at all, the reification literal
/// is fixed to false. Nothing is posted on a failed [`State`].
///
/// # Errors
/// - [`ConstraintOperationError::ArgumentSizeMismatch`] when the number of coefficients and
///   literals differ.
/// - [`ConstraintOperationError::Overflow`] when `rhs`, the right-hand side after fixed literals
///   are removed, or the bounds of the remaining sum lie outside the
///   [`IntegerLimits`](crate::IntegerLimits) of the state.
pub fn imply_linear(
    state: &mut State,
    reification_literal: Literal,
    coefficients: &[i32],
    literals: &[Literal],
    relation: Relation,
    rhs: i32,
) -> Result<(), ConstraintOperationError> {
    const LOCATION: &str = "imply_linear";

    check_argument_sizes(coefficients, literals)?;

    if state.is_failed() {
        return Ok(());
    }

    match state.literal_value(reification_literal) {
        Some(false) => {
            debug!("{reification_literal} is false, the implied linear is vacuous");
            return Ok(());
        }
        Some(true) => {
            return linear(state, coefficients, literals, relation, rhs);
        }
        None => {}
    }

    let limits = state.integer_limits();
    let normalised = NormalisedLinear::new(
        state.assignments(),
        coefficients,
        literals,
        relation,
        rhs,
        limits,
        LOCATION,
    )?;

    if normalised.is_empty() {
        if !normalised.holds_without_terms() {
            debug!("{normalised} does not hold, fixing {reification_literal} to false");
            state.fix_at_post(&reification_literal, false);
        }
        return Ok(());
    }

    normalised.check_bounds(limits, LOCATION)?;

    let has_unit_weights = normalised.has_unit_weights();
    match normalised.relation() {
        Relation::GreaterThanOrEqual if has_unit_weights => {
            debug!("{reification_literal} -> {normalised}: at least");
            let (literals, threshold) = normalised.at_least(limits, LOCATION)?;
            post_implied_greater_or_equal(state, reification_literal, literals, threshold);
        }
        Relation::LessThanOrEqual if has_unit_weights => {
            debug!("{reification_literal} -> {normalised}: at most");
            let (literals, threshold) = normalised.at_most(limits, LOCATION)?;
            post_implied_greater_or_equal(state, reification_literal, literals, threshold);
        }
        Relation::Equal if has_unit_weights => {
            debug!("{reification_literal} -> {normalised}: at least and at most");
            let (lower_literals, lower_threshold) = normalised.at_least(limits, LOCATION)?;
            let (upper_literals, upper_threshold) = normalised.at_most(limits, LOCATION)?;
            post_implied_greater_or_equal(
                state,
                reification_literal,
                lower_literals,
                lower_threshold,
            );
            post_implied_greater_or_equal(
                state,
                reification_literal,
                upper_literals,
                upper_threshold,
            );
        }
        relation => {
            debug!("{reification_literal} -> {normalised}: generic");
            let (weights, literals, rhs) = normalised.weighted(limits, LOCATION)?;
            let _ = state.add_propagator(BooleanLinearArgs {
                weights,
                literals,
                relation,
                rhs,
                reification_literal: Some(reification_literal),
            });
        }
    }

    Ok(())
}

/// Posts `sum(coefficients[i] * literals[i]) <relation> rhs`.
///
/// The sum is normalised as in [`imply_linear`], and unit coefficients are enforced by
/// [`GreaterOrEqualPropagator`](crate::propagators::GreaterOrEqualPropagator)s. A constraint
/// which cannot be satisfied fails the [`State`].
///
/// # Errors
/// The same as [`imply_linear`].
pub fn linear(
    state: &mut State,
    coefficients: &[i32],
    literals: &[Literal],
    relation: Relation,
    rhs: i32,
) -> Result<(), ConstraintOperationError> {
    const LOCATION: &str = "linear";

    check_argument_sizes(coefficients, literals)?;

    if state.is_failed() {
        return Ok(());
    }

    let limits = state.integer_limits();
    let normalised = NormalisedLinear::new(
        state.assignments(),
        coefficients,
        literals,
        relation,
        rhs,
        limits,
        LOCATION,
    )?;

    if normalised.is_empty() {
        if !normalised.holds_without_terms() {
            debug!("{normalised} does not hold, failing the state");
            state.fail_at_post(Inconsistency::InfeasibleConstraint);
        }
        return Ok(());
    }

    normalised.check_bounds(limits, LOCATION)?;

    let has_unit_weights = normalised.has_unit_weights();
    match normalised.relation() {
        Relation::GreaterThanOrEqual if has_unit_weights => {
            debug!("{normalised}: at least");
            let (literals, threshold) = normalised.at_least(limits, LOCATION)?;
            post_greater_or_equal(state, literals, threshold);
        }
        Relation::LessThanOrEqual if has_unit_weights => {
            debug!("{normalised}: at most");
            let (literals, threshold) = normalised.at_most(limits, LOCATION)?;
            post_greater_or_equal(state, literals, threshold);
        }
        Relation::Equal if has_unit_weights => {
            debug!("{normalised}: at least and at most");
            let (lower_literals, lower_threshold) = normalised.at_least(limits, LOCATION)?;
            let (upper_literals, upper_threshold) = normalised.at_most(limits, LOCATION)?;
            post_greater_or_equal(state, lower_literals, lower_threshold);
            post_greater_or_equal(state, upper_literals, upper_threshold);
        }
        relation => {
            debug!("{normalised}: generic");
            let (weights, literals, rhs) = normalised.weighted(limits, LOCATION)?;
            let _ = state.add_propagator(BooleanLinearArgs {
                weights,
                literals,
                relation,
                rhs,
                reification_literal: None,
            });
        }
    }

    Ok(())
}

/// Posts `reification_literal <-> sum(coefficients[i] * literals[i]) <relation> rhs`, as the
/// two implications with `relation` and with its negation.
///
/// # Errors
/// The same as [`imply_linear`].
pub fn reify_linear(
    state: &mut State,
    reification_literal: Literal,
    coefficients: &[i32],
    literals: &[Literal],
    relation: Relation,
    rhs: i32,
) -> Result<(), ConstraintOperationError> {
    boolean_linear(coefficients, literals, relation, rhs).reify(state, reification_literal)
}
