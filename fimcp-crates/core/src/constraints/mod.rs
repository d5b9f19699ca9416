//! Defines the constraints which can be posted into a [`State`].
//!
//! A constraint is a relation over literals. In the state, constraints are enforced through
//! propagators, and posting a constraint normalises it and selects the cheapest propagator which
//! enforces it. Constraints which are decided while they are posted create no propagator at all.
//!
//! # Example
//! ```
//! # use fimcp_core::constraints;
//! # use fimcp_core::constraints::Relation;
//! # use fimcp_core::State;
//! let mut state = State::default();
//!
//! let b = state.new_literal();
//! let x = [state.new_literal(), state.new_literal()];
//!
//! // b <-> (x0 + x1 >= 1)
//! state
//!     .add_constraint(constraints::boolean_linear(
//!         [1, 1],
//!         x,
//!         Relation::GreaterThanOrEqual,
//!         1,
//!     ))
//!     .reify(b)
//!     .expect("a well-formed constraint");
//!
//! state.assign(!b, true).expect("b is unassigned");
//! state.propagate_to_fixed_point().expect("no conflict");
//!
//! assert_eq!(state.literal_value(x[0]), Some(false));
//! assert_eq!(state.literal_value(x[1]), Some(false));
//! ```

mod constraint_poster;
mod linear;
mod normalised_linear;
mod relation;

pub use constraint_poster::*;
pub use linear::*;
pub use relation::Relation;

use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::State;

/// A [`Constraint`] is a relation over literals. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`State`].
    ///
    /// This method returns a [`ConstraintOperationError`] if the [`Constraint`] is malformed. A
    /// constraint which cannot be satisfied fails the [`State`] instead.
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError>;

    /// Add the half-reified version of the [`Constraint`] to the [`State`]; i.e. post the
    /// constraint `r -> constraint` where `r` is a reification literal.
    ///
    /// This method returns a [`ConstraintOperationError`] if the [`Constraint`] is malformed.
    fn implied_by(
        self,
        state: &mut State,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError>;
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(state))
    }

    fn implied_by(
        self,
        state: &mut State,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        self.into_iter()
            .try_for_each(|c| c.implied_by(state, reification_literal))
    }
}

/// A [`Constraint`] which has a well-defined negation.
///
/// Having a negation means the [`Constraint`] can be fully reified; i.e., a constraint `C` can be
/// turned into `r <-> C` where `r` is a reification literal.
pub trait NegatableConstraint: Constraint {
    type NegatedConstraint: NegatableConstraint + 'static;

    fn negation(&self) -> Self::NegatedConstraint;

    /// Add the reified version of the [`Constraint`] to the [`State`]; i.e. post the constraint
    /// `r <-> constraint` where `r` is a reification literal.
    fn reify(
        self,
        state: &mut State,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError>
    where
        Self: Sized,
    {
        let negation = self.negation();

        self.implied_by(state, reification_literal)?;
        negation.implied_by(state, !reification_literal)
    }
}
