use log::warn;

use super::Constraint;
use super::NegatableConstraint;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::State;

/// A structure which is responsible for adding the created [`Constraint`]s to the [`State`].
/// For an example on how to use this, see [`crate::constraints`].
#[derive(Debug)]
pub struct ConstraintPoster<'state, ConstraintImpl> {
    state: &'state mut State,
    constraint: Option<ConstraintImpl>,
}

impl<'a, ConstraintImpl> ConstraintPoster<'a, ConstraintImpl> {
    pub(crate) fn new(state: &'a mut State, constraint: ConstraintImpl) -> Self {
        ConstraintPoster {
            state,
            constraint: Some(constraint),
        }
    }
}

impl<ConstraintImpl: Constraint> ConstraintPoster<'_, ConstraintImpl> {
    /// Add the [`Constraint`] to the [`State`].
    ///
    /// This method returns a [`ConstraintOperationError`] if the [`Constraint`] is malformed.
    pub fn post(mut self) -> Result<(), ConstraintOperationError> {
        let Some(constraint) = self.constraint.take() else {
            return Ok(());
        };

        constraint.post(self.state)
    }

    /// Add the half-reified version of the [`Constraint`] to the [`State`]; i.e. post the
    /// constraint `r -> constraint` where `r` is a reification literal.
    ///
    /// This method returns a [`ConstraintOperationError`] if the [`Constraint`] is malformed.
    pub fn implied_by(
        mut self,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        let Some(constraint) = self.constraint.take() else {
            return Ok(());
        };

        constraint.implied_by(self.state, reification_literal)
    }
}

impl<ConstraintImpl: NegatableConstraint> ConstraintPoster<'_, ConstraintImpl> {
    /// Add the reified version of the [`Constraint`] to the [`State`]; i.e. post the constraint
    /// `r <-> constraint` where `r` is a reification literal.
    pub fn reify(mut self, reification_literal: Literal) -> Result<(), ConstraintOperationError> {
        let Some(constraint) = self.constraint.take() else {
            return Ok(());
        };

        constraint.reify(self.state, reification_literal)
    }
}

impl<ConstraintImpl> Drop for ConstraintPoster<'_, ConstraintImpl> {
    fn drop(&mut self) {
        if self.constraint.is_some() {
            warn!("A constraint poster is never used, this is likely a mistake.");
        }
    }
}
