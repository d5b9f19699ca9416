use thiserror::Error;

#[cfg(doc)]
use crate::Inconsistency;

/// Errors which abort the construction of a constraint.
///
/// These indicate a malformed model and are never the result of propagation; a constraint which
/// is infeasible given the current domains fails the [`State`](crate::State) instead (see
/// [`Inconsistency`]).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("got {coefficients} coefficients for {literals} literals")]
    ArgumentSizeMismatch { coefficients: usize, literals: usize },
    #[error("the value {value} in {location} exceeds the supported integer range")]
    Overflow { value: i64, location: &'static str },
    #[error("{0} does not identify a relation")]
    UnknownRelation(i32),
}
