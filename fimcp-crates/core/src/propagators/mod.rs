//! Contains propagator implementations that are used by the constraints in
//! [`crate::constraints`].
//!
//! Every propagator is created through its `*Args` type, which implements
//! [`PropagatorConstructor`](crate::propagation::PropagatorConstructor), and can also be added to
//! a [`State`](crate::State) directly with [`State::add_propagator`](crate::State::add_propagator).
mod boolean_linear;
mod greater_or_equal;
mod implied_greater_or_equal;
mod unfixed_literals;

pub use boolean_linear::*;
pub use greater_or_equal::*;
pub use implied_greater_or_equal::*;
pub(crate) use unfixed_literals::UnfixedLiterals;

use crate::engine::variables::BooleanVariable;
use crate::engine::Assignments;

/// Drops the fixed literals from `literals`, returning how many of them were true.
pub(crate) fn remove_fixed_literals<Var: BooleanVariable>(
    assignments: &Assignments,
    literals: &mut Vec<Var>,
) -> i32 {
    let mut num_true = 0;

    literals.retain(|literal| match literal.value(assignments) {
        Some(true) => {
            num_true += 1;
            false
        }
        Some(false) => false,
        None => true,
    });

    num_true
}

/// Whether fewer than `threshold` literals are left, i.e. the threshold can no longer be reached.
pub(crate) fn fewer_than(num_literals: usize, threshold: i32) -> bool {
    usize::try_from(threshold).is_ok_and(|threshold| num_literals < threshold)
}

/// Whether at most `threshold` literals are left, i.e. every one of them is needed.
pub(crate) fn at_most(num_literals: usize, threshold: i32) -> bool {
    usize::try_from(threshold).is_ok_and(|threshold| num_literals <= threshold)
}
