//! # fimcp-core
//!
//! The propagation core used by constraint-based itemset mining models. The central piece is the
//! half-reified threshold sum `b -> (sum x_i >= c)` over Boolean literals, propagated
//! incrementally: every literal fixation only updates two counters, and once the control literal
//! is fixed the propagator either disappears or rewrites itself into the cheaper unconditional
//! `sum x_i >= c`.
//!
//! Constraints are posted into a [`State`], which owns the Boolean domains and the propagators:
//!
//! ```
//! use fimcp_core::constraints::imply_linear;
//! use fimcp_core::constraints::Relation;
//! use fimcp_core::State;
//!
//! let mut state = State::default();
//! let b = state.new_literal();
//! let x = [state.new_literal(), state.new_literal(), state.new_literal()];
//!
//! // b -> (x0 + x1 + x2 >= 2)
//! imply_linear(&mut state, b, &[1, 1, 1], &x, Relation::GreaterThanOrEqual, 2)
//!     .expect("a well-formed constraint");
//!
//! state.assign(x[0], false).expect("x0 is unassigned");
//! state.assign(x[1], false).expect("x1 is unassigned");
//! state.propagate_to_fixed_point().expect("no conflict");
//!
//! // At most one literal can still become true, so b cannot hold.
//! assert_eq!(state.literal_value(b), Some(false));
//! ```
pub(crate) mod basic_types;
pub mod constraints;
pub mod containers;
pub(crate) mod engine;
#[doc(hidden)]
pub mod fimcp_asserts;
pub(crate) mod math;
pub mod propagation;
pub mod propagators;
pub mod statistics;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagatorConflict;
pub use crate::engine::Assignments;
pub use crate::engine::EmptyDomain;
pub use crate::engine::State;
pub use crate::engine::StateOptions;
pub use crate::math::IntegerLimits;

pub mod variables {
    //! Variables are views onto the Boolean domains of a [`State`](crate::State).
    pub use crate::engine::variables::BooleanVariable;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::Literal;
}
