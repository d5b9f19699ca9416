//! Contains the main building blocks for propagators.
//!
//! # Background
//!
//! A propagator takes as input a set of 0-1 variables together with their current (tri-state)
//! values and fixes those variables whose value is implied by its constraint, or reports that
//! the constraint can no longer be satisfied. A propagator is at fix-point if running it again
//! would not fix any further variable.
//!
//! # Practical
//!
//! Each concrete propagator implements [`Propagator`] and is created by a
//! [`PropagatorConstructor`]. The constructor registers the propagator for the
//! [`DomainEvents`] of its variables through the [`PropagatorConstructorContext`] and sets up the
//! initial state of the propagator.
//!
//! The engine delivers every domain event to the subscribed propagators through
//! [`Propagator::notify`] before any of them runs again, so a propagator can maintain counters
//! incrementally and only ask to be enqueued when its conclusion may have changed. When it runs,
//! [`Propagator::propagate`] reports through [`PropagatorStatus`] whether it stays active, can be
//! discarded, or should be replaced by a cheaper propagator.
//!
//! Propagators are cloned together with the [`State`](crate::State) they live in; a clone is
//! an independent copy which can be used to explore a sibling search branch.

mod constructor;
mod contexts;
mod local_id;
mod propagator;

pub(crate) mod propagator_id;
pub(crate) mod store;

pub use constructor::*;
pub use contexts::*;
pub use local_id::*;
pub use propagator::*;
pub use propagator_id::PropagatorHandle;
pub use propagator_id::PropagatorId;
pub(crate) use propagator_id::PropagatorVarId;

pub use crate::basic_types::PropagationStatusCP;
pub use crate::engine::notifications::BooleanDomainEvent;
pub use crate::engine::notifications::DomainEvents;
pub use crate::engine::notifications::OpaqueDomainEvent;
pub use crate::engine::notifications::Watchers;
