mod assignments;
pub(crate) mod notifications;
mod propagator_queue;
mod state;
#[cfg(test)]
pub(crate) mod test_solver;
pub(crate) mod variables;

pub use assignments::*;
pub(crate) use propagator_queue::PropagatorQueue;
pub use state::*;
