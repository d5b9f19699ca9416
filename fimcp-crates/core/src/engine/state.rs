use log::trace;

use crate::basic_types::Inconsistency;
use crate::constraints::ConstraintPoster;
use crate::create_statistics_struct;
use crate::engine::notifications::NotificationEngine;
use crate::engine::variables::BooleanVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::engine::PropagatorQueue;
use crate::fimcp_assert_simple;
use crate::math::IntegerLimits;
use crate::propagation::store::PropagatorStore;
use crate::propagation::DynPropagatorConstructor;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorStatus;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The options with which a [`State`] is created.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateOptions {
    /// The range which the constants of posted constraints must stay within.
    pub integer_limits: IntegerLimits,
}

/// The [`State`] is the container of the Boolean domains and the propagators.
///
/// [`State`] implements [`Clone`]: a clone is an independent copy of every domain and every
/// propagator, which can be used to explore a sibling search branch. Literals created in the
/// original refer to the same domains in the clone.
///
/// Once an assignment or a propagator has found the domains to be inconsistent the state is
/// failed. Posting constraints on a failed state does nothing, and
/// [`State::propagate_to_fixed_point`] keeps reporting the [`Inconsistency`].
#[derive(Debug, Clone, Default)]
pub struct State {
    pub(crate) assignments: Assignments,
    /// The list of propagators; propagators live here and are notified when the domains they
    /// watch change.
    pub(crate) propagators: PropagatorStore,
    pub(crate) notification_engine: NotificationEngine,
    /// Dictates the order in which propagators will be called to propagate.
    pub(crate) propagator_queue: PropagatorQueue,
    options: StateOptions,
    failure: Option<Inconsistency>,
    statistics: StateStatistics,
}

create_statistics_struct!(StateStatistics {
    num_propagators_called: u64,
    /// The number of domains fixed by propagators.
    num_propagations: u64,
    num_notifications: u64,
    num_conflicts: u64,
    num_subsumptions: u64,
    num_rewrites: u64,
});

impl State {
    pub fn new(options: StateOptions) -> State {
        State {
            options,
            ..Default::default()
        }
    }

    pub fn integer_limits(&self) -> IntegerLimits {
        self.options.integer_limits
    }

    /// Create a fresh, unassigned literal.
    pub fn new_literal(&mut self) -> Literal {
        self.notification_engine.grow();
        Literal::new(self.assignments.grow())
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// The value of the literal, or [`None`] while it is unassigned.
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        literal.value(&self.assignments)
    }

    /// Fix `literal` to `value`, e.g. as a search decision.
    ///
    /// The propagators watching the literal are notified on the next call to
    /// [`State::propagate_to_fixed_point`]. Fixing the literal to the opposite of its current
    /// value fails the state.
    pub fn assign(&mut self, literal: Literal, value: bool) -> Result<(), Inconsistency> {
        if let Some(inconsistency) = self.failure {
            return Err(inconsistency);
        }

        match literal.assign(&mut self.assignments, value) {
            Ok(_) => Ok(()),
            Err(empty_domain) => {
                let inconsistency = Inconsistency::from(empty_domain);
                self.fail(inconsistency);
                Err(inconsistency)
            }
        }
    }

    /// Fix `var` while posting a constraint. A contradiction fails the state rather than being
    /// reported to the caller.
    pub(crate) fn fix_at_post<Var: BooleanVariable>(&mut self, var: &Var, value: bool) {
        if self.is_failed() {
            return;
        }

        if let Err(empty_domain) = var.assign(&mut self.assignments, value) {
            trace!("fixing {var:?} to {value} at post time failed the state");
            self.fail(empty_domain.into());
        }
    }

    /// Record that a constraint was found to be inconsistent while it was posted.
    pub(crate) fn fail_at_post(&mut self, inconsistency: Inconsistency) {
        if !self.is_failed() {
            self.fail(inconsistency);
        }
    }

    /// Whether the domains have been found to be inconsistent.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<Inconsistency> {
        self.failure
    }

    /// The number of propagators which have been neither subsumed nor rewritten.
    pub fn num_active_propagators(&self) -> usize {
        self.propagators.num_active()
    }

    /// Logs the statistics of the state, see
    /// [`configure_statistic_logging`](crate::statistics::configure_statistic_logging).
    pub fn log_statistics(&self) {
        self.statistics.log(StatisticLogger::new("state"));
    }

    fn fail(&mut self, inconsistency: Inconsistency) {
        self.failure = Some(inconsistency);
        self.propagator_queue.clear();
    }
}

/// Operations for adding constraints.
impl State {
    /// Add a new propagator to the [`State`]. The constructor for that propagator should
    /// subscribe to the appropriate domain events so that the propagator is called when
    /// necessary.
    ///
    /// While the propagator is added to the queue for propagation, this function does _not_
    /// trigger a round of propagation. An explicit call to [`State::propagate_to_fixed_point`] is
    /// necessary to run the new propagator for the first time.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = self.propagators.next_id();
        let context = PropagatorConstructorContext::new(
            propagator_id,
            &self.assignments,
            &mut self.notification_engine,
        );
        let propagator = constructor.create(context);

        let handle = PropagatorHandle::new(self.install(Box::new(propagator)));
        fimcp_assert_simple!(handle.untyped() == propagator_id);

        handle
    }

    fn add_boxed_propagator(
        &mut self,
        constructor: Box<dyn DynPropagatorConstructor>,
    ) -> PropagatorId {
        let propagator_id = self.propagators.next_id();
        let context = PropagatorConstructorContext::new(
            propagator_id,
            &self.assignments,
            &mut self.notification_engine,
        );
        let propagator = constructor.create_boxed(context);

        self.install(propagator)
    }

    fn install(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        let priority = propagator.priority();
        let propagator_id = self.propagators.push(propagator);

        if !self.is_failed() {
            self.propagator_queue
                .enqueue_propagator(propagator_id, priority);
        }

        propagator_id
    }

    /// Creates a [`ConstraintPoster`] which posts the given constraint, its half-reification or
    /// its full reification into the state.
    pub fn add_constraint<Constraint>(
        &mut self,
        constraint: Constraint,
    ) -> ConstraintPoster<'_, Constraint> {
        ConstraintPoster::new(self, constraint)
    }
}

/// Operations for retrieving propagators.
impl State {
    /// Get a reference to the propagator identified by the given handle, or [`None`] if it has
    /// been subsumed or rewritten.
    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get_propagator(handle)
    }

    /// The names of the active propagators.
    pub fn active_propagator_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.propagators.iter_active().map(|propagator| propagator.name())
    }
}

/// Operations for propagation.
impl State {
    /// Performs fixed-point propagation using the propagators defined in the [`State`].
    ///
    /// Domain events caused by [`State::assign`] and by propagators are delivered to the
    /// watching propagators before any of them runs again, and propagation continues until no
    /// propagator is enqueued.
    ///
    /// If the domains are found to be inconsistent the state becomes failed and the
    /// [`Inconsistency`] is returned, now and on every later call.
    pub fn propagate_to_fixed_point(&mut self) -> Result<(), Inconsistency> {
        if let Some(inconsistency) = self.failure {
            return Err(inconsistency);
        }

        loop {
            self.notify_propagators();

            let Some(propagator_id) = self.propagator_queue.pop() else {
                break;
            };

            if let Err(inconsistency) = self.propagate(propagator_id) {
                self.statistics.num_conflicts += 1;
                self.fail(inconsistency);
                return Err(inconsistency);
            }
        }

        Ok(())
    }

    fn notify_propagators(&mut self) {
        let num_notifications = self.notification_engine.notify_propagators_about_domain_events(
            &mut self.assignments,
            &mut self.propagators,
            &mut self.propagator_queue,
        );
        self.statistics.num_notifications += num_notifications as u64;
    }

    fn propagate(&mut self, propagator_id: PropagatorId) -> Result<(), Inconsistency> {
        let Some(propagator) = self.propagators.get_mut(propagator_id) else {
            return Ok(());
        };

        self.statistics.num_propagators_called += 1;
        let num_assigned_before = self.assignments.num_assigned();

        let context = PropagationContext::new(&mut self.assignments, propagator_id);
        let status = propagator.propagate(context);

        self.statistics.num_propagations +=
            (self.assignments.num_assigned() - num_assigned_before) as u64;

        match status? {
            PropagatorStatus::AtFixpoint => {}
            PropagatorStatus::Subsumed => {
                trace!("{propagator_id} is subsumed");
                self.statistics.num_subsumptions += 1;
                self.retire(propagator_id);
            }
            PropagatorStatus::Rewrite(constructor) => {
                self.statistics.num_rewrites += 1;
                self.retire(propagator_id);

                let replacement = self.add_boxed_propagator(constructor);
                trace!("{propagator_id} is rewritten into {replacement}");
            }
        }

        Ok(())
    }

    fn retire(&mut self, propagator_id: PropagatorId) {
        self.propagators.retire(propagator_id);
        self.notification_engine.remove_propagator(propagator_id);
    }
}
