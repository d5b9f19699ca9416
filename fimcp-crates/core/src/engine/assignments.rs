use crate::containers::KeyedVec;
use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::notifications::EventSink;
use crate::engine::variables::DomainId;

/// The domain store: the current value of every 0-1 domain, [`None`] while it is unassigned.
///
/// Every assignment which changes a domain is recorded as a [`BooleanDomainEvent`], which the
/// engine later drains to notify the watching propagators.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, Option<bool>>,
    events: EventSink,
    num_assigned: usize,
}

/// Returned when an assignment contradicts the value a domain is already fixed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

impl Assignments {
    pub(crate) fn grow(&mut self) -> DomainId {
        self.events.grow();
        self.domains.push(None)
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    /// The number of domains which are fixed to a value.
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    pub fn value(&self, domain: DomainId) -> Option<bool> {
        self.domains[domain]
    }

    /// Fix `domain` to `value`.
    ///
    /// Returns `Ok(true)` if the domain changed, `Ok(false)` if it was already fixed to `value`,
    /// and an [`EmptyDomain`] error if it was fixed to the opposite value.
    pub(crate) fn assign(&mut self, domain: DomainId, value: bool) -> Result<bool, EmptyDomain> {
        match self.domains[domain] {
            Some(current) if current == value => Ok(false),
            Some(_) => Err(EmptyDomain),
            None => {
                self.domains[domain] = Some(value);
                self.num_assigned += 1;

                let event = if value {
                    BooleanDomainEvent::AssignedTrue
                } else {
                    BooleanDomainEvent::AssignedFalse
                };
                self.events.event_occurred(event, domain);

                Ok(true)
            }
        }
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (BooleanDomainEvent, DomainId)> + '_ {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_new_domain_is_unassigned() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow();

        assert_eq!(assignments.value(domain), None);
        assert_eq!(assignments.num_assigned(), 0);
    }

    #[test]
    fn reassigning_the_same_value_is_a_no_op() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow();

        assert_eq!(assignments.assign(domain, true), Ok(true));
        assert_eq!(assignments.assign(domain, true), Ok(false));

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events, vec![(BooleanDomainEvent::AssignedTrue, domain)]);
    }

    #[test]
    fn assigning_the_opposite_value_empties_the_domain() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow();

        let _ = assignments.assign(domain, false).expect("unassigned domain");

        assert_eq!(assignments.assign(domain, true), Err(EmptyDomain));
        assert_eq!(assignments.value(domain), Some(false));
    }
}
