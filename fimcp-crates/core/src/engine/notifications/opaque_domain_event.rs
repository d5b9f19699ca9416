use super::BooleanDomainEvent;
#[cfg(doc)]
use crate::engine::variables::BooleanVariable;

/// A [`BooleanDomainEvent`] on the underlying domain of a variable.
///
/// Obtain the event from the perspective of a variable through
/// [`BooleanVariable::unpack_event`]; a complementing view observes the opposite event.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct OpaqueDomainEvent(BooleanDomainEvent);

impl From<BooleanDomainEvent> for OpaqueDomainEvent {
    fn from(event: BooleanDomainEvent) -> Self {
        OpaqueDomainEvent(event)
    }
}

impl OpaqueDomainEvent {
    pub(crate) fn unwrap(self) -> BooleanDomainEvent {
        self.0
    }
}
