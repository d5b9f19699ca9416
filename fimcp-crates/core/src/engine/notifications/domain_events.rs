use std::fmt::Display;

use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// The events which can happen on a 0-1 domain.
#[derive(Debug, EnumSetType, Hash)]
pub enum BooleanDomainEvent {
    AssignedTrue,
    AssignedFalse,
}

impl BooleanDomainEvent {
    /// The event as observed through a complementing view.
    pub fn negated(self) -> BooleanDomainEvent {
        match self {
            BooleanDomainEvent::AssignedTrue => BooleanDomainEvent::AssignedFalse,
            BooleanDomainEvent::AssignedFalse => BooleanDomainEvent::AssignedTrue,
        }
    }
}

impl Display for BooleanDomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BooleanDomainEvent::AssignedTrue => write!(f, "[Event::True]"),
            BooleanDomainEvent::AssignedFalse => write!(f, "[Event::False]"),
        }
    }
}

/// A set of [`BooleanDomainEvent`]s a propagator can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    events: EnumSet<BooleanDomainEvent>,
}

impl DomainEvents {
    /// The variable becomes fixed, to either value.
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(
        BooleanDomainEvent::AssignedTrue | BooleanDomainEvent::AssignedFalse
    ));

    pub(crate) const fn new(events: EnumSet<BooleanDomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn events(&self) -> EnumSet<BooleanDomainEvent> {
        self.events
    }
}
