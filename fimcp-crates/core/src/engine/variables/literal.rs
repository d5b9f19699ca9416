use std::ops::Not;

use enumset::EnumSet;

use super::BooleanVariable;
use super::DomainId;
use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// A 0-1 domain together with a polarity.
///
/// A negated literal is the complementing view of its domain: it reads as the negation of the
/// domain's value, assigning it assigns the domain the opposite value, and it observes the
/// opposite domain events. `!literal` flips the polarity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    domain: DomainId,
    negated: bool,
}

impl Literal {
    /// Creates the positive literal over the provided [`DomainId`].
    pub fn new(domain: DomainId) -> Literal {
        Literal {
            domain,
            negated: false,
        }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    fn apply_polarity(&self, value: bool) -> bool {
        value != self.negated
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            domain: self.domain,
            negated: !self.negated,
        }
    }
}

impl From<DomainId> for Literal {
    fn from(domain: DomainId) -> Self {
        Literal::new(domain)
    }
}

impl BooleanVariable for Literal {
    fn value(&self, assignments: &Assignments) -> Option<bool> {
        assignments
            .value(self.domain)
            .map(|value| self.apply_polarity(value))
    }

    fn assign(&self, assignments: &mut Assignments, value: bool) -> Result<bool, EmptyDomain> {
        assignments.assign(self.domain, self.apply_polarity(value))
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<BooleanDomainEvent>) {
        let events = if self.negated {
            events.iter().map(BooleanDomainEvent::negated).collect()
        } else {
            events
        };

        watchers.watch_all(self.domain, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> BooleanDomainEvent {
        if self.negated {
            event.unwrap().negated()
        } else {
            event.unwrap()
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "!{}", self.domain)
        } else {
            write!(f, "{}", self.domain)
        }
    }
}

impl std::fmt::Debug for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_negated_literal_reads_the_complement() {
        let mut assignments = Assignments::default();
        let literal = Literal::new(assignments.grow());

        assert_eq!((!literal).value(&assignments), None);

        let _ = literal
            .assign(&mut assignments, true)
            .expect("unassigned literal");

        assert!(literal.is_true(&assignments));
        assert!((!literal).is_false(&assignments));
    }

    #[test]
    fn assigning_a_negated_literal_assigns_the_opposite_value() {
        let mut assignments = Assignments::default();
        let literal = Literal::new(assignments.grow());

        let _ = (!literal)
            .assign(&mut assignments, true)
            .expect("unassigned literal");

        assert_eq!(assignments.value(literal.domain()), Some(false));
        assert_eq!((!literal).assign(&mut assignments, false), Err(EmptyDomain));
    }

    #[test]
    fn double_negation_is_the_identity() {
        let literal = Literal::new(DomainId::new(4));

        assert_eq!(!!literal, literal);
        assert!((!literal).is_negated());
    }

    #[test]
    fn a_negated_literal_unpacks_the_opposite_event() {
        let literal = !Literal::new(DomainId::new(0));

        assert_eq!(
            literal.unpack_event(BooleanDomainEvent::AssignedFalse.into()),
            BooleanDomainEvent::AssignedTrue
        );
    }
}
