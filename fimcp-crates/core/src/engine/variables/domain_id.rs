use enumset::EnumSet;

use super::BooleanVariable;
use crate::containers::StorageKey;
use crate::engine::notifications::BooleanDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// Identifies a 0-1 domain in the store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

impl DomainId {
    pub const fn new(id: u32) -> Self {
        DomainId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl BooleanVariable for DomainId {
    fn value(&self, assignments: &Assignments) -> Option<bool> {
        assignments.value(*self)
    }

    fn assign(&self, assignments: &mut Assignments, value: bool) -> Result<bool, EmptyDomain> {
        assignments.assign(*self, value)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<BooleanDomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> BooleanDomainEvent {
        event.unwrap()
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
