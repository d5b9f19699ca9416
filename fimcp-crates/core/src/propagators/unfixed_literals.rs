use crate::containers::KeyedVec;
use crate::propagation::LocalId;

/// The literals of a propagator which are not yet fixed.
///
/// The literal registered under [`LocalId`] `i` is the `i`-th literal it was created with. A
/// removed literal is swapped with the last one, so removal takes constant time and the
/// collection never grows.
#[derive(Clone, Debug)]
pub(crate) struct UnfixedLiterals<Var> {
    literals: Vec<Var>,
    local_ids: Vec<LocalId>,
    /// The position in `literals` of every local id; [`None`] once it is removed.
    positions: KeyedVec<LocalId, Option<usize>>,
}

impl<Var> UnfixedLiterals<Var> {
    pub(crate) fn new(literals: Vec<Var>) -> Self {
        let local_ids = (0..literals.len())
            .map(|index| LocalId::from(index as u32))
            .collect();
        let positions = (0..literals.len()).map(Some).collect();

        UnfixedLiterals {
            literals,
            local_ids,
            positions,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Var> + '_ {
        self.literals.iter()
    }

    /// Returns the literal registered under `local_id`, or [`None`] if it was removed or never
    /// belonged to this collection.
    #[cfg(test)]
    pub(crate) fn get(&self, local_id: LocalId) -> Option<&Var> {
        let position = self.positions.get(local_id).copied().flatten()?;
        Some(&self.literals[position])
    }

    /// Removes the literal registered under `local_id`.
    pub(crate) fn remove(&mut self, local_id: LocalId) -> Option<Var> {
        let position = self.positions.get_mut(local_id)?.take()?;

        let removed = self.literals.swap_remove(position);
        let _ = self.local_ids.swap_remove(position);

        if let Some(&moved) = self.local_ids.get(position) {
            self.positions[moved] = Some(position);
        }

        Some(removed)
    }

    /// Hands over the remaining literals.
    pub(crate) fn take(&mut self) -> Vec<Var> {
        self.local_ids.clear();
        for position in self.positions.iter_mut() {
            *position = None;
        }

        std::mem::take(&mut self.literals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_swaps_the_last_literal_into_place() {
        let mut literals = UnfixedLiterals::new(vec!['a', 'b', 'c', 'd']);

        assert_eq!(literals.remove(LocalId::from(1)), Some('b'));
        assert_eq!(literals.iter().copied().collect::<Vec<_>>(), vec!['a', 'd', 'c']);
        assert_eq!(literals.get(LocalId::from(3)), Some(&'d'));

        assert_eq!(literals.remove(LocalId::from(3)), Some('d'));
        assert_eq!(literals.iter().copied().collect::<Vec<_>>(), vec!['a', 'c']);
        assert_eq!(literals.get(LocalId::from(2)), Some(&'c'));
    }

    #[test]
    fn a_literal_is_removed_once() {
        let mut literals = UnfixedLiterals::new(vec![1, 2]);

        assert_eq!(literals.remove(LocalId::from(0)), Some(1));
        assert_eq!(literals.remove(LocalId::from(0)), None);
        assert_eq!(literals.len(), 1);
    }

    #[test]
    fn unknown_local_ids_are_ignored() {
        let mut literals = UnfixedLiterals::new(vec![1, 2]);

        assert_eq!(literals.get(LocalId::from(2)), None);
        assert_eq!(literals.remove(LocalId::from(7)), None);
        assert_eq!(literals.len(), 2);
    }

    #[test]
    fn removing_the_last_literal_empties_the_collection() {
        let mut literals = UnfixedLiterals::new(vec![5]);

        assert_eq!(literals.remove(LocalId::from(0)), Some(5));
        assert!(literals.is_empty());
        assert!(literals.take().is_empty());
    }
}
