use std::fmt::Display;

use crate::ConstraintOperationError;

/// The relation between the left-hand side and the right-hand side of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    NotEqual,
    LessThanOrEqual,
    LessThan,
    GreaterThanOrEqual,
    GreaterThan,
}

impl Relation {
    /// The relation which holds exactly when `self` does not.
    pub fn negation(self) -> Relation {
        match self {
            Relation::Equal => Relation::NotEqual,
            Relation::NotEqual => Relation::Equal,
            Relation::LessThanOrEqual => Relation::GreaterThan,
            Relation::LessThan => Relation::GreaterThanOrEqual,
            Relation::GreaterThanOrEqual => Relation::LessThan,
            Relation::GreaterThan => Relation::LessThanOrEqual,
        }
    }

    /// Whether `lhs <relation> rhs` holds.
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::Equal => lhs == rhs,
            Relation::NotEqual => lhs != rhs,
            Relation::LessThanOrEqual => lhs <= rhs,
            Relation::LessThan => lhs < rhs,
            Relation::GreaterThanOrEqual => lhs >= rhs,
            Relation::GreaterThan => lhs > rhs,
        }
    }

    /// Rewrites a strict relation over integers into its non-strict counterpart, adjusting the
    /// right-hand side: `< rhs` becomes `<= rhs - 1` and `> rhs` becomes `>= rhs + 1`.
    pub fn non_strict(self, rhs: i64) -> (Relation, i64) {
        match self {
            Relation::LessThan => (Relation::LessThanOrEqual, rhs - 1),
            Relation::GreaterThan => (Relation::GreaterThanOrEqual, rhs + 1),
            relation => (relation, rhs),
        }
    }
}

/// Relations are conventionally encoded as `0..=5`: equal, not equal, less than or equal, less
/// than, greater than or equal and greater than.
impl TryFrom<i32> for Relation {
    type Error = ConstraintOperationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Relation::Equal),
            1 => Ok(Relation::NotEqual),
            2 => Ok(Relation::LessThanOrEqual),
            3 => Ok(Relation::LessThan),
            4 => Ok(Relation::GreaterThanOrEqual),
            5 => Ok(Relation::GreaterThan),
            _ => Err(ConstraintOperationError::UnknownRelation(code)),
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Relation::Equal => "==",
            Relation::NotEqual => "!=",
            Relation::LessThanOrEqual => "<=",
            Relation::LessThan => "<",
            Relation::GreaterThanOrEqual => ">=",
            Relation::GreaterThan => ">",
        };

        write!(f, "{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Relation; 6] = [
        Relation::Equal,
        Relation::NotEqual,
        Relation::LessThanOrEqual,
        Relation::LessThan,
        Relation::GreaterThanOrEqual,
        Relation::GreaterThan,
    ];

    #[test]
    fn codes_map_to_relations() {
        assert_eq!(Relation::try_from(0), Ok(Relation::Equal));
        assert_eq!(Relation::try_from(3), Ok(Relation::LessThan));
        assert_eq!(Relation::try_from(5), Ok(Relation::GreaterThan));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(
            Relation::try_from(6),
            Err(ConstraintOperationError::UnknownRelation(6))
        );
        assert_eq!(
            Relation::try_from(-1),
            Err(ConstraintOperationError::UnknownRelation(-1))
        );
    }

    #[test]
    fn the_negation_holds_exactly_when_the_relation_does_not() {
        for relation in ALL {
            for lhs in -2..=2 {
                assert_ne!(relation.holds(lhs, 0), relation.negation().holds(lhs, 0));
            }
            assert_eq!(relation.negation().negation(), relation);
        }
    }

    #[test]
    fn strict_relations_are_made_non_strict() {
        for relation in ALL {
            let (non_strict, rhs) = relation.non_strict(3);
            assert_ne!(non_strict, Relation::LessThan);
            assert_ne!(non_strict, Relation::GreaterThan);

            for lhs in 0..=6 {
                assert_eq!(relation.holds(lhs, 3), non_strict.holds(lhs, rhs));
            }
        }
    }
}
