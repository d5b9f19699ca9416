use std::collections::hash_map::Entry;
use std::fmt::Display;

use itertools::Either;
use itertools::Itertools;

use super::Relation;
use crate::containers::HashMap;
use crate::engine::variables::BooleanVariable;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::math::check_limits;
use crate::math::IntegerLimits;
use crate::ConstraintOperationError;

/// A linear constraint `sum(weights[i] * domains[i]) <relation> rhs` over Boolean domains.
///
/// No domain in the sum is fixed, occurs twice or has a zero weight, and the relation is never
/// strict. Negated literals are expressed through their domain, as `w * !x` equals `w - w * x`.
#[derive(Clone, Debug)]
pub(super) struct NormalisedLinear {
    terms: Vec<(i64, DomainId)>,
    relation: Relation,
    rhs: i64,
}

impl NormalisedLinear {
    /// Normalises `sum(coefficients[i] * literals[i]) <relation> rhs` under the current
    /// assignments.
    ///
    /// Both the given right-hand side and the one which remains after the fixed literals are
    /// removed have to lie within `limits`.
    pub(super) fn new(
        assignments: &Assignments,
        coefficients: &[i32],
        literals: &[Literal],
        relation: Relation,
        rhs: i32,
        limits: IntegerLimits,
        location: &'static str,
    ) -> Result<NormalisedLinear, ConstraintOperationError> {
        check_argument_sizes(coefficients, literals)?;

        let mut rhs = i64::from(check_limits(i64::from(rhs), limits, location)?);
        let mut terms: Vec<(i64, DomainId)> = Vec::with_capacity(literals.len());
        let mut positions: HashMap<DomainId, usize> = HashMap::default();

        for (&coefficient, &literal) in coefficients.iter().zip(literals) {
            let weight = i64::from(coefficient);

            match literal.value(assignments) {
                Some(true) => {
                    rhs -= weight;
                    continue;
                }
                Some(false) => continue,
                None => {}
            }

            let weight = if literal.is_negated() {
                rhs -= weight;
                -weight
            } else {
                weight
            };

            match positions.entry(literal.domain()) {
                Entry::Occupied(position) => terms[*position.get()].0 += weight,
                Entry::Vacant(position) => {
                    let _ = position.insert(terms.len());
                    terms.push((weight, literal.domain()));
                }
            }
        }

        let rhs = i64::from(check_limits(rhs, limits, location)?);
        terms.retain(|&(weight, _)| weight != 0);

        let (relation, rhs) = relation.non_strict(rhs);

        Ok(NormalisedLinear {
            terms,
            relation,
            rhs,
        })
    }

    pub(super) fn relation(&self) -> Relation {
        self.relation
    }

    pub(super) fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether the constraint holds when the sum is empty.
    pub(super) fn holds_without_terms(&self) -> bool {
        self.relation.holds(0, self.rhs)
    }

    pub(super) fn has_unit_weights(&self) -> bool {
        self.terms.iter().all(|&(weight, _)| weight.abs() == 1)
    }

    /// Checks that the range of residual constants the sum can still produce lies within
    /// `limits`: from `rhs - sum(positive weights)` up to `rhs + sum(|negative weights|)`.
    pub(super) fn check_bounds(
        &self,
        limits: IntegerLimits,
        location: &'static str,
    ) -> Result<(), ConstraintOperationError> {
        let (positive, negative): (i64, i64) =
            self.terms
                .iter()
                .fold((0, 0), |(positive, negative), &(weight, _)| {
                    if weight > 0 {
                        (positive + weight, negative)
                    } else {
                        (positive, negative - weight)
                    }
                });

        let _ = check_limits(self.rhs - positive, limits, location)?;
        let _ = check_limits(self.rhs + negative, limits, location)?;

        Ok(())
    }

    /// For unit weights, the literals and threshold such that `sum(literals) >= threshold`
    /// is equivalent to `sum >= rhs`.
    ///
    /// With `P` the domains of weight 1 and `N` those of weight -1, this is the sum over `P` and
    /// the complements of `N` with threshold `rhs + |N|`.
    pub(super) fn at_least(
        &self,
        limits: IntegerLimits,
        location: &'static str,
    ) -> Result<(Vec<Literal>, i32), ConstraintOperationError> {
        let (positive, negative) = self.unit_groups();
        let threshold = check_limits(self.rhs + negative.len() as i64, limits, location)?;

        let literals = positive
            .into_iter()
            .map(Literal::new)
            .chain(negative.into_iter().map(|domain| !Literal::new(domain)))
            .collect();

        Ok((literals, threshold))
    }

    /// For unit weights, the literals and threshold such that `sum(literals) >= threshold`
    /// is equivalent to `sum <= rhs`.
    ///
    /// At most `rhs + |N|` of `P` and the complements of `N` may be true, so at least
    /// `|P| - rhs` of their complements have to be.
    pub(super) fn at_most(
        &self,
        limits: IntegerLimits,
        location: &'static str,
    ) -> Result<(Vec<Literal>, i32), ConstraintOperationError> {
        let (positive, negative) = self.unit_groups();
        let threshold = check_limits(positive.len() as i64 - self.rhs, limits, location)?;

        let literals = positive
            .into_iter()
            .map(|domain| !Literal::new(domain))
            .chain(negative.into_iter().map(Literal::new))
            .collect();

        Ok((literals, threshold))
    }

    /// The weights, literals and right-hand side of the sum for the generic linear propagator.
    pub(super) fn weighted(
        &self,
        limits: IntegerLimits,
        location: &'static str,
    ) -> Result<(Box<[i32]>, Box<[Literal]>, i32), ConstraintOperationError> {
        let weights = self
            .terms
            .iter()
            .map(|&(weight, _)| check_limits(weight, limits, location))
            .collect::<Result<Box<[i32]>, _>>()?;
        let literals = self
            .terms
            .iter()
            .map(|&(_, domain)| Literal::new(domain))
            .collect();
        let rhs = check_limits(self.rhs, limits, location)?;

        Ok((weights, literals, rhs))
    }

    fn unit_groups(&self) -> (Vec<DomainId>, Vec<DomainId>) {
        self.terms.iter().partition_map(|&(weight, domain)| {
            if weight > 0 {
                Either::Left(domain)
            } else {
                Either::Right(domain)
            }
        })
    }
}

impl Display for NormalisedLinear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0 {} {}", self.relation, self.rhs);
        }

        let sum = self
            .terms
            .iter()
            .map(|(weight, domain)| format!("{weight}*{domain}"))
            .join(" + ");

        write!(f, "{sum} {} {}", self.relation, self.rhs)
    }
}

pub(super) fn check_argument_sizes(
    coefficients: &[i32],
    literals: &[Literal],
) -> Result<(), ConstraintOperationError> {
    if coefficients.len() != literals.len() {
        return Err(ConstraintOperationError::ArgumentSizeMismatch {
            coefficients: coefficients.len(),
            literals: literals.len(),
        });
    }

    Ok(())
}
