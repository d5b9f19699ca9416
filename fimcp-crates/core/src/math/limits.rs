use crate::ConstraintOperationError;

/// The range of integers which constants and intermediate bounds of posted constraints must stay
/// within, such that incremental bookkeeping can never overflow an `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerLimits {
    pub min: i64,
    pub max: i64,
}

impl Default for IntegerLimits {
    fn default() -> Self {
        // One less than the `i32` extremes, so that a single increment or decrement of a checked
        // value still fits.
        let max = i32::MAX as i64 - 1;
        IntegerLimits { min: -max, max }
    }
}

impl IntegerLimits {
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Checks that `value` lies within `limits` and returns it as an `i32`.
///
/// The `location` identifies the operation performing the check in the resulting error.
pub(crate) fn check_limits(
    value: i64,
    limits: IntegerLimits,
    location: &'static str,
) -> Result<i32, ConstraintOperationError> {
    if !limits.contains(value) {
        return Err(ConstraintOperationError::Overflow { value, location });
    }

    i32::try_from(value).map_err(|_| ConstraintOperationError::Overflow { value, location })
}
