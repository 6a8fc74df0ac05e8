//! Validation errors raised at the operation boundary.
//!
//! A `WorkError` always means the operation was rejected before touching
//! the in-memory graph.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkError {
    #[error("position name must not be empty")]
    EmptyName,

    #[error("unit price must be a positive number, got {0}")]
    InvalidPrice(f64),

    #[error("position with ID {0} not found")]
    PositionNotFound(u32),

    #[error("coefficient must be a number between 0 and 1, got {0}")]
    InvalidCoefficient(f64),

    #[error("person count must be at least 1, got {0}")]
    InvalidPersonCount(u32),

    #[error("quantity must be a non-negative number, got {0}")]
    InvalidQuantity(f64),

    #[error("invalid month key '{0}', expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("invalid day key '{0}', expected YYYY-MM-DD")]
    InvalidDayKey(String),

    #[error("invalid import file: {0}")]
    InvalidImport(String),
}

/// Accepts a finite coefficient in `[0, 1]`.
pub fn validate_coefficient(value: f64) -> Result<f64, WorkError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(WorkError::InvalidCoefficient(value))
    }
}

pub fn validate_person_count(count: u32) -> Result<u32, WorkError> {
    if count >= 1 {
        Ok(count)
    } else {
        Err(WorkError::InvalidPersonCount(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_bounds() {
        assert_eq!(validate_coefficient(0.0), Ok(0.0));
        assert_eq!(validate_coefficient(1.0), Ok(1.0));
        assert!(validate_coefficient(1.5).is_err());
        assert!(validate_coefficient(-0.01).is_err());
        assert!(validate_coefficient(f64::NAN).is_err());
        assert!(validate_coefficient(f64::INFINITY).is_err());
    }

    #[test]
    fn test_person_count_rejects_zero() {
        assert_eq!(validate_person_count(0), Err(WorkError::InvalidPersonCount(0)));
        assert_eq!(validate_person_count(4), Ok(4));
    }
}
