//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values
///
/// Implement this trait for any config type that needs validation beyond
/// type-level checks. Validation should provide helpful error messages.
pub trait Validate {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if validation passes, or a `ConfigError` describing
    /// what validation failed and why.
    fn validate(&self) -> Result<()>;
}

/// Checks that a collection of weights does not sum to zero.
///
/// Scoring divides by the weight sum, so at least one active weight must be
/// strictly positive.
pub fn validate_weight_sum(field: impl Into<String>, weights: &[(String, f64)]) -> Result<()> {
    let sum: f64 = weights.iter().map(|(_, w)| w).sum();

    if sum <= f64::EPSILON {
        return Err(ConfigError::ZeroWeightSum {
            field: field.into(),
            actual: sum,
            hint: format!(
                "Raise at least one of: {}",
                weights
                    .iter()
                    .map(|(name, val)| format!("{} = {:.2}", name, val))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    Ok(())
}

/// Helper function to validate value is within range
pub fn validate_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Helper function to validate integer is above minimum
pub fn validate_positive(field: impl Into<String>, value: usize, min: usize) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_sum_valid() {
        let weights = vec![("likes".to_string(), 0.0), ("shares".to_string(), 0.1)];
        assert!(validate_weight_sum("test", &weights).is_ok());
    }

    #[test]
    fn test_weight_sum_all_zero() {
        let weights = vec![("likes".to_string(), 0.0), ("shares".to_string(), 0.0)];
        assert!(validate_weight_sum("test", &weights).is_err());
    }

    #[test]
    fn test_weight_sum_empty() {
        assert!(validate_weight_sum("test", &[]).is_err());
    }

    #[test]
    fn test_range_valid() {
        assert!(validate_range("test", 0.5, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_range_invalid() {
        assert!(validate_range("test", 5.1, 0.0, 5.0).is_err());
        assert!(validate_range("test", f64::NAN, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_positive_valid() {
        assert!(validate_positive("test", 5, 0).is_ok());
    }

    #[test]
    fn test_positive_invalid() {
        assert!(validate_positive("test", 0, 0).is_err());
    }
}
