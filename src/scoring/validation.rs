use crate::catalog::{Criterion, WEIGHT_TOTAL};
use crate::scoring::FeeSchedule;
use std::collections::HashSet;

/// Validate the criteria catalog at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(catalog: &[Criterion]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if catalog.is_empty() {
        errors.push("catalog: no criteria defined".to_string());
    }

    let mut seen = HashSet::new();
    for criterion in catalog {
        if !seen.insert(criterion.key) {
            errors.push(format!("catalog.{}: duplicate key", criterion.key));
        }
        if criterion.weight <= 0.0 {
            errors.push(format!(
                "catalog.{}: weight must be positive, got {}",
                criterion.key, criterion.weight
            ));
        }
        if criterion.label.is_empty() {
            errors.push(format!("catalog.{}: empty label", criterion.key));
        }
        for (i, level) in criterion.levels.iter().enumerate() {
            if level.is_empty() {
                errors.push(format!(
                    "catalog.{}.levels[{}]: empty description",
                    criterion.key, i
                ));
            }
        }
    }

    let total: f64 = catalog.iter().map(|c| c.weight).sum();
    if (total - WEIGHT_TOTAL).abs() > 1e-9 {
        errors.push(format!(
            "catalog: weights sum to {}, expected {}",
            total, WEIGHT_TOTAL
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a fee schedule (possibly overridden from config).
/// Returns all validation errors at once.
pub fn validate_schedule(schedule: &FeeSchedule) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if schedule.min_fee < 0.0 {
        errors.push(format!(
            "fees.min: must be non-negative, got {}",
            schedule.min_fee
        ));
    }
    if schedule.max_fee <= schedule.min_fee {
        errors.push(format!(
            "fees.max: must exceed fees.min ({} <= {})",
            schedule.max_fee, schedule.min_fee
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(validate_catalog(catalog()).is_ok());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = validate_catalog(&[]);
        assert!(result.is_err());
        let errors = result.unwrap_err();
        assert!(errors[0].contains("no criteria"));
    }

    #[test]
    fn test_collects_all_errors() {
        let bad = [
            Criterion {
                key: "a",
                label: "A",
                weight: -1.0, // Error 1
                levels: ["1", "2", "3", "4", "5"],
            },
            Criterion {
                key: "a", // Error 2: duplicate key
                label: "", // Error 3: empty label
                weight: 50.0,
                levels: ["1", "2", "3", "4", "5"],
            },
        ];
        // Error 4: weight sum is 49, not 100
        let errors = validate_catalog(&bad).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_default_schedule_is_valid() {
        assert!(validate_schedule(&FeeSchedule::default()).is_ok());
    }

    #[test]
    fn test_inverted_schedule_rejected() {
        let schedule = FeeSchedule {
            min_fee: 5000.0,
            max_fee: 1000.0,
        };
        let errors = validate_schedule(&schedule).unwrap_err();
        assert!(errors[0].contains("fees.max"));
    }

    #[test]
    fn test_negative_min_fee_rejected() {
        let schedule = FeeSchedule {
            min_fee: -100.0,
            max_fee: 1000.0,
        };
        let errors = validate_schedule(&schedule).unwrap_err();
        assert!(errors[0].contains("fees.min"));
    }
}
