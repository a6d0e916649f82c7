//! Request validation for investment goals.
//!
//! Each operation has one function turning raw, untyped input into a typed
//! value. Every violated constraint is collected so a client sees all of its
//! mistakes at once.

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::constants::{AMOUNT_DECIMAL_PLACES, GOAL_NAME_MAX_CHARS, MAX_GOAL_AMOUNT};
use crate::errors::ValidationErrors;
use crate::goals::goals_model::{GoalFilters, InvestmentGoalUpdate, Month, NewInvestmentGoal};

type ValidationResult<T> = std::result::Result<T, ValidationErrors>;

/// Raw goal fields as received from a client, before any checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalDraft {
    pub name: Option<String>,
    pub months: Option<Vec<String>>,
    pub amount: Option<f64>,
}

/// Validates a create request. All three fields are required.
pub fn validate_new_goal(draft: GoalDraft) -> ValidationResult<NewInvestmentGoal> {
    let mut errors = ValidationErrors::new();

    let name = match draft.name {
        Some(name) => validate_name(name, &mut errors),
        None => {
            errors.push("name", "is required");
            None
        }
    };
    let months = match draft.months {
        Some(months) => validate_months(&months, &mut errors),
        None => {
            errors.push("months", "is required");
            None
        }
    };
    let amount = match draft.amount {
        Some(amount) => validate_amount(amount, &mut errors),
        None => {
            errors.push("amount", "is required");
            None
        }
    };

    match (name, months, amount) {
        (Some(name), Some(months), Some(amount)) if errors.is_empty() => Ok(NewInvestmentGoal {
            name,
            months,
            amount,
        }),
        _ => Err(errors),
    }
}

/// Validates an update request. Fields are optional but at least one must be
/// present.
pub fn validate_goal_update(draft: GoalDraft) -> ValidationResult<InvestmentGoalUpdate> {
    let mut errors = ValidationErrors::new();

    if draft.name.is_none() && draft.months.is_none() && draft.amount.is_none() {
        errors.push("body", "at least one field must be provided for an update");
        return Err(errors);
    }

    let update = InvestmentGoalUpdate {
        name: draft.name.and_then(|n| validate_name(n, &mut errors)),
        months: draft
            .months
            .and_then(|m| validate_months(&m, &mut errors)),
        amount: draft.amount.and_then(|a| validate_amount(a, &mut errors)),
    };

    errors.into_result(update)
}

/// Coerces a path segment into a goal id.
pub fn parse_goal_id(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    let id = raw.parse::<i64>().ok().or_else(|| {
        // "12.0" is still the integer 12
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    });

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ValidationErrors::single("id", "must be a positive integer")),
    }
}

/// Validates listing filters. An empty name means "no name filter".
pub fn validate_goal_filters(
    name: Option<String>,
    month: Option<String>,
) -> ValidationResult<GoalFilters> {
    let month = match month {
        Some(raw) => Some(Month::from_str(&raw).map_err(|e| {
            ValidationErrors::single(
                "month",
                format!("{} (expected one of: {})", e, Month::accepted_values()),
            )
        })?),
        None => None,
    };

    Ok(GoalFilters {
        name: name.filter(|n| !n.is_empty()),
        month,
    })
}

fn validate_name(name: String, errors: &mut ValidationErrors) -> Option<String> {
    let len = name.chars().count();
    if len == 0 {
        errors.push("name", "must not be empty");
        None
    } else if len > GOAL_NAME_MAX_CHARS {
        errors.push(
            "name",
            format!("must be at most {} characters", GOAL_NAME_MAX_CHARS),
        );
        None
    } else {
        Some(name)
    }
}

fn validate_months(raw: &[String], errors: &mut ValidationErrors) -> Option<Vec<Month>> {
    if raw.is_empty() {
        errors.push("months", "at least one month must be provided");
        return None;
    }

    let mut months = Vec::with_capacity(raw.len());
    let mut seen = HashSet::new();
    let mut valid = true;

    for (idx, value) in raw.iter().enumerate() {
        match Month::from_str(value) {
            Ok(month) => {
                if !seen.insert(month) {
                    errors.push(
                        "months",
                        format!("must not contain duplicates ('{}' repeated)", month),
                    );
                    valid = false;
                }
                months.push(month);
            }
            Err(e) => {
                errors.push(
                    format!("months[{}]", idx),
                    format!("{} (expected one of: {})", e, Month::accepted_values()),
                );
                valid = false;
            }
        }
    }

    valid.then_some(months)
}

fn validate_amount(value: f64, errors: &mut ValidationErrors) -> Option<Decimal> {
    let Some(amount) = amount_to_decimal(value) else {
        errors.push("amount", "must be a finite number");
        return None;
    };

    if amount <= Decimal::ZERO {
        errors.push("amount", "must be greater than zero");
        return None;
    }
    if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        errors.push(
            "amount",
            format!("must have at most {} decimal places", AMOUNT_DECIMAL_PLACES),
        );
        return None;
    }
    if amount > MAX_GOAL_AMOUNT {
        errors.push("amount", format!("must not exceed {}", MAX_GOAL_AMOUNT));
        return None;
    }

    let mut amount = amount;
    amount.rescale(AMOUNT_DECIMAL_PLACES);
    Some(amount)
}

/// Converts through the shortest decimal representation of the float, so a
/// client's `0.1` becomes exactly `0.1`.
fn amount_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let repr = value.to_string();
    match Decimal::from_str(&repr) {
        Ok(d) => Some(d),
        // Too large to represent: clamp so the range check reports it
        Err(_) if value.abs() >= 1.0 => Some(Decimal::MAX * Decimal::from(value.signum() as i64)),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(name: &str, months: &[&str], amount: f64) -> GoalDraft {
        GoalDraft {
            name: Some(name.to_string()),
            months: Some(months.iter().map(|m| m.to_string()).collect()),
            amount: Some(amount),
        }
    }

    #[test]
    fn test_valid_create() {
        let goal = validate_new_goal(draft("Car", &["janeiro", "fevereiro"], 1000.00)).unwrap();
        assert_eq!(goal.name, "Car");
        assert_eq!(goal.months, vec![Month::January, Month::February]);
        assert_eq!(goal.amount, dec!(1000));
        assert_eq!(goal.amount_per_month(), dec!(500.00));
    }

    #[test]
    fn test_create_preserves_month_order() {
        let goal = validate_new_goal(draft("Trip", &["dezembro", "março", "julho"], 90.0)).unwrap();
        assert_eq!(goal.months, vec![Month::December, Month::March, Month::July]);
    }

    #[test]
    fn test_create_requires_every_field() {
        let errors = validate_new_goal(GoalDraft::default()).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("months"));
        assert!(errors.has_field("amount"));
    }

    #[test]
    fn test_create_rejects_bad_name() {
        let errors = validate_new_goal(draft("", &["maio"], 10.0)).unwrap_err();
        assert_eq!(errors.errors()[0].field, "name");

        let long = "x".repeat(256);
        assert!(validate_new_goal(draft(&long, &["maio"], 10.0))
            .unwrap_err()
            .has_field("name"));

        let max = "é".repeat(255);
        assert!(validate_new_goal(draft(&max, &["maio"], 10.0)).is_ok());
    }

    #[test]
    fn test_create_rejects_duplicate_months() {
        let errors = validate_new_goal(draft("Car", &["janeiro", "janeiro"], 10.0)).unwrap_err();
        assert!(errors.has_field("months"));
        assert!(errors.to_string().contains("duplicates"));
    }

    #[test]
    fn test_create_rejects_unknown_and_empty_months() {
        let errors = validate_new_goal(draft("Car", &["janeiro", "january"], 10.0)).unwrap_err();
        assert!(errors.has_field("months[1]"));

        let errors = validate_new_goal(draft("Car", &[], 10.0)).unwrap_err();
        assert!(errors.has_field("months"));
    }

    #[test]
    fn test_create_rejects_bad_amounts() {
        for amount in [0.0, -5.0, 10.001, 1e20] {
            let errors = validate_new_goal(draft("Car", &["maio"], amount)).unwrap_err();
            assert!(errors.has_field("amount"), "amount {} accepted", amount);
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(MAX_GOAL_AMOUNT, dec!(9999999999999.99));

        let goal = validate_new_goal(draft("Car", &["maio"], 9_999_999_999_999.99)).unwrap();
        assert_eq!(goal.amount, MAX_GOAL_AMOUNT);

        let errors = validate_new_goal(draft("Car", &["maio"], 10_000_000_000_000.0)).unwrap_err();
        assert!(errors.to_string().contains("must not exceed 9999999999999.99"));
    }

    #[test]
    fn test_create_accepts_cents() {
        for amount in [0.01, 0.1, 19.99, 1234.5] {
            assert!(validate_new_goal(draft("Car", &["maio"], amount)).is_ok());
        }
        let goal = validate_new_goal(draft("Car", &["maio"], 0.1)).unwrap();
        assert_eq!(goal.amount, dec!(0.1));
        assert_eq!(goal.amount.to_string(), "0.10");
    }

    #[test]
    fn test_create_collects_all_errors() {
        let errors = validate_new_goal(draft("", &["nope"], -1.0)).unwrap_err();
        assert_eq!(errors.errors().len(), 3);
    }

    #[test]
    fn test_update_requires_a_field() {
        let errors = validate_goal_update(GoalDraft::default()).unwrap_err();
        assert!(errors.has_field("body"));
    }

    #[test]
    fn test_partial_update() {
        let update = validate_goal_update(GoalDraft {
            amount: Some(300.00),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.amount, Some(dec!(300)));
        assert!(update.name.is_none());
        assert!(update.months.is_none());
    }

    #[test]
    fn test_update_applies_field_constraints() {
        let errors = validate_goal_update(GoalDraft {
            months: Some(vec!["abril".into(), "abril".into()]),
            ..Default::default()
        })
        .unwrap_err();
        assert!(errors.has_field("months"));
    }

    #[test]
    fn test_parse_goal_id() {
        assert_eq!(parse_goal_id("1"), Ok(1));
        assert_eq!(parse_goal_id(" 42 "), Ok(42));
        assert_eq!(parse_goal_id("7.0"), Ok(7));
        for raw in ["0", "-3", "abc", "1.5", ""] {
            assert!(parse_goal_id(raw).is_err(), "{} accepted", raw);
        }
    }

    #[test]
    fn test_filters() {
        let filters =
            validate_goal_filters(Some("Trip".into()), Some("julho".into())).unwrap();
        assert_eq!(filters.name.as_deref(), Some("Trip"));
        assert_eq!(filters.month, Some(Month::July));

        let filters = validate_goal_filters(Some(String::new()), None).unwrap();
        assert_eq!(filters, GoalFilters::default());

        let errors = validate_goal_filters(None, Some("july".into())).unwrap_err();
        assert!(errors.has_field("month"));
    }
}
