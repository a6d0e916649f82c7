use chrono::{DateTime, Utc};
use investment_goals_core::goals::{GoalDraft, GoalList, InvestmentGoal};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentGoalResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Car")]
    pub name: String,
    #[schema(example = json!(["janeiro", "fevereiro"]))]
    pub months: Vec<String>,
    #[schema(example = 1000.00)]
    pub amount: f64,
    #[schema(example = 500.00)]
    pub amount_per_month: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvestmentGoal> for InvestmentGoalResponse {
    fn from(g: InvestmentGoal) -> Self {
        Self {
            id: g.id,
            name: g.name,
            months: g.months.iter().map(|m| m.as_str().to_string()).collect(),
            amount: g.amount.to_f64().unwrap_or_default(),
            amount_per_month: g.amount_per_month.to_f64().unwrap_or_default(),
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct InvestmentGoalListResponse {
    pub data: Vec<InvestmentGoalResponse>,
    pub total: usize,
}

impl From<GoalList> for InvestmentGoalListResponse {
    fn from(list: GoalList) -> Self {
        Self {
            data: list.data.into_iter().map(Into::into).collect(),
            total: list.total,
        }
    }
}

/// Create payload. Fields are optional here so that missing ones are
/// reported together with every other validation failure.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct NewInvestmentGoalRequest {
    #[schema(example = "Car", max_length = 255)]
    pub name: Option<String>,
    #[schema(example = json!(["janeiro", "fevereiro"]))]
    pub months: Option<Vec<String>>,
    #[schema(example = 1000.00)]
    pub amount: Option<f64>,
}

impl From<NewInvestmentGoalRequest> for GoalDraft {
    fn from(r: NewInvestmentGoalRequest) -> Self {
        Self {
            name: r.name,
            months: r.months,
            amount: r.amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct InvestmentGoalUpdateRequest {
    #[schema(example = "New car", max_length = 255)]
    pub name: Option<String>,
    #[schema(example = json!(["janeiro", "fevereiro", "março"]))]
    pub months: Option<Vec<String>>,
    #[schema(example = 300.00)]
    pub amount: Option<f64>,
}

impl From<InvestmentGoalUpdateRequest> for GoalDraft {
    fn from(r: InvestmentGoalUpdateRequest) -> Self {
        Self {
            name: r.name,
            months: r.months,
            amount: r.amount,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct ListGoalsQuery {
    /// Case-insensitive substring of the goal name
    pub name: Option<String>,
    /// Only goals that include this month, e.g. `julho`
    pub month: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use investment_goals_core::goals::Month;
    use rust_decimal::Decimal;

    #[test]
    fn goal_response_uses_wire_shape() {
        let now = Utc::now();
        let goal = InvestmentGoal {
            id: 1,
            name: "Car".to_string(),
            months: vec![Month::January, Month::March],
            amount: Decimal::new(100000, 2),
            amount_per_month: Decimal::new(50000, 2),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(InvestmentGoalResponse::from(goal)).unwrap();
        assert_eq!(json["months"], serde_json::json!(["janeiro", "março"]));
        assert_eq!(json["amount"], 1000.0);
        assert_eq!(json["amountPerMonth"], 500.0);
        assert!(json["createdAt"].is_string());
    }
}
