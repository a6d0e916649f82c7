//! Investment goal domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::AMOUNT_DECIMAL_PLACES;

/// Calendar month a goal can be spread over.
///
/// The wire names are the ones clients send and the ones stored in the
/// `months` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "janeiro")]
    January,
    #[serde(rename = "fevereiro")]
    February,
    #[serde(rename = "março")]
    March,
    #[serde(rename = "abril")]
    April,
    #[serde(rename = "maio")]
    May,
    #[serde(rename = "junho")]
    June,
    #[serde(rename = "julho")]
    July,
    #[serde(rename = "agosto")]
    August,
    #[serde(rename = "setembro")]
    September,
    #[serde(rename = "outubro")]
    October,
    #[serde(rename = "novembro")]
    November,
    #[serde(rename = "dezembro")]
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "janeiro",
            Month::February => "fevereiro",
            Month::March => "março",
            Month::April => "abril",
            Month::May => "maio",
            Month::June => "junho",
            Month::July => "julho",
            Month::August => "agosto",
            Month::September => "setembro",
            Month::October => "outubro",
            Month::November => "novembro",
            Month::December => "dezembro",
        }
    }

    /// Comma-separated list of every accepted wire name, for error messages.
    pub fn accepted_values() -> String {
        Month::ALL
            .iter()
            .map(Month::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMonth(pub String);

impl fmt::Display for UnknownMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a recognized month", self.0)
    }
}

impl std::error::Error for UnknownMonth {}

impl FromStr for Month {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMonth(s.to_string()))
    }
}

/// Domain model representing a stored investment goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentGoal {
    pub id: i64,
    pub name: String,
    pub months: Vec<Month>,
    pub amount: Decimal,
    pub amount_per_month: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvestmentGoal {
    /// Overlays the supplied fields of `changes` on this goal.
    pub fn merge(&self, changes: InvestmentGoalUpdate) -> NewInvestmentGoal {
        NewInvestmentGoal {
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            months: changes.months.unwrap_or_else(|| self.months.clone()),
            amount: changes.amount.unwrap_or(self.amount),
        }
    }
}

/// Validated input for creating a goal
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestmentGoal {
    pub name: String,
    pub months: Vec<Month>,
    pub amount: Decimal,
}

impl NewInvestmentGoal {
    pub fn amount_per_month(&self) -> Decimal {
        split_amount_evenly(self.amount, self.months.len())
    }
}

/// Validated partial update; `None` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentGoalUpdate {
    pub name: Option<String>,
    pub months: Option<Vec<Month>>,
    pub amount: Option<Decimal>,
}

impl InvestmentGoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.months.is_none() && self.amount.is_none()
    }
}

/// Optional filters for listing goals. All supplied filters must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalFilters {
    /// Case-insensitive substring of the goal name
    pub name: Option<String>,
    /// Goals whose months include this one
    pub month: Option<Month>,
}

/// Every goal matching a listing request, plus the count
#[derive(Debug, Clone, PartialEq)]
pub struct GoalList {
    pub data: Vec<InvestmentGoal>,
    pub total: usize,
}

impl From<Vec<InvestmentGoal>> for GoalList {
    fn from(data: Vec<InvestmentGoal>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// Divides `amount` evenly across `month_count` months, rounded to cents.
///
/// The result always carries exactly two decimal places. Returns zero when
/// there are no months to split over.
pub fn split_amount_evenly(amount: Decimal, month_count: usize) -> Decimal {
    let mut per_month = amount
        .checked_div(Decimal::from(month_count))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    per_month.rescale(AMOUNT_DECIMAL_PLACES);
    per_month
}
