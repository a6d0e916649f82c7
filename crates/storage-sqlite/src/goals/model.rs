//! Database models for investment goals.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use investment_goals_core::goals::{InvestmentGoal, Month, NewInvestmentGoal};

/// Database model for investment goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentGoalDB {
    pub id: i64,
    pub name: String,
    /// JSON array of month names
    pub months: String,
    pub amount: String,
    pub amount_per_month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a goal; the id is assigned by SQLite
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
pub struct NewInvestmentGoalDB {
    pub name: String,
    pub months: String,
    pub amount: String,
    pub amount_per_month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values written by an update. `created_at` is never touched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
pub struct InvestmentGoalChangesDB {
    pub name: String,
    pub months: String,
    pub amount: String,
    pub amount_per_month: String,
    pub updated_at: NaiveDateTime,
}

impl NewInvestmentGoalDB {
    pub fn from_domain(goal: &NewInvestmentGoal, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            name: goal.name.clone(),
            months: encode_months(&goal.months)?,
            amount: goal.amount.to_string(),
            amount_per_month: goal.amount_per_month().to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl InvestmentGoalChangesDB {
    pub fn from_domain(goal: &NewInvestmentGoal, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            name: goal.name.clone(),
            months: encode_months(&goal.months)?,
            amount: goal.amount.to_string(),
            amount_per_month: goal.amount_per_month().to_string(),
            updated_at: now,
        })
    }
}

// Conversion to domain models
impl TryFrom<InvestmentGoalDB> for InvestmentGoal {
    type Error = StorageError;

    fn try_from(db: InvestmentGoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            months: decode_months(&db.months)?,
            amount: Decimal::from_str(&db.amount)?,
            amount_per_month: Decimal::from_str(&db.amount_per_month)?,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        })
    }
}

pub fn encode_months(months: &[Month]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(months)?)
}

pub fn decode_months(raw: &str) -> Result<Vec<Month>, StorageError> {
    Ok(serde_json::from_str(raw)?)
}
