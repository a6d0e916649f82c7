use investment_goals_core::goals::{
    GoalFilters, InvestmentGoal, InvestmentGoalRepositoryTrait, InvestmentGoalUpdate,
    NewInvestmentGoal,
};
use investment_goals_core::Result;

use super::model::{InvestmentGoalChangesDB, InvestmentGoalDB, NewInvestmentGoalDB};
use crate::db::{get_connection, lower_unicode, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::investment_goals;
use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel::sqlite::Sqlite;
use log::debug;

use std::sync::Arc;

const LIKE_ESCAPE: char = '\\';

pub struct InvestmentGoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentGoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InvestmentGoalRepository { pool, writer }
    }

    pub fn list_goals_impl(&self, filters: &GoalFilters) -> Result<Vec<InvestmentGoal>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = investment_goals::table
            .select(InvestmentGoalDB::as_select())
            .into_boxed::<Sqlite>();

        if let Some(ref name) = filters.name {
            query = query.filter(
                lower_unicode(investment_goals::name)
                    .like(contains_pattern(&name.to_lowercase()))
                    .escape(LIKE_ESCAPE),
            );
        }
        if let Some(month) = filters.month {
            query = query.filter(
                sql::<Bool>(
                    "EXISTS (SELECT 1 FROM json_each(investment_goals.months) WHERE json_each.value = ",
                )
                .bind::<Text, _>(month.as_str())
                .sql(")"),
            );
        }

        let rows = query
            .order((
                investment_goals::created_at.desc(),
                investment_goals::id.desc(),
            ))
            .load::<InvestmentGoalDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| InvestmentGoal::try_from(row).map_err(Into::into))
            .collect()
    }

    pub fn get_goal_impl(&self, goal_id: i64) -> Result<Option<InvestmentGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = investment_goals::table
            .find(goal_id)
            .select(InvestmentGoalDB::as_select())
            .first::<InvestmentGoalDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(InvestmentGoal::try_from).transpose()?)
    }
}

/// `%term%` with LIKE wildcards in `term` matched literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl InvestmentGoalRepositoryTrait for InvestmentGoalRepository {
    fn list_goals(&self, filters: &GoalFilters) -> Result<Vec<InvestmentGoal>> {
        self.list_goals_impl(filters)
    }

    fn get_goal(&self, goal_id: i64) -> Result<Option<InvestmentGoal>> {
        self.get_goal_impl(goal_id)
    }

    async fn insert_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<InvestmentGoal> {
                let row = NewInvestmentGoalDB::from_domain(&new_goal, Utc::now().naive_utc())?;

                let inserted = diesel::insert_into(investment_goals::table)
                    .values(&row)
                    .returning(InvestmentGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted investment goal row {}", inserted.id);
                Ok(InvestmentGoal::try_from(inserted)?)
            })
            .await
    }

    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<Option<InvestmentGoal>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<InvestmentGoal>> {
                let current = investment_goals::table
                    .find(goal_id)
                    .select(InvestmentGoalDB::as_select())
                    .first::<InvestmentGoalDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                let Some(current) = current else {
                    return Ok(None);
                };

                let merged = InvestmentGoal::try_from(current)?.merge(changes);
                let row = InvestmentGoalChangesDB::from_domain(&merged, Utc::now().naive_utc())?;

                let updated = diesel::update(investment_goals::table.find(goal_id))
                    .set(&row)
                    .returning(InvestmentGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Updated investment goal row {}", goal_id);
                Ok(Some(InvestmentGoal::try_from(updated)?))
            })
            .await
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let removed = diesel::delete(investment_goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(removed > 0)
            })
            .await
    }
}
