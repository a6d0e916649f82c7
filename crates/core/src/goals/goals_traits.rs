use crate::errors::Result;
use crate::goals::goals_model::{
    GoalFilters, GoalList, InvestmentGoal, InvestmentGoalUpdate, NewInvestmentGoal,
};
use async_trait::async_trait;

/// Trait for investment goal repository operations
///
/// Reads run on pooled connections; writes are async because they are queued
/// on the storage writer.
#[async_trait]
pub trait InvestmentGoalRepositoryTrait: Send + Sync {
    /// Goals matching every supplied filter, most recently created first.
    fn list_goals(&self, filters: &GoalFilters) -> Result<Vec<InvestmentGoal>>;
    fn get_goal(&self, goal_id: i64) -> Result<Option<InvestmentGoal>>;
    async fn insert_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal>;
    /// Returns `None` when no goal has this id.
    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<Option<InvestmentGoal>>;
    /// Returns whether a row was removed.
    async fn delete_goal(&self, goal_id: i64) -> Result<bool>;
}

/// Trait for investment goal service operations
#[async_trait]
pub trait InvestmentGoalServiceTrait: Send + Sync {
    fn list_goals(&self, filters: GoalFilters) -> Result<GoalList>;
    fn get_goal(&self, goal_id: i64) -> Result<Option<InvestmentGoal>>;
    async fn create_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal>;
    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<Option<InvestmentGoal>>;
    async fn delete_goal(&self, goal_id: i64) -> Result<bool>;
}
