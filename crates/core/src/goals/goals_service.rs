use crate::errors::Result;
use crate::goals::goals_model::{
    GoalFilters, GoalList, InvestmentGoal, InvestmentGoalUpdate, NewInvestmentGoal,
};
use crate::goals::goals_traits::{InvestmentGoalRepositoryTrait, InvestmentGoalServiceTrait};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

pub struct InvestmentGoalService<T: InvestmentGoalRepositoryTrait> {
    goal_repo: Arc<T>,
}

impl<T: InvestmentGoalRepositoryTrait> InvestmentGoalService<T> {
    pub fn new(goal_repo: Arc<T>) -> Self {
        InvestmentGoalService { goal_repo }
    }
}

#[async_trait]
impl<T: InvestmentGoalRepositoryTrait + Send + Sync> InvestmentGoalServiceTrait
    for InvestmentGoalService<T>
{
    fn list_goals(&self, filters: GoalFilters) -> Result<GoalList> {
        let goals = self.goal_repo.list_goals(&filters)?;
        debug!("Listed {} goals for filters {:?}", goals.len(), filters);
        Ok(GoalList::from(goals))
    }

    fn get_goal(&self, goal_id: i64) -> Result<Option<InvestmentGoal>> {
        self.goal_repo.get_goal(goal_id)
    }

    async fn create_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal> {
        let goal = self.goal_repo.insert_goal(new_goal).await?;
        info!("Created investment goal {}", goal.id);
        Ok(goal)
    }

    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<Option<InvestmentGoal>> {
        let updated = self.goal_repo.update_goal(goal_id, changes).await?;
        if updated.is_some() {
            info!("Updated investment goal {}", goal_id);
        }
        Ok(updated)
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<bool> {
        let deleted = self.goal_repo.delete_goal(goal_id).await?;
        if deleted {
            info!("Deleted investment goal {}", goal_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::goals_model::Month;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockGoalRepository {
        goals: RwLock<Vec<InvestmentGoal>>,
    }

    #[async_trait]
    impl InvestmentGoalRepositoryTrait for MockGoalRepository {
        fn list_goals(&self, filters: &GoalFilters) -> Result<Vec<InvestmentGoal>> {
            let needle = filters.name.as_ref().map(|n| n.to_lowercase());
            let mut goals: Vec<InvestmentGoal> = self
                .goals
                .read()
                .unwrap()
                .iter()
                .filter(|g| {
                    needle
                        .as_ref()
                        .map_or(true, |n| g.name.to_lowercase().contains(n))
                })
                .filter(|g| filters.month.map_or(true, |m| g.months.contains(&m)))
                .cloned()
                .collect();
            goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(goals)
        }

        fn get_goal(&self, goal_id: i64) -> Result<Option<InvestmentGoal>> {
            Ok(self
                .goals
                .read()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id)
                .cloned())
        }

        async fn insert_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal> {
            let mut goals = self.goals.write().unwrap();
            // Spread creation times so ordering is observable
            let created_at = Utc::now() + Duration::seconds(goals.len() as i64);
            let goal = InvestmentGoal {
                id: goals.len() as i64 + 1,
                amount_per_month: new_goal.amount_per_month(),
                name: new_goal.name,
                months: new_goal.months,
                amount: new_goal.amount,
                created_at,
                updated_at: created_at,
            };
            goals.push(goal.clone());
            Ok(goal)
        }

        async fn update_goal(
            &self,
            goal_id: i64,
            changes: InvestmentGoalUpdate,
        ) -> Result<Option<InvestmentGoal>> {
            let mut goals = self.goals.write().unwrap();
            let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) else {
                return Ok(None);
            };
            let merged = goal.merge(changes);
            goal.amount_per_month = merged.amount_per_month();
            goal.name = merged.name;
            goal.months = merged.months;
            goal.amount = merged.amount;
            goal.updated_at = Utc::now();
            Ok(Some(goal.clone()))
        }

        async fn delete_goal(&self, goal_id: i64) -> Result<bool> {
            let mut goals = self.goals.write().unwrap();
            let before = goals.len();
            goals.retain(|g| g.id != goal_id);
            Ok(goals.len() != before)
        }
    }

    fn service() -> InvestmentGoalService<MockGoalRepository> {
        InvestmentGoalService::new(Arc::new(MockGoalRepository::default()))
    }

    fn new_goal(name: &str, months: Vec<Month>, amount: rust_decimal::Decimal) -> NewInvestmentGoal {
        NewInvestmentGoal {
            name: name.to_string(),
            months,
            amount,
        }
    }

    #[tokio::test]
    async fn test_create_goal_splits_amount() {
        let service = service();
        let goal = service
            .create_goal(new_goal(
                "Car",
                vec![Month::January, Month::February],
                dec!(1000.00),
            ))
            .await
            .unwrap();

        assert_eq!(goal.amount_per_month, dec!(500.00));
        assert_eq!(service.get_goal(goal.id).unwrap(), Some(goal));
    }

    #[tokio::test]
    async fn test_list_goals_reports_total_and_order() {
        let service = service();
        service
            .create_goal(new_goal("Summer trip", vec![Month::July], dec!(100)))
            .await
            .unwrap();
        service
            .create_goal(new_goal("Car", vec![Month::July, Month::May], dec!(100)))
            .await
            .unwrap();
        service
            .create_goal(new_goal("Winter TRIP", vec![Month::December], dec!(100)))
            .await
            .unwrap();

        let all = service.list_goals(GoalFilters::default()).unwrap();
        assert_eq!(all.total, 3);
        assert_eq!(all.data[0].name, "Winter TRIP");

        let trips = service
            .list_goals(GoalFilters {
                name: Some("Trip".to_string()),
                month: None,
            })
            .unwrap();
        assert_eq!(trips.total, 2);

        let july_trips = service
            .list_goals(GoalFilters {
                name: Some("trip".to_string()),
                month: Some(Month::July),
            })
            .unwrap();
        assert_eq!(july_trips.total, 1);
        assert_eq!(july_trips.data[0].name, "Summer trip");
    }

    #[tokio::test]
    async fn test_update_missing_goal_returns_none() {
        let service = service();
        let result = service
            .update_goal(
                99,
                InvestmentGoalUpdate {
                    amount: Some(dec!(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_goal_twice() {
        let service = service();
        let goal = service
            .create_goal(new_goal("Car", vec![Month::April], dec!(10)))
            .await
            .unwrap();

        assert!(service.delete_goal(goal.id).await.unwrap());
        assert!(!service.delete_goal(goal.id).await.unwrap());
        assert!(service.get_goal(goal.id).unwrap().is_none());
    }
}
