//! Goals module - domain models, validation, services, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;
mod goals_validation;

pub use goals_model::{
    split_amount_evenly, GoalFilters, GoalList, InvestmentGoal, InvestmentGoalUpdate, Month,
    NewInvestmentGoal, UnknownMonth,
};
pub use goals_service::InvestmentGoalService;
pub use goals_traits::{InvestmentGoalRepositoryTrait, InvestmentGoalServiceTrait};
pub use goals_validation::{
    parse_goal_id, validate_goal_filters, validate_goal_update, validate_new_goal, GoalDraft,
};
