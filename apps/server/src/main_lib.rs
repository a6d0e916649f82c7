use std::sync::Arc;

use crate::config::Config;
use investment_goals_core::goals::{InvestmentGoalService, InvestmentGoalServiceTrait};
use investment_goals_storage_sqlite::{
    create_pool, goals::InvestmentGoalRepository, init, run_migrations, spawn_writer,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn InvestmentGoalServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.database_url)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;

    let goal_repository = Arc::new(InvestmentGoalRepository::new(pool, writer));
    let goal_service = Arc::new(InvestmentGoalService::new(goal_repository));

    Ok(Arc::new(AppState { goal_service }))
}
