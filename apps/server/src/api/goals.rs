use std::sync::Arc;

use crate::{
    api::extract::{JsonBody, PathParam, QueryParams},
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{
        InvestmentGoalListResponse, InvestmentGoalResponse, InvestmentGoalUpdateRequest,
        ListGoalsQuery, NewInvestmentGoalRequest,
    },
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use investment_goals_core::{
    goals::{parse_goal_id, validate_goal_filters, validate_goal_update, validate_new_goal},
    Error as CoreError,
};

fn goal_id(raw: &str) -> ApiResult<i64> {
    Ok(parse_goal_id(raw).map_err(CoreError::from)?)
}

#[utoipa::path(
    post,
    path = "/goals",
    tag = "Investment Goals",
    request_body = NewInvestmentGoalRequest,
    responses(
        (status = 201, description = "Goal created", body = InvestmentGoalResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
    )
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<NewInvestmentGoalRequest>,
) -> ApiResult<(StatusCode, Json<InvestmentGoalResponse>)> {
    let new_goal = validate_new_goal(payload.into()).map_err(CoreError::from)?;
    let goal = state.goal_service.create_goal(new_goal).await?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

#[utoipa::path(
    get,
    path = "/goals",
    tag = "Investment Goals",
    params(ListGoalsQuery),
    responses(
        (status = 200, description = "Goals matching the filters, newest first", body = InvestmentGoalListResponse),
        (status = 400, description = "Unknown month", body = ErrorBody),
    )
)]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<ListGoalsQuery>,
) -> ApiResult<Json<InvestmentGoalListResponse>> {
    let filters = validate_goal_filters(query.name, query.month).map_err(CoreError::from)?;
    let goals = state.goal_service.list_goals(filters)?;
    Ok(Json(goals.into()))
}

#[utoipa::path(
    get,
    path = "/goals/{id}",
    tag = "Investment Goals",
    params(("id" = i64, Path, description = "Goal id")),
    responses(
        (status = 200, description = "The goal", body = InvestmentGoalResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No goal with this id", body = ErrorBody),
    )
)]
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> ApiResult<Json<InvestmentGoalResponse>> {
    let id = goal_id(&id)?;
    let goal = state
        .goal_service
        .get_goal(id)?
        .ok_or_else(|| ApiError::goal_not_found(id))?;
    Ok(Json(goal.into()))
}

#[utoipa::path(
    put,
    path = "/goals/{id}",
    tag = "Investment Goals",
    params(("id" = i64, Path, description = "Goal id")),
    request_body = InvestmentGoalUpdateRequest,
    responses(
        (status = 200, description = "The updated goal", body = InvestmentGoalResponse),
        (status = 400, description = "Invalid id or input", body = ErrorBody),
        (status = 404, description = "No goal with this id", body = ErrorBody),
    )
)]
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
    JsonBody(payload): JsonBody<InvestmentGoalUpdateRequest>,
) -> ApiResult<Json<InvestmentGoalResponse>> {
    let id = goal_id(&id)?;
    let changes = validate_goal_update(payload.into()).map_err(CoreError::from)?;
    let goal = state
        .goal_service
        .update_goal(id, changes)
        .await?
        .ok_or_else(|| ApiError::goal_not_found(id))?;
    Ok(Json(goal.into()))
}

#[utoipa::path(
    delete,
    path = "/goals/{id}",
    tag = "Investment Goals",
    params(("id" = i64, Path, description = "Goal id")),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No goal with this id", body = ErrorBody),
    )
)]
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> ApiResult<StatusCode> {
    let id = goal_id(&id)?;
    if state.goal_service.delete_goal(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::goal_not_found(id))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}
