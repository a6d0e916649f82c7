use std::sync::Arc;

use crate::{
    config::Config,
    error::{ApiError, ErrorBody},
    main_lib::AppState,
    models::{
        HealthResponse, InvestmentGoalListResponse, InvestmentGoalResponse,
        InvestmentGoalUpdateRequest, NewInvestmentGoalRequest,
    },
};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod extract;
pub mod goals;
pub mod health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investment Goals API",
        description = "Create, list, update and delete investment goals spread over calendar months"
    ),
    paths(
        health::health,
        goals::create_goal,
        goals::list_goals,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal
    ),
    components(schemas(
        InvestmentGoalResponse,
        InvestmentGoalListResponse,
        NewInvestmentGoalRequest,
        InvestmentGoalUpdateRequest,
        HealthResponse,
        ErrorBody
    )),
    tags((name = "Investment Goals", description = "Investment goal management"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect::<Vec<_>>();
    cors.allow_origin(origins)
}

/// Replaces the empty 408 produced by the timeout layer with an error body.
async fn timeout_error_body(
    State(timeout_ms): State<u128>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out after {} ms", timeout_ms);
        return ApiError::Timeout(timeout_ms).into_response();
    }
    response
}

fn with_layers(router: Router, config: &Config) -> Router {
    // The last layer added is outermost; the request id is set before it is propagated.
    router
        .layer(cors_layer(config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(middleware::from_fn_with_state(
            config.request_timeout.as_millis(),
            timeout_error_body,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let router = Router::new()
        .merge(health::router())
        .merge(goals::router())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .with_state(state);
    with_layers(router, config)
}
