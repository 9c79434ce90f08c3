use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::application::usecases::dashboard::DashboardUseCase;
use crate::domain::repositories::dashboard::DashboardRepository;
use crate::infrastructure::axum_http::auth::AuthUser;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool, repositories::dashboard::DashboardPostgres,
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let dashboard_repository = DashboardPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardUseCase::new(Arc::new(dashboard_repository));

    Router::new()
        .route("/totals", get(customer_totals))
        .route("/cards", get(card_summary))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn customer_totals<D>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<D>>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    D: DashboardRepository + Send + Sync,
{
    match dashboard_usecase.customer_totals().await {
        Ok(totals) => (StatusCode::OK, Json(totals)).into_response(),
        Err(err) => error_response(err.status_code(), "Something went wrong."),
    }
}

pub async fn card_summary<D>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<D>>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    D: DashboardRepository + Send + Sync,
{
    match dashboard_usecase.card_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err.status_code(), "Something went wrong."),
    }
}
