use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::usecases::customers::CustomerUseCase;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::CustomerFormModel;
use crate::infrastructure::axum_http::auth::AuthUser;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool, repositories::customers::CustomerPostgres,
};
use crate::infrastructure::view_cache::ViewCache;

pub fn routes(db_pool: Arc<PgPool>, view_cache: Arc<dyn ViewCache>) -> Router {
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let customer_usecase = CustomerUseCase::new(Arc::new(customer_repository), view_cache);

    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/pages", get(count_customer_pages))
        .route("/all", get(list_customer_fields))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(Arc::new(customer_usecase))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
}

pub async fn list_customers<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase
        .list(&params.query, params.page.unwrap_or(1))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn count_customer_pages<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.pages(&params.query).await {
        Ok(total_pages) => (StatusCode::OK, Json(total_pages)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn list_customer_fields<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.list_all().await {
        Ok(fields) => (StatusCode::OK, Json(fields)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn get_customer<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.get(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        // NotFound maps to 404 through status_code(), distinct from storage
        // failures.
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn create_customer<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Json(form): Json<CustomerFormModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.create(form).await {
        Ok(_) => Redirect::to("/dashboard/customers").into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}

pub async fn update_customer<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Path(customer_id): Path<Uuid>,
    Json(form): Json<CustomerFormModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.update(customer_id, form).await {
        Ok(()) => Redirect::to("/dashboard/customers").into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}

pub async fn delete_customer<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    _auth: AuthUser,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.delete(customer_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}
