use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use uuid::Uuid;

use crate::application::usecases::invoices::InvoiceUseCase;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::invoices::InvoiceFormModel;
use crate::infrastructure::axum_http::auth::AuthUser;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::axum_http::routers::customers::ListQuery;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool, repositories::invoices::InvoicePostgres,
};
use crate::infrastructure::view_cache::ViewCache;

pub fn routes(db_pool: Arc<PgPool>, view_cache: Arc<dyn ViewCache>) -> Router {
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let invoice_usecase = InvoiceUseCase::new(Arc::new(invoice_repository), view_cache);

    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/pages", get(count_invoice_pages))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .with_state(Arc::new(invoice_usecase))
}

pub async fn list_invoices<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase
        .list(&params.query, params.page.unwrap_or(1))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn count_invoice_pages<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase.pages(&params.query).await {
        Ok(total_pages) => (StatusCode::OK, Json(total_pages)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn get_invoice<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase.get(invoice_id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(err) => error_response(err.status_code(), &err.to_string()),
    }
}

pub async fn create_invoice<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Json(form): Json<InvoiceFormModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase.create(form).await {
        Ok(_) => Redirect::to("/dashboard/invoices").into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}

pub async fn update_invoice<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
    Json(form): Json<InvoiceFormModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase.update(invoice_id, form).await {
        Ok(()) => Redirect::to("/dashboard/invoices").into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}

pub async fn delete_invoice<I>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
{
    match invoice_usecase.delete(invoice_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(err.into_form_state())).into_response()
        }
    }
}
