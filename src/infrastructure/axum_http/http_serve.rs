use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::config_model::DotEnvyConfig;
use crate::infrastructure::axum_http::{default_routers, routers};
use crate::infrastructure::postgres::postgres_connection::PgPool;
use crate::infrastructure::view_cache::{InMemoryViewCache, ViewCache};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPool>) -> Result<()> {
    // One cache instance for the whole process; customer and invoice
    // mutations invalidate their own listing prefix in it.
    let view_cache: Arc<dyn ViewCache> = Arc::new(InMemoryViewCache::new());

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/customers",
            routers::customers::routes(Arc::clone(&db_pool), Arc::clone(&view_cache)),
        )
        .nest(
            "/api/v1/invoices",
            routers::invoices::routes(Arc::clone(&db_pool), Arc::clone(&view_cache)),
        )
        .nest(
            "/api/v1/dashboard",
            routers::dashboard::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/api/v1/auth",
            routers::authentication::routes(Arc::clone(&db_pool), &config.session),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, COOKIE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
