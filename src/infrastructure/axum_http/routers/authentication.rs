use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use cookie::{Cookie, SameSite, time::Duration as CookieDuration};

use crate::application::usecases::authentication::AuthUseCase;
use crate::config::config_model::Session;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::auth::LoginModel;
use crate::domain::value_objects::forms::FormState;
use crate::infrastructure::axum_http::auth::SESSION_COOKIE;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool, repositories::users::UserPostgres,
};

pub fn routes(db_pool: Arc<PgPool>, session: &Session) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(
        Arc::new(user_repository),
        session.jwt_secret.clone(),
        session.ttl_seconds,
    );

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(Arc::new(auth_usecase))
}

pub async fn login<U>(
    State(auth_usecase): State<Arc<AuthUseCase<U>>>,
    jar: CookieJar,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
{
    let ttl_seconds = auth_usecase.session_ttl_seconds();

    match auth_usecase.login(login_model).await {
        Ok(token) => {
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .max_age(CookieDuration::seconds(ttl_seconds))
                .build();
            (jar.add(cookie), Redirect::to("/dashboard")).into_response()
        }
        Err(err) => {
            let status = err.status_code();
            (status, Json(FormState::failed(&err.to_string()))).into_response()
        }
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build();
    (jar.remove(removal), Redirect::to("/login")).into_response()
}
