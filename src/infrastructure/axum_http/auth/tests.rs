use super::*;
use axum::http::Request;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

use crate::domain::value_objects::auth::SessionClaims;

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", SECRET);
    }
}

fn token_for(sub: &str, exp: usize) -> String {
    let claims = SessionClaims {
        sub: sub.to_string(),
        email: "user@nextmail.com".to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn parts_with_cookie(token: &str) -> Parts {
    let request = Request::builder()
        .uri("/api/v1/customers")
        .header("cookie", format!("{}={}", SESSION_COOKIE, token))
        .body(())
        .unwrap();
    request.into_parts().0
}

#[tokio::test]
async fn valid_session_cookie_yields_auth_user() {
    set_env_vars();
    let token = token_for("123e4567-e89b-12d3-a456-426614174000", 9999999999);
    let mut parts = parts_with_cookie(&token);

    let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(
        auth.user_id.to_string(),
        "123e4567-e89b-12d3-a456-426614174000"
    );
    assert_eq!(auth.email, "user@nextmail.com");
}

#[tokio::test]
async fn bearer_header_works_without_cookie() {
    set_env_vars();
    let token = token_for("123e4567-e89b-12d3-a456-426614174000", 9999999999);
    let request = Request::builder()
        .uri("/api/v1/customers")
        .header("authorization", format!("Bearer {}", token))
        .body(())
        .unwrap();
    let mut parts = request.into_parts().0;

    assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_ok());
}

#[tokio::test]
async fn missing_session_redirects_to_login() {
    set_env_vars();
    let request = Request::builder().uri("/api/v1/customers").body(()).unwrap();
    let mut parts = request.into_parts().0;

    let rejection = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    let response = rejection.into_response();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn expired_session_redirects_to_login() {
    set_env_vars();
    let token = token_for("123e4567-e89b-12d3-a456-426614174000", 1);
    let mut parts = parts_with_cookie(&token);

    assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
}

#[tokio::test]
async fn garbage_subject_redirects_to_login() {
    set_env_vars();
    let token = token_for("not-a-uuid", 9999999999);
    let mut parts = parts_with_cookie(&token);

    assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
}
