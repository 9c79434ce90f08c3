use anyhow::{Context, Result};

use super::config_model::{Database, DotEnvyConfig, Server, Session};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is missing")?,
    };

    let session = Session {
        jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET is missing")?,
        ttl_seconds: std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("SESSION_TTL_SECONDS is invalid")?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        session,
    })
}

/// Session secret alone, for request-scoped token checks.
pub fn get_session_secret() -> Result<String> {
    dotenvy::dotenv().ok();

    std::env::var("JWT_SECRET").context("JWT_SECRET is missing")
}
