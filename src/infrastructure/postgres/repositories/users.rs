use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};

use crate::domain::entities::users::UserEntity;
use crate::domain::repositories::users::UserRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPool, schema::users};

pub struct UserPostgres {
    db_pool: Arc<PgPool>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
