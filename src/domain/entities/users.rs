use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    // Argon2 PHC-format hash, never the plaintext credential.
    pub password: String,
}
