use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::customers::{
    CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity,
};
use crate::domain::repositories::customers::CustomerRepository;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool,
    schema::customers,
};

pub struct CustomerPostgres {
    db_pool: Arc<PgPool>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn list(&self, filter: &str, limit: i64, offset: i64) -> Result<Vec<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let pattern = format!("%{}%", filter);

        let results = customers::table
            .filter(
                customers::name
                    .ilike(&pattern)
                    .or(customers::email.ilike(&pattern)),
            )
            .order(customers::name.asc())
            .limit(limit)
            .offset(offset)
            .select(CustomerEntity::as_select())
            .load::<CustomerEntity>(&mut conn)?;

        Ok(results)
    }

    async fn count(&self, filter: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let pattern = format!("%{}%", filter);

        let total = customers::table
            .filter(
                customers::name
                    .ilike(&pattern)
                    .or(customers::email.ilike(&pattern)),
            )
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn list_all(&self) -> Result<Vec<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = customers::table
            .order(customers::name.asc())
            .select(CustomerEntity::as_select())
            .load::<CustomerEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, customer_id: Uuid) -> Result<Option<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = customers::table
            .find(customer_id)
            .select(CustomerEntity::as_select())
            .first::<CustomerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(&self, insert_customer_entity: InsertCustomerEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(customers::table)
            .values(&insert_customer_entity)
            .returning(customers::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        customer_id: Uuid,
        update_customer_entity: UpdateCustomerEntity,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(customers::table.find(customer_id))
            .set(&update_customer_entity)
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, customer_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(customers::table.find(customer_id)).execute(&mut conn)?;

        Ok(affected)
    }
}
