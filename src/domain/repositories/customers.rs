use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::customers::{
    CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity,
};

#[automock]
#[async_trait]
pub trait CustomerRepository {
    /// Page of customers whose name or email contains `filter`
    /// (case-insensitive), ordered by name.
    async fn list(&self, filter: &str, limit: i64, offset: i64) -> Result<Vec<CustomerEntity>>;
    async fn count(&self, filter: &str) -> Result<i64>;
    /// Every customer, ordered by name; feeds the invoice form dropdown.
    async fn list_all(&self) -> Result<Vec<CustomerEntity>>;
    async fn find_by_id(&self, customer_id: Uuid) -> Result<Option<CustomerEntity>>;
    async fn insert(&self, insert_customer_entity: InsertCustomerEntity) -> Result<Uuid>;
    /// Returns the number of rows touched; 0 means the id did not match.
    async fn update(
        &self,
        customer_id: Uuid,
        update_customer_entity: UpdateCustomerEntity,
    ) -> Result<usize>;
    async fn delete(&self, customer_id: Uuid) -> Result<usize>;
}
