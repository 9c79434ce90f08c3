use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InvoiceEntity, UpdateInvoiceEntity,
};
use crate::domain::value_objects::invoices::InvoiceRowDto;

#[automock]
#[async_trait]
pub trait InvoiceRepository {
    /// Page of invoices joined with their customer. `filter` matches the
    /// customer name/email, the status, or the stringified amount.
    async fn list(&self, filter: &str, limit: i64, offset: i64) -> Result<Vec<InvoiceRowDto>>;
    async fn count(&self, filter: &str) -> Result<i64>;
    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>>;
    async fn insert(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<Uuid>;
    /// Returns the number of rows touched; 0 means the id did not match.
    async fn update(
        &self,
        invoice_id: Uuid,
        update_invoice_entity: UpdateInvoiceEntity,
    ) -> Result<usize>;
    async fn delete(&self, invoice_id: Uuid) -> Result<usize>;
}
