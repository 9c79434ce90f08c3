use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, delete,
    dsl::sql,
    insert_into,
    prelude::*,
    sql_types::{Bool, Text},
    update,
};
use uuid::Uuid;

use crate::domain::entities::customers::CustomerEntity;
use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InvoiceEntity, UpdateInvoiceEntity,
};
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::invoices::InvoiceRowDto;
use crate::infrastructure::postgres::{
    postgres_connection::PgPool,
    schema::{customers, invoices},
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPool>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn list(&self, filter: &str, limit: i64, offset: i64) -> Result<Vec<InvoiceRowDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let pattern = format!("%{}%", filter);

        // Humans type the filter box against what they see on screen, so the
        // amount column has to match as rendered text too. The cast stays on
        // the column side; the pattern is still a bound parameter.
        let rows = invoices::table
            .inner_join(customers::table)
            .filter(
                customers::name
                    .ilike(pattern.clone())
                    .or(customers::email.ilike(pattern.clone()))
                    .or(invoices::status.ilike(pattern.clone()))
                    .or(sql::<Bool>("invoices.amount::text ILIKE ").bind::<Text, _>(pattern)),
            )
            .order((invoices::date.desc(), invoices::id.asc()))
            .limit(limit)
            .offset(offset)
            .select((InvoiceEntity::as_select(), CustomerEntity::as_select()))
            .load::<(InvoiceEntity, CustomerEntity)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(invoice, customer)| InvoiceRowDto {
                id: invoice.id,
                customer_id: customer.id,
                customer_name: customer.name,
                customer_email: customer.email,
                customer_image_url: customer.image_url,
                amount: invoice.amount,
                status: invoice.status,
                date: invoice.date,
            })
            .collect())
    }

    async fn count(&self, filter: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let pattern = format!("%{}%", filter);

        let total = invoices::table
            .inner_join(customers::table)
            .filter(
                customers::name
                    .ilike(pattern.clone())
                    .or(customers::email.ilike(pattern.clone()))
                    .or(invoices::status.ilike(pattern.clone()))
                    .or(sql::<Bool>("invoices.amount::text ILIKE ").bind::<Text, _>(pattern)),
            )
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = invoices::table
            .find(invoice_id)
            .select(InvoiceEntity::as_select())
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(invoices::table)
            .values(&insert_invoice_entity)
            .returning(invoices::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        invoice_id: Uuid,
        update_invoice_entity: UpdateInvoiceEntity,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(invoices::table.find(invoice_id))
            .set(&update_invoice_entity)
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, invoice_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(invoices::table.find(invoice_id)).execute(&mut conn)?;

        Ok(affected)
    }
}
