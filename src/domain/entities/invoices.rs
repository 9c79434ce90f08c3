use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::invoices;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub struct UpdateInvoiceEntity {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
}
