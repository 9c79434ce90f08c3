use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::customers;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = customers)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub struct InsertCustomerEntity {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
pub struct UpdateCustomerEntity {
    pub name: String,
    pub email: String,
    pub image_url: String,
}
