use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, sql_query, sql_types::BigInt};
use uuid::Uuid;

use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::value_objects::dashboard::{CardSummaryDto, CustomerTotalsDto};
use crate::infrastructure::postgres::postgres_connection::PgPool;

// Aggregates live nowhere but these queries; customers without invoices
// still show up with zeroed totals through the LEFT JOIN.
const CUSTOMER_TOTALS_QUERY: &str =
    "SELECT customers.id AS customer_id, \
            customers.name, \
            customers.email, \
            customers.image_url, \
            COUNT(invoices.id)::bigint AS total_invoices, \
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'pending'), 0)::bigint AS total_pending, \
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'paid'), 0)::bigint AS total_paid \
     FROM customers \
     LEFT JOIN invoices ON invoices.customer_id = customers.id \
     GROUP BY customers.id, customers.name, customers.email, customers.image_url \
     ORDER BY customers.name ASC";

const CARD_SUMMARY_QUERY: &str =
    "SELECT (SELECT COUNT(*) FROM customers)::bigint AS customer_count, \
            COUNT(invoices.id)::bigint AS invoice_count, \
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'pending'), 0)::bigint AS total_pending, \
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'paid'), 0)::bigint AS total_paid \
     FROM invoices";

pub struct DashboardPostgres {
    db_pool: Arc<PgPool>,
}

impl DashboardPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[derive(diesel::QueryableByName)]
struct CustomerTotalsRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    customer_id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    email: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    image_url: String,
    #[diesel(sql_type = BigInt)]
    total_invoices: i64,
    #[diesel(sql_type = BigInt)]
    total_pending: i64,
    #[diesel(sql_type = BigInt)]
    total_paid: i64,
}

#[derive(diesel::QueryableByName)]
struct CardSummaryRow {
    #[diesel(sql_type = BigInt)]
    customer_count: i64,
    #[diesel(sql_type = BigInt)]
    invoice_count: i64,
    #[diesel(sql_type = BigInt)]
    total_pending: i64,
    #[diesel(sql_type = BigInt)]
    total_paid: i64,
}

#[async_trait]
impl DashboardRepository for DashboardPostgres {
    async fn customer_totals(&self) -> Result<Vec<CustomerTotalsDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = sql_query(CUSTOMER_TOTALS_QUERY).load::<CustomerTotalsRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| CustomerTotalsDto {
                customer_id: row.customer_id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                total_invoices: row.total_invoices,
                total_pending: row.total_pending,
                total_paid: row.total_paid,
            })
            .collect())
    }

    async fn card_summary(&self) -> Result<CardSummaryDto> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = sql_query(CARD_SUMMARY_QUERY).get_result::<CardSummaryRow>(&mut conn)?;

        Ok(CardSummaryDto {
            customer_count: row.customer_count,
            invoice_count: row.invoice_count,
            total_pending: row.total_pending,
            total_paid: row.total_paid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These queries cannot run against a mock, so the tests pin the parts of
    // their shape the row structs and the totals semantics depend on.

    #[test]
    fn customer_totals_query_keeps_customers_without_invoices() {
        assert!(CUSTOMER_TOTALS_QUERY.contains("LEFT JOIN invoices"));
        assert!(CUSTOMER_TOTALS_QUERY.contains("GROUP BY customers.id"));
        assert!(CUSTOMER_TOTALS_QUERY.contains("ORDER BY customers.name ASC"));
    }

    #[test]
    fn customer_totals_query_splits_sums_by_status() {
        assert!(CUSTOMER_TOTALS_QUERY.contains("COUNT(invoices.id)::bigint AS total_invoices"));
        assert!(CUSTOMER_TOTALS_QUERY.contains(
            "COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'pending'), 0)::bigint AS total_pending"
        ));
        assert!(CUSTOMER_TOTALS_QUERY.contains(
            "COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'paid'), 0)::bigint AS total_paid"
        ));
    }

    #[test]
    fn card_summary_query_counts_both_tables_and_splits_sums() {
        assert!(CARD_SUMMARY_QUERY.contains("(SELECT COUNT(*) FROM customers)::bigint AS customer_count"));
        assert!(CARD_SUMMARY_QUERY.contains("COUNT(invoices.id)::bigint AS invoice_count"));
        assert!(CARD_SUMMARY_QUERY.contains("FILTER (WHERE invoices.status = 'pending')"));
        assert!(CARD_SUMMARY_QUERY.contains("FILTER (WHERE invoices.status = 'paid')"));
    }
}
