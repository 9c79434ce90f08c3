use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::dashboard::{CardSummaryDto, CustomerTotalsDto};

#[automock]
#[async_trait]
pub trait DashboardRepository {
    /// Invoice amounts summed per customer and status, recomputed from the
    /// invoice rows on every call.
    async fn customer_totals(&self) -> Result<Vec<CustomerTotalsDto>>;
    async fn card_summary(&self) -> Result<CardSummaryDto>;
}
