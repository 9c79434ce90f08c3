use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::value_objects::dashboard::{CardSummaryDto, CustomerTotalsDto};

#[derive(Debug, Error)]
pub enum DashboardError {
    // Display stays generic; the cause is logged where the error is built.
    #[error("Something went wrong.")]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type UseCaseResult<T> = std::result::Result<T, DashboardError>;

/// Aggregates are derived from invoice rows on every call; caching them
/// would reintroduce the drift the data model rules out.
pub struct DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    dashboard_repo: Arc<D>,
}

impl<D> DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    pub fn new(dashboard_repo: Arc<D>) -> Self {
        Self { dashboard_repo }
    }

    pub async fn customer_totals(&self) -> UseCaseResult<Vec<CustomerTotalsDto>> {
        let totals = self.dashboard_repo.customer_totals().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to aggregate customer totals");
            DashboardError::Internal(err)
        })?;
        info!(customer_count = totals.len(), "dashboard: customer totals computed");
        Ok(totals)
    }

    pub async fn card_summary(&self) -> UseCaseResult<CardSummaryDto> {
        let summary = self.dashboard_repo.card_summary().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to compute card summary");
            DashboardError::Internal(err)
        })?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::dashboard::MockDashboardRepository;
    use anyhow::anyhow;
    use uuid::Uuid;

    #[tokio::test]
    async fn totals_pass_through_grouped_sums() {
        let mut repo = MockDashboardRepository::new();
        repo.expect_customer_totals().times(1).returning(|| {
            Ok(vec![CustomerTotalsDto {
                customer_id: Uuid::new_v4(),
                name: "Evil Rabbit".to_string(),
                email: "evil@rabbit.dev".to_string(),
                image_url: "https://i.pravatar.cc/300".to_string(),
                total_invoices: 3,
                total_pending: 300,
                total_paid: 1200,
            }])
        });

        let totals = DashboardUseCase::new(Arc::new(repo))
            .customer_totals()
            .await
            .unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total_invoices, 3);
        assert_eq!(totals[0].total_pending, 300);
        assert_eq!(totals[0].total_paid, 1200);
    }

    #[tokio::test]
    async fn aggregation_failure_displays_only_the_generic_message() {
        let mut repo = MockDashboardRepository::new();
        repo.expect_customer_totals()
            .times(1)
            .returning(|| Err(anyhow!("password authentication failed for user postgres")));

        let err = DashboardUseCase::new(Arc::new(repo))
            .customer_totals()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong.");
    }
}
