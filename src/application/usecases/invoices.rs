use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::usecases::ITEMS_PER_PAGE;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::forms::{FieldErrors, FormState};
use crate::domain::value_objects::invoices::{
    InvoiceDto, InvoiceFormModel, InvoiceListPageDto,
};
use crate::infrastructure::view_cache::{ViewCache, view_key};

const LISTING_PREFIX: &str = "invoices";

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("{message}")]
    Validation {
        errors: FieldErrors,
        message: String,
    },
    #[error("Invoice not found.")]
    NotFound,
    #[error("{0}")]
    Storage(String),
    // Display stays generic; the cause is logged where the error is built.
    #[error("Something went wrong.")]
    Internal(#[from] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            InvoiceError::NotFound => StatusCode::NOT_FOUND,
            InvoiceError::Storage(_) | InvoiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_form_state(self) -> FormState {
        match self {
            InvoiceError::Validation { errors, message } => {
                FormState::rejected(errors, &message)
            }
            other => FormState::failed(&other.to_string()),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, InvoiceError>;

pub struct InvoiceUseCase<I>
where
    I: InvoiceRepository + Send + Sync + 'static,
{
    invoice_repo: Arc<I>,
    view_cache: Arc<dyn ViewCache>,
}

impl<I> InvoiceUseCase<I>
where
    I: InvoiceRepository + Send + Sync + 'static,
{
    pub fn new(invoice_repo: Arc<I>, view_cache: Arc<dyn ViewCache>) -> Self {
        Self {
            invoice_repo,
            view_cache,
        }
    }

    pub async fn list(&self, filter: &str, page: i64) -> UseCaseResult<InvoiceListPageDto> {
        let page = page.max(1);
        let key = view_key(&[LISTING_PREFIX, filter, &page.to_string()]);

        if let Some(cached) = self.view_cache.read(&key) {
            if let Ok(dto) = serde_json::from_value::<InvoiceListPageDto>(cached) {
                info!(filter, page, "invoices: listing served from view cache");
                return Ok(dto);
            }
        }

        let invoices = self
            .invoice_repo
            .list(filter, ITEMS_PER_PAGE, (page - 1) * ITEMS_PER_PAGE)
            .await
            .map_err(|err| {
                error!(db_error = ?err, filter, page, "invoices: failed to list invoices");
                InvoiceError::Internal(err)
            })?;
        let total_pages = self.pages(filter).await?;

        let dto = InvoiceListPageDto {
            invoices,
            total_pages,
        };
        if let Ok(value) = serde_json::to_value(&dto) {
            self.view_cache.write(&key, value);
        }
        info!(
            filter,
            page,
            row_count = dto.invoices.len(),
            "invoices: listing recomputed"
        );
        Ok(dto)
    }

    pub async fn pages(&self, filter: &str) -> UseCaseResult<i64> {
        let count = self.invoice_repo.count(filter).await.map_err(|err| {
            error!(db_error = ?err, filter, "invoices: failed to count invoices");
            InvoiceError::Internal(err)
        })?;
        Ok((count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE)
    }

    pub async fn get(&self, invoice_id: Uuid) -> UseCaseResult<InvoiceDto> {
        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to load invoice");
                InvoiceError::Internal(err)
            })?;

        invoice.map(InvoiceDto::from).ok_or(InvoiceError::NotFound)
    }

    pub async fn create(&self, form: InvoiceFormModel) -> UseCaseResult<Uuid> {
        let validated = form.validate().map_err(|errors| InvoiceError::Validation {
            errors,
            message: "Missing Fields. Failed to Create Invoice.".to_string(),
        })?;

        // Creation date is server-assigned, never user-supplied.
        let entity = validated.into_insert_entity(Utc::now().date_naive());
        let invoice_id = self.invoice_repo.insert(entity).await.map_err(|err| {
            error!(db_error = ?err, "invoices: failed to insert invoice");
            InvoiceError::Storage("Database Error: Failed to Create Invoice.".to_string())
        })?;

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%invoice_id, "invoices: invoice created");
        Ok(invoice_id)
    }

    pub async fn update(&self, invoice_id: Uuid, form: InvoiceFormModel) -> UseCaseResult<()> {
        let validated = form.validate().map_err(|errors| InvoiceError::Validation {
            errors,
            message: "Missing Fields. Failed to Update Invoice.".to_string(),
        })?;

        let affected = self
            .invoice_repo
            .update(invoice_id, validated.into())
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to update invoice");
                InvoiceError::Storage("Database Error: Failed to Update Invoice.".to_string())
            })?;

        if affected == 0 {
            warn!(%invoice_id, "invoices: update matched no row");
            return Err(InvoiceError::Storage(
                "Database Error: Failed to Update Invoice.".to_string(),
            ));
        }

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%invoice_id, "invoices: invoice updated");
        Ok(())
    }

    pub async fn delete(&self, invoice_id: Uuid) -> UseCaseResult<usize> {
        let affected = self.invoice_repo.delete(invoice_id).await.map_err(|err| {
            error!(%invoice_id, db_error = ?err, "invoices: failed to delete invoice");
            InvoiceError::Storage("Database Error: Failed to Delete Invoice.".to_string())
        })?;

        // Deleting an id that is already gone is not a caller-visible fault.
        if affected == 0 {
            warn!(%invoice_id, "invoices: delete matched no row");
        }

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%invoice_id, affected, "invoices: invoice deleted");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::invoices::MockInvoiceRepository;
    use crate::domain::value_objects::invoices::InvoiceRowDto;
    use crate::infrastructure::view_cache::InMemoryViewCache;
    use anyhow::anyhow;
    use chrono::NaiveDate;

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn form(amount: &str, status: &str) -> InvoiceFormModel {
        InvoiceFormModel {
            customer_id: Some(CUSTOMER.to_string()),
            amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }

    fn row(amount: i32) -> InvoiceRowDto {
        InvoiceRowDto {
            id: Uuid::new_v4(),
            customer_id: Uuid::parse_str(CUSTOMER).unwrap(),
            customer_name: "Evil Rabbit".to_string(),
            customer_email: "evil@rabbit.dev".to_string(),
            customer_image_url: "https://i.pravatar.cc/300".to_string(),
            amount,
            status: "pending".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        }
    }

    fn usecase(repo: MockInvoiceRepository) -> InvoiceUseCase<MockInvoiceRepository> {
        InvoiceUseCase::new(Arc::new(repo), Arc::new(InMemoryViewCache::new()))
    }

    #[tokio::test]
    async fn create_stores_amount_in_cents() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_insert()
            .withf(|entity| entity.amount == 1999 && entity.status == "pending")
            .times(1)
            .returning(|_| Ok(Uuid::new_v4()));

        usecase(repo).create(form("19.99", "pending")).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount_without_touching_storage() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_insert().times(0);

        let err = usecase(repo).create(form("0", "pending")).await.unwrap_err();
        match err {
            InvoiceError::Validation { errors, message } => {
                assert!(errors.field("amount").is_some());
                assert_eq!(message, "Missing Fields. Failed to Create Invoice.");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_surfaces_generic_storage_message() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(anyhow!("connection refused")));

        let err = usecase(repo).create(form("19.99", "paid")).await.unwrap_err();
        match err {
            InvoiceError::Storage(message) => {
                assert_eq!(message, "Database Error: Failed to Create Invoice.");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_validates_as_strictly_as_create() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_update().times(0);

        let err = usecase(repo)
            .update(Uuid::new_v4(), form("19.99", "overdue"))
            .await
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_a_fault() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(0));

        let affected = usecase(repo).delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn listing_is_cached_until_a_mutation_invalidates_it() {
        let mut repo = MockInvoiceRepository::new();
        // Two loads around one insert: second list call must hit the store
        // again because create invalidated the cached page.
        repo.expect_list().times(2).returning(|_, _, _| Ok(vec![row(1999)]));
        repo.expect_count().times(2).returning(|_| Ok(1));
        repo.expect_insert().times(1).returning(|_| Ok(Uuid::new_v4()));

        let usecase = usecase(repo);
        let first = usecase.list("", 1).await.unwrap();
        assert_eq!(first.invoices.len(), 1);

        // Cached: no extra repository calls.
        usecase.list("", 1).await.unwrap();

        usecase.create(form("19.99", "pending")).await.unwrap();
        let after = usecase.list("", 1).await.unwrap();
        assert_eq!(after.invoices.len(), 1);
    }

    #[tokio::test]
    async fn get_distinguishes_not_found_from_storage_error() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        let err = usecase(repo).get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, InvoiceError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|_| Err(anyhow!("socket closed")));
        let err = usecase(repo).get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, InvoiceError::Internal(_)));
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn read_failure_displays_only_the_generic_message() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|_| Err(anyhow!("password authentication failed for user postgres")));

        let err = usecase(repo).get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong.");
    }

    #[tokio::test]
    async fn pages_rounds_up() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_count().times(1).returning(|_| Ok(13));
        assert_eq!(usecase(repo).pages("").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn empty_filter_result_is_an_empty_page() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_list().times(1).returning(|_, _, _| Ok(vec![]));
        repo.expect_count().times(1).returning(|_| Ok(0));

        let page = usecase(repo).list("no-such-customer", 1).await.unwrap();
        assert!(page.invoices.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
