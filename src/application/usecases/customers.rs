use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::usecases::ITEMS_PER_PAGE;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::{
    CustomerDto, CustomerFieldDto, CustomerFormModel, CustomerListPageDto,
};
use crate::domain::value_objects::forms::{FieldErrors, FormState};
use crate::infrastructure::view_cache::{ViewCache, view_key};

const LISTING_PREFIX: &str = "customers";

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("{message}")]
    Validation {
        errors: FieldErrors,
        message: String,
    },
    #[error("Customer not found.")]
    NotFound,
    #[error("{0}")]
    Storage(String),
    // Display stays generic; the cause is logged where the error is built.
    #[error("Something went wrong.")]
    Internal(#[from] anyhow::Error),
}

impl CustomerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CustomerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CustomerError::NotFound => StatusCode::NOT_FOUND,
            CustomerError::Storage(_) | CustomerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_form_state(self) -> FormState {
        match self {
            CustomerError::Validation { errors, message } => {
                FormState::rejected(errors, &message)
            }
            other => FormState::failed(&other.to_string()),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CustomerError>;

pub struct CustomerUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    customer_repo: Arc<C>,
    view_cache: Arc<dyn ViewCache>,
}

impl<C> CustomerUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    pub fn new(customer_repo: Arc<C>, view_cache: Arc<dyn ViewCache>) -> Self {
        Self {
            customer_repo,
            view_cache,
        }
    }

    pub async fn list(&self, filter: &str, page: i64) -> UseCaseResult<CustomerListPageDto> {
        let page = page.max(1);
        let key = view_key(&[LISTING_PREFIX, filter, &page.to_string()]);

        if let Some(cached) = self.view_cache.read(&key) {
            if let Ok(dto) = serde_json::from_value::<CustomerListPageDto>(cached) {
                info!(filter, page, "customers: listing served from view cache");
                return Ok(dto);
            }
        }

        let customers = self
            .customer_repo
            .list(filter, ITEMS_PER_PAGE, (page - 1) * ITEMS_PER_PAGE)
            .await
            .map_err(|err| {
                error!(db_error = ?err, filter, page, "customers: failed to list customers");
                CustomerError::Internal(err)
            })?
            .into_iter()
            .map(CustomerDto::from)
            .collect();
        let total_pages = self.pages(filter).await?;

        let dto = CustomerListPageDto {
            customers,
            total_pages,
        };
        if let Ok(value) = serde_json::to_value(&dto) {
            self.view_cache.write(&key, value);
        }
        info!(
            filter,
            page,
            row_count = dto.customers.len(),
            "customers: listing recomputed"
        );
        Ok(dto)
    }

    pub async fn pages(&self, filter: &str) -> UseCaseResult<i64> {
        let count = self.customer_repo.count(filter).await.map_err(|err| {
            error!(db_error = ?err, filter, "customers: failed to count customers");
            CustomerError::Internal(err)
        })?;
        Ok((count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE)
    }

    /// Id/name pairs for the invoice form dropdown, unpaginated.
    pub async fn list_all(&self) -> UseCaseResult<Vec<CustomerFieldDto>> {
        let customers = self.customer_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "customers: failed to load customer fields");
            CustomerError::Internal(err)
        })?;
        Ok(customers.into_iter().map(CustomerFieldDto::from).collect())
    }

    pub async fn get(&self, customer_id: Uuid) -> UseCaseResult<CustomerDto> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "customers: failed to load customer");
                CustomerError::Internal(err)
            })?;

        customer.map(CustomerDto::from).ok_or(CustomerError::NotFound)
    }

    pub async fn create(&self, form: CustomerFormModel) -> UseCaseResult<Uuid> {
        let validated = form.validate().map_err(|errors| CustomerError::Validation {
            errors,
            message: "Missing Fields. Failed to Create New Customer.".to_string(),
        })?;

        let customer_id = self
            .customer_repo
            .insert(validated.into())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "customers: failed to insert customer");
                CustomerError::Storage(
                    "Database Error: Failed to Create New Customer.".to_string(),
                )
            })?;

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%customer_id, "customers: customer created");
        Ok(customer_id)
    }

    pub async fn update(&self, customer_id: Uuid, form: CustomerFormModel) -> UseCaseResult<()> {
        let validated = form.validate().map_err(|errors| CustomerError::Validation {
            errors,
            message: "Missing Fields. Failed to Update Customer.".to_string(),
        })?;

        let affected = self
            .customer_repo
            .update(customer_id, validated.into())
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "customers: failed to update customer");
                CustomerError::Storage("Database Error: Failed to Update Customer.".to_string())
            })?;

        if affected == 0 {
            warn!(%customer_id, "customers: update matched no row");
            return Err(CustomerError::Storage(
                "Database Error: Failed to Update Customer.".to_string(),
            ));
        }

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%customer_id, "customers: customer updated");
        Ok(())
    }

    pub async fn delete(&self, customer_id: Uuid) -> UseCaseResult<usize> {
        let affected = self
            .customer_repo
            .delete(customer_id)
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "customers: failed to delete customer");
                CustomerError::Storage("Database Error: Failed to Delete Customer.".to_string())
            })?;

        if affected == 0 {
            warn!(%customer_id, "customers: delete matched no row");
        }

        self.view_cache.invalidate_prefix(LISTING_PREFIX);
        info!(%customer_id, affected, "customers: customer deleted");
        Ok(affected)
    }
}
