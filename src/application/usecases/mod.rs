pub mod authentication;
pub mod customers;
pub mod dashboard;
pub mod invoices;

/// Fixed page size for every listing view.
pub const ITEMS_PER_PAGE: i64 = 6;
