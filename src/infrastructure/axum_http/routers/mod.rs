pub mod authentication;
pub mod customers;
pub mod dashboard;
pub mod invoices;
