pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod enums;
pub mod forms;
pub mod invoices;
