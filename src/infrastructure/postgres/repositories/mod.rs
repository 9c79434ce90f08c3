pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod users;
