pub mod clients;
pub mod invoice_items;
pub mod invoices;
pub mod leads;
pub mod media;
pub mod metrics;
pub mod projects;
pub mod users;
