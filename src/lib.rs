//! Invoice actions: validated create/update/delete of dashboard invoices over
//! PostgreSQL, with listing revalidation and post-mutation redirects.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use cache::{MemoryViewCache, ViewCache, INVOICES_VIEW};
pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use routes::{common_routes, common_routes_with_ready, invoice_routes};
pub use service::{validate_invoice_form, FieldErrors, FormState, InvoiceActions, Redirect};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_invoice_table, InvoiceStore, MemoryInvoiceStore, PgInvoiceStore};
