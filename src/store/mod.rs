//! Invoice persistence seam. Every write is exactly one statement.

mod memory;
mod postgres;

pub use memory::MemoryInvoiceStore;
pub use postgres::{ensure_database_exists, ensure_invoice_table, PgInvoiceStore};

use crate::error::StoreError;
use crate::model::{Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: NewInvoice) -> Result<(), StoreError>;
    /// Returns the number of rows changed; zero when no invoice has `id`.
    async fn update(&self, id: String, changes: InvoiceChanges) -> Result<u64, StoreError>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: String) -> Result<u64, StoreError>;
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}
