//! In-process store for local runs and router tests.

use crate::error::StoreError;
use crate::model::{Invoice, InvoiceChanges, NewInvoice};
use crate::store::InvoiceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryInvoiceStore {
    rows: RwLock<HashMap<String, Invoice>>,
}

impl MemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Option<Invoice>, StoreError> {
        Ok(self.rows.read().map_err(poisoned)?.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("invoice store lock poisoned".into())
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        if rows.contains_key(&invoice.id) {
            return Err(StoreError::Constraint(format!("duplicate invoice id '{}'", invoice.id)));
        }
        rows.insert(
            invoice.id.clone(),
            Invoice {
                id: invoice.id,
                customer_id: invoice.customer_id,
                amount_cents: invoice.amount_cents,
                status: invoice.status,
                date: invoice.date,
            },
        );
        Ok(())
    }

    async fn update(&self, id: String, changes: InvoiceChanges) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let Some(row) = rows.get_mut(&id) else { return Ok(0) };
        row.customer_id = changes.customer_id;
        row.amount_cents = changes.amount_cents;
        row.status = changes.status;
        Ok(1)
    }

    async fn delete(&self, id: String) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        Ok(rows.remove(&id).map_or(0, |_| 1))
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut out: Vec<Invoice> = rows.values().cloned().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
