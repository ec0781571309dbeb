//! Invoice handlers: urlencoded form posts for create/update/delete, JSON listing.

use crate::cache::INVOICES_VIEW;
use crate::error::AppError;
use crate::response::{form_failure, see_other, success_many};
use crate::service::FormState;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use std::collections::HashMap;

pub async fn create_invoice(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    match state.actions.create(&FormState::default(), &fields).await {
        Ok(redirect) => see_other(redirect),
        Err(form) => form_failure(form),
    }
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    match state.actions.update(&id, &FormState::default(), &fields).await {
        Ok(redirect) => see_other(redirect),
        Err(form) => form_failure(form),
    }
}

pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.actions.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(form) => form_failure(form),
    }
}

/// Serve the listing from the view cache, recomputing it from storage when stale.
pub async fn list_invoices(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(view) = state.views.get(INVOICES_VIEW.to_string()).await {
        return Ok(Json(view));
    }
    let generation = state.views.generation(INVOICES_VIEW.to_string()).await;
    let invoices = state.store.list().await?;
    tracing::debug!(count = invoices.len(), generation, "invoice listing recomputed");
    let view = serde_json::json!(success_many(invoices));
    state
        .views
        .put_if_current(INVOICES_VIEW.to_string(), generation, view.clone())
        .await;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryViewCache, ViewCache};
    use crate::error::StoreError;
    use crate::model::{Invoice, InvoiceChanges, NewInvoice};
    use crate::store::{InvoiceStore, MemoryInvoiceStore};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Memory store whose `list` pauses after reading until `resume` is notified.
    #[derive(Default)]
    struct PausingStore {
        inner: MemoryInvoiceStore,
        listed: Notify,
        resume: Notify,
    }

    #[async_trait]
    impl InvoiceStore for PausingStore {
        async fn insert(&self, invoice: NewInvoice) -> Result<(), StoreError> {
            self.inner.insert(invoice).await
        }

        async fn update(&self, id: String, changes: InvoiceChanges) -> Result<u64, StoreError> {
            self.inner.update(id, changes).await
        }

        async fn delete(&self, id: String) -> Result<u64, StoreError> {
            self.inner.delete(id).await
        }

        async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
            let rows = self.inner.list().await?;
            self.listed.notify_one();
            self.resume.notified().await;
            Ok(rows)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn listing_read_racing_a_create_is_not_cached() {
        let store = Arc::new(PausingStore::default());
        let views = Arc::new(MemoryViewCache::new());
        let state = AppState::new(store.clone(), views.clone());

        let reader = tokio::spawn(list_invoices(State(state.clone())));
        store.listed.notified().await;

        let fields: HashMap<String, String> = [("customerId", "c1"), ("amount", "5"), ("status", "paid")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        state.actions.create(&FormState::default(), &fields).await.unwrap();
        store.resume.notify_one();

        let Json(served) = reader.await.unwrap().unwrap();
        assert_eq!(served["meta"]["count"], 0);
        assert_eq!(views.get(INVOICES_VIEW.to_string()).await, None);

        store.resume.notify_one();
        let Json(fresh) = list_invoices(State(state)).await.unwrap();
        assert_eq!(fresh["meta"]["count"], 1);
        assert_eq!(views.get(INVOICES_VIEW.to_string()).await, Some(fresh));
    }
}
