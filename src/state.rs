//! Shared application state for all routes.

use crate::cache::ViewCache;
use crate::service::InvoiceActions;
use crate::store::InvoiceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    pub views: Arc<dyn ViewCache>,
    pub actions: InvoiceActions,
}

impl AppState {
    pub fn new(store: Arc<dyn InvoiceStore>, views: Arc<dyn ViewCache>) -> Self {
        let actions = InvoiceActions::new(store.clone(), views.clone());
        AppState { store, views, actions }
    }
}
