//! Invoice dashboard routes. Form bodies are capped by `form_body_limit`.

use crate::cache::INVOICES_VIEW;
use crate::handlers::invoice::{create_invoice, delete_invoice, list_invoices, update_invoice};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn invoice_routes(state: AppState, form_body_limit: usize) -> Router {
    Router::new()
        .route(INVOICES_VIEW, get(list_invoices).post(create_invoice))
        .route("/dashboard/invoices/:id/edit", post(update_invoice))
        .route("/dashboard/invoices/:id/delete", post(delete_invoice))
        .layer(RequestBodyLimitLayer::new(form_body_limit))
        .with_state(state)
}
