//! Invoice form actions: validate, issue one write, then revalidate the listing.
//!
//! Create and update hand back a [`Redirect`] on success; the caller turns it into
//! navigation. Every failure comes back as a [`FormState`] for the form to re-render.

use crate::cache::{ViewCache, INVOICES_VIEW};
use crate::service::validation::{validate_invoice_form, FieldErrors};
use crate::store::InvoiceStore;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const CREATE_INVALID_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_INVALID_MESSAGE: &str = "Missing Fields. Failed to Update Invoice.";
pub const CREATE_DB_MESSAGE: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_DB_MESSAGE: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_DB_MESSAGE: &str = "Database Error: Failed to Delete Invoice.";

/// Where the caller should navigate after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Redirect {
            location: location.into(),
        }
    }
}

/// Form state returned on failure (and passed back in on the next submission).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    pub fn invalid(errors: FieldErrors, message: &str) -> Self {
        FormState {
            errors: Some(errors),
            message: Some(message.to_string()),
        }
    }

    pub fn message(message: &str) -> Self {
        FormState {
            errors: None,
            message: Some(message.to_string()),
        }
    }

    /// True when this state came out of a failed submission.
    pub fn is_failure(&self) -> bool {
        self.errors.is_some() || self.message.is_some()
    }
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// UTC calendar date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    views: Arc<dyn ViewCache>,
    clock: Arc<dyn Clock>,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, views: Arc<dyn ViewCache>) -> Self {
        InvoiceActions {
            store,
            views,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Insert a new invoice dated today. Any `date` in `fields` is ignored.
    pub async fn create(&self, prev: &FormState, fields: &HashMap<String, String>) -> Result<Redirect, FormState> {
        let validated = validate_invoice_form(fields).map_err(|errors| {
            tracing::warn!(fields = ?errors.fields(), retry = prev.is_failure(), "invoice create rejected");
            FormState::invalid(errors, CREATE_INVALID_MESSAGE)
        })?;

        let id = uuid::Uuid::new_v4().to_string();
        let invoice = validated.into_new(id.clone(), self.clock.today());
        if let Err(e) = self.store.insert(invoice).await {
            tracing::error!(code = e.code(), error = %e, "invoice create failed");
            return Err(FormState::message(CREATE_DB_MESSAGE));
        }
        tracing::info!(invoice_id = %id, "invoice created");

        self.views.invalidate(INVOICES_VIEW.to_string()).await;
        Ok(Redirect::to(INVOICES_VIEW))
    }

    /// Overwrite customer, amount and status of invoice `id`; the stored date is kept.
    pub async fn update(
        &self,
        id: &str,
        prev: &FormState,
        fields: &HashMap<String, String>,
    ) -> Result<Redirect, FormState> {
        let validated = validate_invoice_form(fields).map_err(|errors| {
            tracing::warn!(invoice_id = %id, fields = ?errors.fields(), retry = prev.is_failure(), "invoice update rejected");
            FormState::invalid(errors, UPDATE_INVALID_MESSAGE)
        })?;

        match self.store.update(id.to_string(), validated.into_changes()).await {
            Ok(0) => tracing::warn!(invoice_id = %id, "invoice update matched no rows"),
            Ok(_) => tracing::info!(invoice_id = %id, "invoice updated"),
            Err(e) => {
                tracing::error!(invoice_id = %id, code = e.code(), error = %e, "invoice update failed");
                return Err(FormState::message(UPDATE_DB_MESSAGE));
            }
        }

        self.views.invalidate(INVOICES_VIEW.to_string()).await;
        Ok(Redirect::to(INVOICES_VIEW))
    }

    /// Remove invoice `id`. Only revalidates; the caller is already on the listing.
    pub async fn delete(&self, id: &str) -> Result<(), FormState> {
        match self.store.delete(id.to_string()).await {
            Ok(0) => tracing::warn!(invoice_id = %id, "invoice delete matched no rows"),
            Ok(_) => tracing::info!(invoice_id = %id, "invoice deleted"),
            Err(e) => {
                tracing::error!(invoice_id = %id, code = e.code(), error = %e, "invoice delete failed");
                return Err(FormState::message(DELETE_DB_MESSAGE));
            }
        }

        self.views.invalidate(INVOICES_VIEW.to_string()).await;
        Ok(())
    }
}
