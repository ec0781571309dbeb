//! Invoice form validation and coercion. Pure: no I/O.

use crate::model::{InvoiceChanges, InvoiceStatus, NewInvoice};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Per-field validation messages; fields without problems are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
}

impl FieldErrors {
    fn push(slot: &mut Option<Vec<String>>, message: &str) {
        slot.get_or_insert_with(Vec::new).push(message.to_string());
    }

    /// Names of the failing fields, in form order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.customer_id.is_some() {
            out.push(CUSTOMER_ID_FIELD);
        }
        if self.amount.is_some() {
            out.push(AMOUNT_FIELD);
        }
        if self.status.is_some() {
            out.push(STATUS_FIELD);
        }
        out
    }
}

/// A form that passed validation, with amount already in integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

impl ValidatedInvoice {
    pub fn into_new(self, id: String, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            id,
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
        }
    }
}

/// Validate `customerId`, `amount` and `status`; every failing field is reported.
/// Other keys (e.g. a client-supplied `date`) are ignored.
pub fn validate_invoice_form(fields: &HashMap<String, String>) -> Result<ValidatedInvoice, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = fields
        .get(CUSTOMER_ID_FIELD)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    if customer_id.is_none() {
        FieldErrors::push(&mut errors.customer_id, CUSTOMER_MESSAGE);
    }

    let amount_cents = fields.get(AMOUNT_FIELD).and_then(|s| amount_to_cents(s));
    if amount_cents.is_none() {
        FieldErrors::push(&mut errors.amount, AMOUNT_MESSAGE);
    }

    let status = fields.get(STATUS_FIELD).and_then(|s| s.parse::<InvoiceStatus>().ok());
    if status.is_none() {
        FieldErrors::push(&mut errors.status, STATUS_MESSAGE);
    }

    match (customer_id, amount_cents, status) {
        (Some(customer_id), Some(amount_cents), Some(status)) => Ok(ValidatedInvoice {
            customer_id: customer_id.to_string(),
            amount_cents,
            status,
        }),
        _ => Err(errors),
    }
}

/// Coerce a decimal amount to `round(amount * 100)` cents. `None` when the input
/// is not a finite number, is not positive, or rounds to zero cents.
pub fn amount_to_cents(raw: &str) -> Option<i64> {
    let amount: f64 = raw.trim().parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents >= i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}
