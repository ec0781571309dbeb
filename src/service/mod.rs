//! Invoice actions and the form validation they run first.

pub mod actions;
pub mod validation;
pub use actions::{Clock, FormState, InvoiceActions, Redirect, SystemClock};
pub use validation::{validate_invoice_form, FieldErrors, ValidatedInvoice};
