//! HTTP handlers for invoice form actions and the invoice listing.

pub mod invoice;
pub use invoice::*;
