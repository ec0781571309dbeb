//! Builds the parameterized INSERT, UPDATE, DELETE and listing SELECT for invoices.

use crate::model::{InvoiceChanges, NewInvoice};
use crate::sql::PgBindValue;

pub const INVOICES_TABLE: &str = "invoices";

const LIST_COLUMNS: &[&str] = &["id", "customer_id", "amount", "status", "date"];

/// Quote identifier for PostgreSQL (safe: names come from code or validated config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<PgBindValue>) -> String {
        self.params.push(v.into());
        format!("${}", self.params.len())
    }
}

/// INSERT one invoice with all five columns.
pub fn insert_invoice(schema: &str, invoice: &NewInvoice) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, INVOICES_TABLE);
    let placeholders = [
        q.push_param(invoice.id.as_str()),
        q.push_param(invoice.customer_id.as_str()),
        q.push_param(invoice.amount_cents),
        q.push_param(invoice.status.as_str()),
        q.push_param(invoice.date),
    ];
    let cols: Vec<String> = LIST_COLUMNS.iter().map(|c| quoted(c)).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: customer, amount and status only; `date` is never in the SET list.
pub fn update_invoice(schema: &str, id: &str, changes: &InvoiceChanges) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, INVOICES_TABLE);
    let sets = [
        format!("{} = {}", quoted("customer_id"), q.push_param(changes.customer_id.as_str())),
        format!("{} = {}", quoted("amount"), q.push_param(changes.amount_cents)),
        format!("{} = {}", quoted("status"), q.push_param(changes.status.as_str())),
    ];
    let id_ph = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        table,
        sets.join(", "),
        quoted("id"),
        id_ph
    );
    q
}

/// DELETE by id.
pub fn delete_invoice(schema: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, INVOICES_TABLE);
    let id_ph = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", table, quoted("id"), id_ph);
    q
}

/// SELECT every invoice, newest date first; id breaks ties so the order is stable.
pub fn select_invoices(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, INVOICES_TABLE);
    let cols: Vec<String> = LIST_COLUMNS.iter().map(|c| quoted(c)).collect();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} DESC, {}",
        cols.join(", "),
        table,
        quoted("date"),
        quoted("id")
    );
    q
}
