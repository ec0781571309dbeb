//! PostgreSQL-backed store plus bootstrap DDL.

use crate::error::StoreError;
use crate::model::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
use crate::sql::{delete_invoice, insert_invoice, qualified_table, select_invoices, update_invoice, QueryBuf, INVOICES_TABLE};
use crate::store::InvoiceStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

#[derive(Clone)]
pub struct PgInvoiceStore {
    pool: PgPool,
    schema: String,
}

impl PgInvoiceStore {
    /// `schema` must already be a validated identifier (see `config::validate_identifier`).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgInvoiceStore {
            pool,
            schema: schema.into(),
        }
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let done = query.execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<(), StoreError> {
        let q = insert_invoice(&self.schema, &invoice);
        self.execute(&q).await?;
        Ok(())
    }

    async fn update(&self, id: String, changes: InvoiceChanges) -> Result<u64, StoreError> {
        let q = update_invoice(&self.schema, &id, &changes);
        self.execute(&q).await
    }

    async fn delete(&self, id: String) -> Result<u64, StoreError> {
        let q = delete_invoice(&self.schema, &id);
        self.execute(&q).await
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let q = select_invoices(&self.schema);
        tracing::debug!(sql = %q.sql, "query");
        let rows: Vec<(String, String, i64, String, NaiveDate)> =
            sqlx::query_as(&q.sql).fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, customer_id, amount_cents, status, date)| -> Result<Invoice, StoreError> {
                let status = InvoiceStatus::from_str(&status).map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Invoice {
                    id,
                    customer_id,
                    amount_cents,
                    status,
                    date,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the schema and `invoices` table if missing. Safe to run on every start.
pub async fn ensure_invoice_table(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY,
            customer_id TEXT NOT NULL,
            amount BIGINT NOT NULL CHECK (amount > 0),
            status TEXT NOT NULL CHECK (status IN ('pending', 'paid')),
            date DATE NOT NULL
        )
        "#,
        qualified_table(schema, INVOICES_TABLE)
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// database `database_url` names (`None` when the URL has no database path).
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| StoreError::Unavailable(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
