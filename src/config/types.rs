//! Runtime configuration values.

use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/dashboard";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FORM_BODY_LIMIT: usize = 16 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    /// Schema holding the `invoices` table. Always a plain PostgreSQL identifier.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Upper bound on urlencoded form bodies, in bytes.
    pub form_body_limit: usize,
}
