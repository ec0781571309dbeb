//! Load config from the process environment (after `.env`) or any key lookup.

use crate::config::types::*;
use crate::config::validate_identifier;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let schema = lookup("INVOICES_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_identifier(&schema)?;
        let bind_addr: SocketAddr = parse_var(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections: u32 = parse_var(&lookup, "DB_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string())?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }
        let form_body_limit: usize = parse_var(&lookup, "FORM_BODY_LIMIT", &DEFAULT_FORM_BODY_LIMIT.to_string())?;
        Ok(AppConfig {
            database_url,
            schema,
            bind_addr,
            max_connections,
            form_body_limit,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.form_body_limit, 16 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db:5432/acme"),
            ("INVOICES_SCHEMA", "billing"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DB_MAX_CONNECTIONS", " 12 "),
        ]))
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://db:5432/acme");
        assert_eq!(cfg.schema, "billing");
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.max_connections, 12);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "lots")])),
            Err(ConfigError::InvalidVar { var: "DB_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")])),
            Err(ConfigError::InvalidVar { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("INVOICES_SCHEMA", "bad-schema")])),
            Err(ConfigError::InvalidIdentifier(_))
        ));
    }
}
