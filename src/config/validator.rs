//! Config validation.

use crate::error::ConfigError;
use regex::Regex;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]{0,62}$";

/// Schema and table names are spliced into SQL text, so only unquoted-safe
/// identifiers (at most 63 bytes) are accepted.
pub fn validate_identifier(name: &str) -> Result<(), ConfigError> {
    let re = Regex::new(IDENTIFIER_PATTERN).map_err(|_| ConfigError::InvalidIdentifier(name.to_string()))?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_identifier("public").is_ok());
        assert!(validate_identifier("_billing2").is_ok());
    }

    #[test]
    fn rejects_injection_and_odd_names() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("public; DROP TABLE invoices").is_err());
        assert!(validate_identifier("a\"b").is_err());
        assert!(validate_identifier(&"x".repeat(64)).is_err());
    }
}
