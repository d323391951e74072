//! Configuration loading and validation for `cbc-tool`.
//!
//! Values come from `CBC_`-prefixed environment variables. The process exits
//! with a clear message if a required variable is missing or malformed.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::Operation;
use serde::Deserialize;

/// Validated `cbc-tool` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `encrypt` or `decrypt` (`CBC_OPERATION`). **Required.**
    pub operation: Operation,

    /// Standard base64 IV (`CBC_IV`). **Required.**
    pub iv: String,

    /// Standard base64 raw key (`CBC_KEY`). When absent the IV bytes are
    /// imported as the key as well.
    #[serde(default)]
    pub key: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CBC"))
            .build()
            .context("failed to build cbc-tool configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise cbc-tool configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decoded IV bytes.
    pub fn iv_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.iv.trim())
            .context("CBC_IV must be standard base64")
    }

    /// Decoded key bytes, if a separate key was configured.
    pub fn key_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.key
            .as_deref()
            .map(|k| STANDARD.decode(k.trim()).context("CBC_KEY must be standard base64"))
            .transpose()
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    ///
    /// Lengths are left to the crypto provider so that its errors reach the
    /// caller unchanged.
    fn validate(&self) -> Result<()> {
        if self.iv.trim().is_empty() {
            anyhow::bail!("CBC_IV is required and must not be empty");
        }
        self.iv_bytes()?;
        if let Some(key) = &self.key {
            if key.trim().is_empty() {
                anyhow::bail!("CBC_KEY must not be empty when set");
            }
        }
        self.key_bytes()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(iv: &str, key: Option<&str>) -> Config {
        Config {
            operation: Operation::Encrypt,
            iv: iv.into(),
            key: key.map(Into::into),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        let c = cfg("AAAAAAAAAAAAAAAAAAAAAA==", None);
        assert!(c.validate().is_ok());
        assert_eq!(c.iv_bytes().unwrap(), vec![0u8; 16]);
        assert!(c.key_bytes().unwrap().is_none());
    }

    #[test]
    fn validate_rejects_empty_iv() {
        assert!(cfg("  ", None).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base64() {
        assert!(cfg("not base64!", None).validate().is_err());
        assert!(cfg("AAAAAAAAAAAAAAAAAAAAAA==", Some("%%%")).validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_key() {
        assert!(cfg("AAAAAAAAAAAAAAAAAAAAAA==", Some("")).validate().is_err());
    }

    #[test]
    fn key_decodes_when_set() {
        let c = cfg("AAAAAAAAAAAAAAAAAAAAAA==", Some("AQEBAQEBAQEBAQEBAQEBAQ=="));
        assert!(c.validate().is_ok());
        assert_eq!(c.key_bytes().unwrap(), Some(vec![1u8; 16]));
    }

    // Odd lengths are the provider's call, not the config layer's.
    #[test]
    fn validate_does_not_check_lengths() {
        assert!(cfg("AAAA", None).validate().is_ok());
    }
}
