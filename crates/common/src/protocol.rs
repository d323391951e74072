//! Output types written by `cbc-tool`.
//!
//! Both types are serialised as a single JSON object on stdout.

use serde::{Deserialize, Serialize};

use crate::error::CipherError;

/// Direction of a cipher invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

/// Successful result of one encrypt or decrypt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherOutput {
    /// Which operation produced `output`.
    pub operation: Operation,
    /// Standard base64 of the resulting bytes.
    pub output: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error object written instead of [`CipherOutput`] when the provider rejects a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Short machine-readable error code (e.g. `"decryption_error"`).
    pub code: String,
    /// Human-readable description. Never contains key material.
    pub message: String,
}

impl ErrorOutput {
    /// Construct an [`ErrorOutput`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CipherError> for ErrorOutput {
    fn from(e: &CipherError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}
