//! Common error types shared across crates.

use thiserror::Error;

/// Errors surfaced by a crypto provider and passed through the adapter unchanged.
///
/// Variants map to process exit codes used by `cbc-tool`:
/// - [`CipherError::KeyImport`] → 2
/// - [`CipherError::Encryption`] → 3
/// - [`CipherError::Decryption`] → 4
/// - [`CipherError::KeyExport`] → 5
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The raw key material could not be imported (wrong length or format).
    #[error("key import failed: {0}")]
    KeyImport(String),

    /// The provider rejected an encryption request.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The provider rejected a decryption request (bad IV, block alignment, or padding).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The key handle is not extractable.
    #[error("key export failed: {0}")]
    KeyExport(String),
}

impl CipherError {
    /// Short machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CipherError::KeyImport(_) => "key_import_error",
            CipherError::Encryption(_) => "encryption_error",
            CipherError::Decryption(_) => "decryption_error",
            CipherError::KeyExport(_) => "key_export_error",
        }
    }

    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CipherError::KeyImport(_) => 2,
            CipherError::Encryption(_) => 3,
            CipherError::Decryption(_) => 4,
            CipherError::KeyExport(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CipherError::KeyImport("x".into()).exit_code(), 2);
        assert_eq!(CipherError::Encryption("x".into()).exit_code(), 3);
        assert_eq!(CipherError::Decryption("x".into()).exit_code(), 4);
        assert_eq!(CipherError::KeyExport("x".into()).exit_code(), 5);
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            CipherError::KeyImport("x".into()).code(),
            CipherError::Encryption("x".into()).code(),
            CipherError::Decryption("x".into()).code(),
            CipherError::KeyExport("x".into()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_includes_message() {
        let e = CipherError::KeyImport("expected 16, 24 or 32 bytes, got 7".into());
        assert!(e.to_string().starts_with("key import failed"));
        assert!(e.to_string().contains("got 7"));
    }
}
