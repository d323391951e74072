//! The [`CryptoProvider`] capability the adapter forwards to.
//!
//! The adapter never touches the block cipher itself. Anything that can import
//! a raw AES-CBC key and run CBC encrypt/decrypt on a [`CipherCall`] can sit
//! behind it: [`SoftwareProvider`](crate::software::SoftwareProvider) in
//! production, a `MockCryptoProvider` in tests.

use async_trait::async_trait;
use common::CipherError;

use crate::key::{CryptoKey, RawKeyImport};
use crate::params::CipherCall;

/// Asynchronous key-import and AES-CBC primitive.
///
/// Implementations own all validation: key length, IV length, block alignment
/// and padding. Failures are reported with the matching [`CipherError`]
/// variant and the adapter passes them on unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Import raw key bytes as a key handle.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] if the key data is unusable for the algorithm.
    async fn import_key(&self, request: RawKeyImport) -> Result<CryptoKey, CipherError>;

    /// Encrypt `call.content` under `call.key` with `call.params`.
    ///
    /// # Errors
    ///
    /// [`CipherError::Encryption`] if the provider rejects the call.
    async fn encrypt(&self, call: &CipherCall) -> Result<Vec<u8>, CipherError>;

    /// Decrypt `call.content` under `call.key` with `call.params`.
    ///
    /// # Errors
    ///
    /// [`CipherError::Decryption`] if the provider rejects the call.
    async fn decrypt(&self, call: &CipherCall) -> Result<Vec<u8>, CipherError>;
}
