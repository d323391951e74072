//! [`CipherAdapter`]: per-call raw key import forwarded to a [`CryptoProvider`].
//!
//! Every operation is a straight line: import the key, build a [`CipherCall`],
//! hand it to the provider, return whatever comes back. Nothing is cached, so
//! each encrypt or decrypt performs its own key import.
//!
//! # Shared key and IV
//!
//! [`CipherAdapter::encrypt`], [`CipherAdapter::decrypt`] and
//! [`CipherAdapter::build_args`] take a single byte sequence and use it both as
//! the raw key material and as the IV. That is almost certainly a defect in the
//! calling convention these functions reproduce: a key should be secret and an
//! IV should not repeat across messages. New callers should use the
//! `*_with_key` variants, which take the two independently.

use common::CipherError;
use tracing::debug;

use crate::key::RawKeyImport;
use crate::params::{CipherCall, CipherParams};
use crate::provider::CryptoProvider;
use crate::software::SoftwareProvider;

/// AES-CBC front end over a [`CryptoProvider`].
///
/// Holds no state besides the provider, so it is `Send + Sync` whenever the
/// provider is and can be shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CipherAdapter<P = SoftwareProvider> {
    provider: P,
}

impl<P: CryptoProvider> CipherAdapter<P> {
    /// Create an adapter that forwards to `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Import `iv` as a raw AES-CBC key and pair it with `iv` as the IV.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] from the provider if `iv` is not valid key
    /// material (16, 24 or 32 bytes for AES).
    pub async fn build_args(
        &self,
        iv: &[u8],
        content: &[u8],
    ) -> Result<CipherCall, CipherError> {
        self.build_args_with_key(iv, iv, content).await
    }

    /// Import `key` as a raw AES-CBC key (extractable, usable for encrypt and
    /// decrypt) and build the [`CipherCall`] for `iv` and `content`.
    ///
    /// The IV is not checked here; the provider rejects a bad one when the
    /// call is executed.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] from the provider.
    pub async fn build_args_with_key(
        &self,
        key: &[u8],
        iv: &[u8],
        content: &[u8],
    ) -> Result<CipherCall, CipherError> {
        debug!(
            key_len = key.len(),
            iv_len = iv.len(),
            content_len = content.len(),
            "importing AES-CBC key"
        );
        let key = self
            .provider
            .import_key(RawKeyImport::aes_cbc(key))
            .await
            .inspect_err(|e| debug!(error = %e, "key import rejected"))?;

        Ok(CipherCall {
            params: CipherParams::aes_cbc(iv),
            key,
            content: content.to_vec(),
        })
    }

    /// AES-CBC encrypt `content`, using `iv` as both key material and IV.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] or [`CipherError::Encryption`], unchanged
    /// from the provider.
    pub async fn encrypt(&self, iv: &[u8], content: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt_with_key(iv, iv, content).await
    }

    /// AES-CBC decrypt `content`, using `iv` as both key material and IV.
    ///
    /// There is no integrity check: block-aligned ciphertext that was
    /// corrupted anywhere except the padding decrypts to wrong plaintext
    /// without error.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] or [`CipherError::Decryption`], unchanged
    /// from the provider.
    pub async fn decrypt(&self, iv: &[u8], content: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.decrypt_with_key(iv, iv, content).await
    }

    /// AES-CBC encrypt `content` under `key` with `iv`.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] or [`CipherError::Encryption`], unchanged
    /// from the provider.
    pub async fn encrypt_with_key(
        &self,
        key: &[u8],
        iv: &[u8],
        content: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        let call = self.build_args_with_key(key, iv, content).await?;
        self.provider
            .encrypt(&call)
            .await
            .inspect_err(|e| debug!(error = %e, "encrypt rejected"))
    }

    /// AES-CBC decrypt `content` under `key` with `iv`.
    ///
    /// # Errors
    ///
    /// [`CipherError::KeyImport`] or [`CipherError::Decryption`], unchanged
    /// from the provider.
    pub async fn decrypt_with_key(
        &self,
        key: &[u8],
        iv: &[u8],
        content: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        let call = self.build_args_with_key(key, iv, content).await?;
        self.provider
            .decrypt(&call)
            .await
            .inspect_err(|e| debug!(error = %e, "decrypt rejected"))
    }
}

impl Default for CipherAdapter<SoftwareProvider> {
    fn default() -> Self {
        Self::new(SoftwareProvider::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{CryptoKey, KeyFormat, KeyUsages};
    use crate::params::Algorithm;
    use crate::provider::MockCryptoProvider;

    fn accept_import(mock: &mut MockCryptoProvider, times: usize) {
        mock.expect_import_key().times(times).returning(|req| {
            Ok(CryptoKey::new(
                req.algorithm,
                req.key_data,
                req.extractable,
                req.usages,
            ))
        });
    }

    #[tokio::test]
    async fn build_args_reuses_iv_as_key_material() {
        let mut mock = MockCryptoProvider::new();
        mock.expect_import_key()
            .withf(|req| {
                req.format == KeyFormat::Raw
                    && req.algorithm == Algorithm::AesCbc
                    && req.extractable
                    && req.usages == KeyUsages::ENCRYPT_DECRYPT
                    && req.key_data.as_bytes() == [7u8; 16]
            })
            .times(1)
            .returning(|req| {
                Ok(CryptoKey::new(req.algorithm, req.key_data, true, req.usages))
            });

        let adapter = CipherAdapter::new(mock);
        let call = adapter.build_args(&[7u8; 16], b"payload").await.unwrap();
        assert_eq!(call.params.algorithm, Algorithm::AesCbc);
        assert_eq!(call.params.iv, vec![7u8; 16]);
        assert_eq!(call.key.material(), &[7u8; 16]);
        assert_eq!(call.content, b"payload");
    }

    #[tokio::test]
    async fn build_args_with_key_keeps_key_and_iv_apart() {
        let mut mock = MockCryptoProvider::new();
        mock.expect_import_key()
            .withf(|req| req.key_data.as_bytes() == [1u8; 32])
            .times(1)
            .returning(|req| {
                Ok(CryptoKey::new(req.algorithm, req.key_data, true, req.usages))
            });

        let adapter = CipherAdapter::new(mock);
        let call = adapter
            .build_args_with_key(&[1u8; 32], &[2u8; 16], b"x")
            .await
            .unwrap();
        assert_eq!(call.key.length_bits(), 256);
        assert_eq!(call.params.iv, vec![2u8; 16]);
    }

    #[tokio::test]
    async fn import_error_passes_through_and_skips_cipher() {
        let mut mock = MockCryptoProvider::new();
        mock.expect_import_key()
            .returning(|_| Err(CipherError::KeyImport("bad length".into())));
        mock.expect_encrypt().never();
        mock.expect_decrypt().never();

        let adapter = CipherAdapter::new(mock);
        assert_eq!(
            adapter.encrypt(&[0u8; 5], b"x").await.unwrap_err(),
            CipherError::KeyImport("bad length".into())
        );
        assert_eq!(
            adapter.decrypt(&[0u8; 5], &[0u8; 16]).await.unwrap_err(),
            CipherError::KeyImport("bad length".into())
        );
    }

    #[tokio::test]
    async fn provider_errors_pass_through_unchanged() {
        let mut mock = MockCryptoProvider::new();
        accept_import(&mut mock, 2);
        mock.expect_encrypt()
            .times(1)
            .returning(|_| Err(CipherError::Encryption("iv must be 16 bytes".into())));
        mock.expect_decrypt()
            .times(1)
            .returning(|_| Err(CipherError::Decryption("unaligned".into())));

        let adapter = CipherAdapter::new(mock);
        assert_eq!(
            adapter.encrypt(&[0u8; 16], b"x").await.unwrap_err(),
            CipherError::Encryption("iv must be 16 bytes".into())
        );
        assert_eq!(
            adapter.decrypt(&[0u8; 16], b"x").await.unwrap_err(),
            CipherError::Decryption("unaligned".into())
        );
    }

    #[tokio::test]
    async fn every_call_imports_its_own_key() {
        let mut mock = MockCryptoProvider::new();
        accept_import(&mut mock, 3);
        mock.expect_encrypt()
            .times(2)
            .returning(|call| Ok(call.content.clone()));
        mock.expect_decrypt()
            .times(1)
            .returning(|call| Ok(call.content.clone()));

        let adapter = CipherAdapter::new(mock);
        adapter.encrypt(&[1u8; 16], b"a").await.unwrap();
        adapter.encrypt(&[1u8; 16], b"a").await.unwrap();
        adapter.decrypt(&[1u8; 16], b"a").await.unwrap();
    }

    #[tokio::test]
    async fn encrypt_forwards_call_and_returns_provider_output() {
        let mut mock = MockCryptoProvider::new();
        accept_import(&mut mock, 1);
        mock.expect_encrypt()
            .withf(|call| {
                call.params.iv == [4u8; 16]
                    && call.key.material() == [4u8; 16]
                    && call.content == b"hello"
            })
            .times(1)
            .returning(|_| Ok(vec![0xCC; 16]));

        let adapter = CipherAdapter::new(mock);
        assert_eq!(adapter.encrypt(&[4u8; 16], b"hello").await.unwrap(), vec![0xCC; 16]);
    }

    #[tokio::test]
    async fn default_adapter_uses_software_provider() {
        let adapter: CipherAdapter = CipherAdapter::default();
        let ct = adapter.encrypt(&[0u8; 16], &[0x41; 16]).await.unwrap();
        assert_eq!(adapter.decrypt(&[0u8; 16], &ct).await.unwrap(), vec![0x41; 16]);
    }
}
