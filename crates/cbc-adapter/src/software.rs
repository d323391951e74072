//! In-process AES-CBC provider on the RustCrypto `aes` and `cbc` crates.
//!
//! Key sizes 128, 192 and 256 bits are accepted. Encryption always applies
//! PKCS#7 padding, so ciphertext is one to sixteen bytes longer than the
//! plaintext; decryption checks and strips it.

use aes::{Aes128, Aes192, Aes256};
use async_trait::async_trait;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use common::CipherError;
use tracing::debug;

use crate::key::{CryptoKey, KeyFormat, KeyUsage, RawKeyImport};
use crate::params::{CipherCall, BLOCK_LEN};
use crate::provider::CryptoProvider;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Raw AES key lengths accepted by [`SoftwareProvider::import_key`].
pub const KEY_LENS: [usize; 3] = [16, 24, 32];

/// Stateless AES-CBC provider. Cheap to construct and to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareProvider;

impl SoftwareProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CryptoProvider for SoftwareProvider {
    async fn import_key(&self, request: RawKeyImport) -> Result<CryptoKey, CipherError> {
        let RawKeyImport {
            format: KeyFormat::Raw,
            key_data,
            algorithm,
            extractable,
            usages,
        } = request;

        if !KEY_LENS.contains(&key_data.len()) {
            return Err(CipherError::KeyImport(format!(
                "AES key data must be 16, 24 or 32 bytes, got {}",
                key_data.len()
            )));
        }

        debug!(
            algorithm = %algorithm,
            bits = key_data.len() * 8,
            extractable,
            "raw key imported"
        );
        Ok(CryptoKey::new(algorithm, key_data, extractable, usages))
    }

    async fn encrypt(&self, call: &CipherCall) -> Result<Vec<u8>, CipherError> {
        if !call.key.allows(KeyUsage::Encrypt) {
            return Err(CipherError::Encryption("key does not permit encrypt".into()));
        }
        check_iv(&call.params.iv).map_err(CipherError::Encryption)?;

        let key = call.key.material();
        let iv = call.params.iv.as_slice();
        let content = call.content.as_slice();
        let invalid = |e: cbc::cipher::InvalidLength| CipherError::Encryption(e.to_string());

        let out = match key.len() {
            16 => Aes128CbcEnc::new_from_slices(key, iv)
                .map_err(invalid)?
                .encrypt_padded_vec_mut::<Pkcs7>(content),
            24 => Aes192CbcEnc::new_from_slices(key, iv)
                .map_err(invalid)?
                .encrypt_padded_vec_mut::<Pkcs7>(content),
            32 => Aes256CbcEnc::new_from_slices(key, iv)
                .map_err(invalid)?
                .encrypt_padded_vec_mut::<Pkcs7>(content),
            n => {
                return Err(CipherError::Encryption(format!(
                    "unsupported AES key length: {n} bytes"
                )))
            }
        };

        debug!(
            bits = call.key.length_bits(),
            in_len = content.len(),
            out_len = out.len(),
            "AES-CBC encrypt"
        );
        Ok(out)
    }

    async fn decrypt(&self, call: &CipherCall) -> Result<Vec<u8>, CipherError> {
        if !call.key.allows(KeyUsage::Decrypt) {
            return Err(CipherError::Decryption("key does not permit decrypt".into()));
        }
        check_iv(&call.params.iv).map_err(CipherError::Decryption)?;

        let content = call.content.as_slice();
        if content.is_empty() || content.len() % BLOCK_LEN != 0 {
            return Err(CipherError::Decryption(format!(
                "ciphertext length must be a non-zero multiple of {BLOCK_LEN}, got {}",
                content.len()
            )));
        }

        let key = call.key.material();
        let iv = call.params.iv.as_slice();
        let invalid = |e: cbc::cipher::InvalidLength| CipherError::Decryption(e.to_string());
        let bad_padding = |_: cbc::cipher::block_padding::UnpadError| {
            CipherError::Decryption("invalid PKCS#7 padding".into())
        };

        let out = match key.len() {
            16 => Aes128CbcDec::new_from_slices(key, iv)
                .map_err(invalid)?
                .decrypt_padded_vec_mut::<Pkcs7>(content)
                .map_err(bad_padding)?,
            24 => Aes192CbcDec::new_from_slices(key, iv)
                .map_err(invalid)?
                .decrypt_padded_vec_mut::<Pkcs7>(content)
                .map_err(bad_padding)?,
            32 => Aes256CbcDec::new_from_slices(key, iv)
                .map_err(invalid)?
                .decrypt_padded_vec_mut::<Pkcs7>(content)
                .map_err(bad_padding)?,
            n => {
                return Err(CipherError::Decryption(format!(
                    "unsupported AES key length: {n} bytes"
                )))
            }
        };

        debug!(
            bits = call.key.length_bits(),
            in_len = content.len(),
            out_len = out.len(),
            "AES-CBC decrypt"
        );
        Ok(out)
    }
}

fn check_iv(iv: &[u8]) -> Result<(), String> {
    if iv.len() != BLOCK_LEN {
        return Err(format!(
            "AES-CBC iv must be {BLOCK_LEN} bytes, got {}",
            iv.len()
        ));
    }
    Ok(())
}
