//! Key import requests and the opaque [`CryptoKey`] handle.
//!
//! A [`CryptoKey`] is produced by [`CryptoProvider::import_key`] and lives for a
//! single adapter call. Key bytes are held in [`KeyMaterial`], which is zeroed on
//! drop and never printed.
//!
//! [`CryptoProvider::import_key`]: crate::provider::CryptoProvider::import_key

use common::CipherError;

use crate::params::Algorithm;

/// Owned key bytes, overwritten with zeroes when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial(Box<[u8]>);

impl KeyMaterial {
    pub fn new(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        write!(f, "KeyMaterial([REDACTED; {}])", self.0.len())
    }
}

/// Encoding of the key data handed to an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// Uninterpreted key bytes.
    Raw,
}

/// A single operation a key may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
}

/// Set of [`KeyUsage`] values granted to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsages {
    encrypt: bool,
    decrypt: bool,
}

impl KeyUsages {
    /// No usages.
    pub const NONE: Self = Self {
        encrypt: false,
        decrypt: false,
    };

    /// `{encrypt, decrypt}`, the set every adapter import requests.
    pub const ENCRYPT_DECRYPT: Self = Self {
        encrypt: true,
        decrypt: true,
    };

    /// Returns a copy of this set with `usage` added.
    pub fn with(mut self, usage: KeyUsage) -> Self {
        match usage {
            KeyUsage::Encrypt => self.encrypt = true,
            KeyUsage::Decrypt => self.decrypt = true,
        }
        self
    }

    pub fn contains(&self, usage: KeyUsage) -> bool {
        match usage {
            KeyUsage::Encrypt => self.encrypt,
            KeyUsage::Decrypt => self.decrypt,
        }
    }
}

/// Named parameters for a raw key import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyImport {
    pub format: KeyFormat,
    pub key_data: KeyMaterial,
    pub algorithm: Algorithm,
    pub extractable: bool,
    pub usages: KeyUsages,
}

impl RawKeyImport {
    /// The import the adapter performs on every call: raw AES-CBC key,
    /// extractable, usable for both encrypt and decrypt.
    pub fn aes_cbc(key_data: &[u8]) -> Self {
        Self {
            format: KeyFormat::Raw,
            key_data: KeyMaterial::new(key_data),
            algorithm: Algorithm::AesCbc,
            extractable: true,
            usages: KeyUsages::ENCRYPT_DECRYPT,
        }
    }
}

/// Opaque key handle produced by a provider's key import.
#[derive(Debug, Clone)]
pub struct CryptoKey {
    algorithm: Algorithm,
    extractable: bool,
    usages: KeyUsages,
    material: KeyMaterial,
}

impl CryptoKey {
    /// Build a handle. Providers call this after validating `material`.
    pub fn new(
        algorithm: Algorithm,
        material: KeyMaterial,
        extractable: bool,
        usages: KeyUsages,
    ) -> Self {
        Self {
            algorithm,
            extractable,
            usages,
            material,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Key length in bits (128, 192 or 256 for keys the software provider accepts).
    pub fn length_bits(&self) -> usize {
        self.material.len() * 8
    }

    pub fn extractable(&self) -> bool {
        self.extractable
    }

    pub fn usages(&self) -> KeyUsages {
        self.usages
    }

    pub fn allows(&self, usage: KeyUsage) -> bool {
        self.usages.contains(usage)
    }

    /// Raw key bytes, for providers that perform the cipher in-process.
    pub fn material(&self) -> &[u8] {
        self.material.as_bytes()
    }

    /// Export the raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::KeyExport`] if the key was imported as non-extractable.
    pub fn export_raw(&self) -> Result<Vec<u8>, CipherError> {
        if !self.extractable {
            return Err(CipherError::KeyExport("key is not extractable".into()));
        }
        Ok(self.material.as_bytes().to_vec())
    }
}
