//! Cipher parameters and the named-argument [`CipherCall`] handed to a provider.

use std::fmt;

use crate::key::CryptoKey;

/// AES block size; also the only IV length AES-CBC accepts.
pub const BLOCK_LEN: usize = 16;

/// Symmetric algorithm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    AesCbc,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::AesCbc => "AES-CBC",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-call cipher parameters.
///
/// The IV is carried as given; its length is checked by the provider, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherParams {
    pub algorithm: Algorithm,
    pub iv: Vec<u8>,
}

impl CipherParams {
    pub fn aes_cbc(iv: &[u8]) -> Self {
        Self {
            algorithm: Algorithm::AesCbc,
            iv: iv.to_vec(),
        }
    }
}

/// Everything a provider needs for one encrypt or decrypt.
#[derive(Debug)]
pub struct CipherCall {
    pub params: CipherParams,
    pub key: CryptoKey,
    pub content: Vec<u8>,
}
