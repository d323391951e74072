//! AES-CBC encrypt/decrypt over a pluggable crypto provider.
//!
//! [`CipherAdapter`] imports the supplied bytes as a raw AES-CBC key on every
//! call, builds a [`CipherCall`] and forwards it to a [`CryptoProvider`]. The
//! block cipher, chaining and PKCS#7 padding all live in the provider;
//! [`SoftwareProvider`] is the in-process default.
//!
//! ```no_run
//! # async fn demo() -> Result<(), cbc_adapter::CipherError> {
//! use cbc_adapter::CipherAdapter;
//!
//! let adapter: CipherAdapter = CipherAdapter::default();
//! let key = [0x11u8; 32];
//! let iv = [0x22u8; 16];
//! let ct = adapter.encrypt_with_key(&key, &iv, b"attack at dawn").await?;
//! let pt = adapter.decrypt_with_key(&key, &iv, &ct).await?;
//! assert_eq!(pt, b"attack at dawn");
//! # Ok(())
//! # }
//! ```
//!
//! No integrity is provided: AES-CBC is confidentiality only.

pub mod adapter;
pub mod key;
pub mod params;
pub mod provider;
pub mod software;

pub use adapter::CipherAdapter;
pub use common::CipherError;
pub use key::{CryptoKey, KeyFormat, KeyMaterial, KeyUsage, KeyUsages, RawKeyImport};
pub use params::{Algorithm, CipherCall, CipherParams, BLOCK_LEN};
pub use provider::CryptoProvider;
pub use software::SoftwareProvider;
