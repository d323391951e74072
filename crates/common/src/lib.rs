//! Common types and errors shared across `subtle-cbc` crates.

pub mod error;
pub mod protocol;

pub use error::CipherError;
