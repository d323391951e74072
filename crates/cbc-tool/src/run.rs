//! One encrypt or decrypt of stdin.
//!
//! 1. Read all of stdin. Encrypt takes raw bytes; decrypt takes base64 text.
//! 2. Run the configured operation through [`CipherAdapter`].
//! 3. Write one JSON object to stdout: [`CipherOutput`] on success,
//!    [`ErrorOutput`] when the provider rejects the call.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc_adapter::{CipherAdapter, CryptoProvider};
use common::protocol::{CipherOutput, ErrorOutput, Operation};
use common::CipherError;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tracing::{info, warn};

use crate::config::Config;

/// Run the configured operation and return the process exit code.
///
/// # Errors
///
/// Returns an error on stdin/stdout failures or undecodable input. Cipher
/// failures are not errors here: they are reported on stdout and mapped to
/// [`CipherError::exit_code`].
pub async fn run(cfg: &Config) -> Result<i32> {
    let iv = cfg.iv_bytes()?;
    let key = cfg.key_bytes()?;

    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .await
        .context("failed to read stdin")?;
    let content = decode_input(cfg.operation, &raw)?;

    let adapter: CipherAdapter = CipherAdapter::default();
    let result = process(&adapter, cfg.operation, key.as_deref(), &iv, &content).await;
    let (body, code) = match result {
        Ok(out) => {
            info!(operation = cfg.operation.as_str(), "done");
            (serde_json::to_string(&out)?, 0)
        }
        Err(e) => {
            warn!(
                operation = cfg.operation.as_str(),
                code = e.code(),
                error = %e,
                "cipher call failed"
            );
            (serde_json::to_string(&ErrorOutput::from(&e))?, e.exit_code())
        }
    };

    let mut stdout = io::stdout();
    stdout.write_all(body.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await.context("failed to flush stdout")?;
    Ok(code)
}

/// Turn stdin into cipher input: verbatim for encrypt, base64-decoded for decrypt.
pub fn decode_input(operation: Operation, raw: &[u8]) -> Result<Vec<u8>> {
    match operation {
        Operation::Encrypt => Ok(raw.to_vec()),
        Operation::Decrypt => {
            let text = std::str::from_utf8(raw).context("decrypt input must be base64 text")?;
            STANDARD
                .decode(text.trim())
                .context("decrypt input must be standard base64")
        }
    }
}

/// Run one operation. Without a separate `key` the IV doubles as key material.
pub async fn process<P: CryptoProvider>(
    adapter: &CipherAdapter<P>,
    operation: Operation,
    key: Option<&[u8]>,
    iv: &[u8],
    content: &[u8],
) -> Result<CipherOutput, CipherError> {
    let output = match (operation, key) {
        (Operation::Encrypt, Some(key)) => adapter.encrypt_with_key(key, iv, content).await?,
        (Operation::Encrypt, None) => adapter.encrypt(iv, content).await?,
        (Operation::Decrypt, Some(key)) => adapter.decrypt_with_key(key, iv, content).await?,
        (Operation::Decrypt, None) => adapter.decrypt(iv, content).await?,
    };
    Ok(CipherOutput {
        operation,
        output: STANDARD.encode(output),
    })
}
