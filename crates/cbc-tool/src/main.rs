//! `cbc-tool` — command-line entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`](config::Config) from `CBC_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Encrypt or decrypt stdin and write the result object to stdout.

mod config;
mod run;
mod telemetry;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: cbc-tool configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Cipher
    // -----------------------------------------------------------------------
    let code = run::run(&cfg).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
