//! sentinel - ransomware kill-switch CLI
//!
//! Reads and writes a device's on-chain kill-switch state.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sentinel_cli::run().await
}
