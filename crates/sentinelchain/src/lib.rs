//! Blockchain kill switch for ransomware-infected devices.
//!
//! A device's lock state lives in an on-chain contract. This crate reads that
//! state, anchors log digests and raises infection reports through an injected
//! wallet provider.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sentinelchain::{ContractGateway, GatewayConfig, HttpProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let contract: sentinelchain::Address = "0x5fbdb2315678afecb367f032d93f642f64180aa3".parse()?;
//!     let provider = HttpProvider::new("http://127.0.0.1:8545")?;
//!     let gateway = ContractGateway::new(GatewayConfig::new(contract), provider);
//!
//!     let status = gateway.get_device_status("DEVICE_001").await?;
//!     println!("DEVICE_001 is {status}");
//!
//!     let confirmation = gateway.report_infection("DEVICE_001").await?;
//!     println!("Reported in {}", confirmation.transaction_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/sentinelchain/0.3.0")]

// Re-export core types
pub use sentinel_core::*;

// Re-export the gateway and providers
pub use sentinel_client::{
    ContractGateway, ContractGatewayBuilder, GatewayConfig, HttpProvider, HttpProviderBuilder,
    WalletProvider, DEFAULT_RECEIPT_POLL_INTERVAL, DEFAULT_RECEIPT_TIMEOUT,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
