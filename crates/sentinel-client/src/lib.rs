//! Wallet-provider gateway for the SentinelChain kill-switch contract.
//!
//! This crate provides the [`ContractGateway`], which turns the contract's three
//! operations into requests against an injected [`WalletProvider`], and an
//! [`HttpProvider`] that speaks JSON-RPC to a node.

#![doc(html_root_url = "https://docs.rs/sentinel-client/0.3.0")]

mod config;
mod gateway;
mod http;
mod provider;
#[cfg(test)]
mod testing;

pub use config::*;
pub use gateway::{ContractGateway, ContractGatewayBuilder};
pub use http::{HttpProvider, HttpProviderBuilder};
pub use provider::WalletProvider;
pub use sentinel_core::{GatewayError, GatewayErrorKind, ProviderError, Result};
