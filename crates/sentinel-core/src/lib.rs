//! Core types and codec for the SentinelChain kill-switch contract.
//!
//! This crate provides the foundational pieces shared by the gateway and its front-ends:
//!
//! - **Types**: device status, display records, addresses and transaction handles
//! - **ABI**: selectors, argument encoding and return decoding for the fixed contract
//! - **Demo**: the synthetic dashboard session (attack timeline, evidence, event log)
//! - **Errors**: the gateway taxonomy with [`GatewayError`] and [`ProviderError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use sentinel_core::{abi::ContractCall, DeviceStatusCode};
//!
//! let data = ContractCall::GetStatus { device_id: "DEVICE_001" }.encode();
//! assert_eq!(&data[..4], &[0x22, 0xb0, 0x5e, 0xd2]);
//!
//! let status = DeviceStatusCode::try_from(1u8)?;
//! assert_eq!(status, DeviceStatusCode::Locked);
//! ```

#![doc(html_root_url = "https://docs.rs/sentinel-core/0.3.0")]

pub mod abi;
pub mod demo;
mod error;
pub mod types;

pub use error::{
    AbiError, AddressError, GatewayError, GatewayErrorKind, ProviderError, Result,
    USER_REJECTED_CODE,
};
pub use types::*;
