//! # sentinel-cli
//!
//! Command-line front-end for the SentinelChain kill-switch contract.
//!
//! ## Features
//!
//! - **Contract access**: status lookup, log-hash anchoring, infection reports
//! - **Demo mode**: simulated attack timeline without touching the chain
//! - **Educational mode**: `--explain` flag explains what commands do
//! - **Multiple output formats**: Pretty tables, JSON, YAML

pub mod cli;
pub mod config;
pub mod digest;
pub mod education;
pub mod output;

pub use cli::run;
