//! Gateway configuration types.

use sentinel_core::Address;
use std::time::Duration;

/// Default interval between receipt polls
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default time to wait for a transaction to be mined
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Contract binding and receipt-wait settings for a [`crate::ContractGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Deployed kill-switch contract
    pub contract_address: Address,

    /// Interval between `eth_getTransactionReceipt` polls
    pub receipt_poll_interval: Duration,

    /// Give up waiting for a receipt after this long, however slow each poll is
    pub receipt_timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration for the contract at `contract_address`
    #[must_use]
    pub const fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }

    /// Set the receipt poll interval
    #[must_use]
    pub const fn receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    /// Set the receipt timeout
    #[must_use]
    pub const fn receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }
}
