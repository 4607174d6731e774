use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::abi;
use crate::error::AbiError;
use crate::types::{Address, ContractEventType};

/// Hash identifying a submitted transaction (`0x` + 64 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// The hash as a lowercase `0x`-prefixed string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for narrow displays (`0x1234abcd...9f8e7d6c`)
    #[must_use]
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..10], &self.0[self.0.len() - 8..])
    }
}

impl FromStr for TransactionId {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = abi::from_hex(s)?;
        if bytes.len() != 32 {
            return Err(AbiError::InvalidHex(format!(
                "transaction hash must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(abi::to_hex(&bytes)))
    }
}

impl TryFrom<String> for TransactionId {
    type Error = AbiError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a write once its receipt has been observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    /// Transaction identifier returned on submission
    pub transaction_id: TransactionId,

    /// Block that included the transaction
    #[serde(default)]
    pub block_number: Option<u64>,

    /// Contract events found in the receipt logs
    #[serde(default)]
    pub events: Vec<ContractEventType>,
}

/// Log entry inside a transaction receipt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptLog {
    /// Emitting contract
    pub address: String,

    /// Indexed topics (topic 0 is the event signature hash)
    #[serde(default)]
    pub topics: Vec<String>,

    /// Non-indexed event data
    #[serde(default)]
    pub data: String,
}

/// Transaction receipt as returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the transaction
    pub transaction_hash: String,

    /// Block number as a hex quantity
    #[serde(default)]
    pub block_number: Option<String>,

    /// `0x1` on success, `0x0` on revert (absent before Byzantium)
    #[serde(default)]
    pub status: Option<String>,

    /// Logs emitted by the transaction
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

impl TransactionReceipt {
    /// Returns true if the receipt reports a revert.
    ///
    /// A missing status counts as success; an unreadable one is an error.
    pub fn is_reverted(&self) -> Result<bool, AbiError> {
        match self.status.as_deref() {
            Some(status) => Ok(abi::parse_quantity(status)? == 0),
            None => Ok(false),
        }
    }

    /// Including block, decoded from its hex quantity
    pub fn block(&self) -> Result<Option<u64>, AbiError> {
        self.block_number
            .as_deref()
            .map(abi::parse_quantity)
            .transpose()
    }

    /// Known contract events emitted by `contract` for `device_id`, in log order
    #[must_use]
    pub fn events_from(&self, contract: &Address, device_id: &str) -> Vec<ContractEventType> {
        let device = abi::device_topic(device_id);
        self.logs
            .iter()
            .filter(|log| log.address.parse::<Address>().is_ok_and(|a| a == *contract))
            .filter(|log| {
                log.topics
                    .get(1)
                    .and_then(|t| abi::from_hex(t).ok())
                    .is_some_and(|t| t == device)
            })
            .filter_map(|log| log.topics.first())
            .filter_map(|topic| abi::from_hex(topic).ok())
            .filter_map(|topic| ContractEventType::from_topic(&topic))
            .collect()
    }
}
