use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::abi;

/// Entropy at or above which a file is shown as a warning
pub const ENTROPY_WARNING: f64 = 5.0;

/// Entropy at or above which a file is shown as infected
pub const ENTROPY_INFECTED: f64 = 7.0;

/// Display classification of an attack timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackStatus {
    /// Normal file activity
    Safe,
    /// Elevated entropy
    Warning,
    /// Looks encrypted
    Infected,
}

impl AttackStatus {
    /// Classify a (synthetic) entropy score in bits per byte
    #[must_use]
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy >= ENTROPY_INFECTED {
            Self::Infected
        } else if entropy >= ENTROPY_WARNING {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

impl std::fmt::Display for AttackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Infected => write!(f, "infected"),
        }
    }
}

/// One entry of the attack timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackEvent {
    /// Session-unique identifier
    pub id: String,

    /// File the event refers to
    pub file_name: String,

    /// Shannon entropy in bits per byte (display only)
    pub entropy: f64,

    /// When the event was observed
    pub timestamp: DateTime<Utc>,

    /// Display classification
    pub status: AttackStatus,
}

/// Evidence anchored (or pretending to be anchored) on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainRecord {
    /// Session-unique identifier
    pub id: String,

    /// SHA-256 digest of the stored log
    pub hash: String,

    /// Transaction that stored the digest
    pub transaction_id: String,

    /// When the record was created
    pub timestamp: DateTime<Utc>,

    /// Including block
    pub block_number: u64,
}

impl BlockchainRecord {
    /// Explorer link for the transaction
    #[must_use]
    pub fn explorer_url(&self, base: &str) -> String {
        format!("{base}{}", self.transaction_id)
    }
}

/// Kind of entry in the contract event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractEventType {
    /// `LogHashStored(string indexed deviceId, string logHash)`
    LogHashStored,
    /// `InfectionDetected(string indexed deviceId)`
    InfectionDetected,
    /// Display-only: the kill switch engaged
    KillSwitchActivated,
    /// Display-only: a device joined the registry
    DeviceRegistered,
}

impl ContractEventType {
    /// Solidity event signature, for events the contract actually emits
    #[must_use]
    pub const fn signature(self) -> Option<&'static str> {
        match self {
            Self::LogHashStored => Some(abi::LOG_HASH_STORED_EVENT),
            Self::InfectionDetected => Some(abi::INFECTION_DETECTED_EVENT),
            Self::KillSwitchActivated | Self::DeviceRegistered => None,
        }
    }

    /// Topic 0 of the event's logs
    #[must_use]
    pub fn topic(self) -> Option<[u8; 32]> {
        self.signature().map(|sig| abi::keccak256(sig.as_bytes()))
    }

    /// Match a log's topic 0 against the contract's events
    #[must_use]
    pub fn from_topic(topic: &[u8]) -> Option<Self> {
        [Self::LogHashStored, Self::InfectionDetected]
            .into_iter()
            .find(|event| event.topic().is_some_and(|t| t.as_slice() == topic))
    }
}

impl std::fmt::Display for ContractEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogHashStored => write!(f, "LogHashStored"),
            Self::InfectionDetected => write!(f, "InfectionDetected"),
            Self::KillSwitchActivated => write!(f, "KillSwitchActivated"),
            Self::DeviceRegistered => write!(f, "DeviceRegistered"),
        }
    }
}

/// One entry of the contract event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Session-unique identifier
    pub id: String,

    /// Event kind
    #[serde(rename = "type")]
    pub kind: ContractEventType,

    /// Free-form payload shown next to the event
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,

    /// When the event was observed
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_classification() {
        assert_eq!(AttackStatus::from_entropy(3.2), AttackStatus::Safe);
        assert_eq!(AttackStatus::from_entropy(6.8), AttackStatus::Warning);
        assert_eq!(AttackStatus::from_entropy(7.0), AttackStatus::Infected);
        assert_eq!(AttackStatus::from_entropy(7.89), AttackStatus::Infected);
    }

    #[test]
    fn test_event_topics() {
        assert_eq!(
            hex::encode(ContractEventType::LogHashStored.topic().unwrap()),
            "c178832b4f1987cfd75c1dea20bb3f1dc91131d581413746f4db05cbb7c6af05"
        );
        assert_eq!(
            hex::encode(ContractEventType::InfectionDetected.topic().unwrap()),
            "588b40fbc0a210d5951cbcc4a7cbc4f72b286302d87008b3c298acb57d25ad3a"
        );
        assert!(ContractEventType::KillSwitchActivated.topic().is_none());
    }

    #[test]
    fn test_from_topic() {
        let topic = ContractEventType::LogHashStored.topic().unwrap();
        assert_eq!(
            ContractEventType::from_topic(&topic),
            Some(ContractEventType::LogHashStored)
        );
        assert_eq!(ContractEventType::from_topic(&[0u8; 32]), None);
    }

    #[test]
    fn test_contract_event_json_shape() {
        let event = ContractEvent {
            id: "1".into(),
            kind: ContractEventType::KillSwitchActivated,
            data: BTreeMap::from([("status".to_string(), serde_json::json!("LOCKED"))]),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "KillSwitchActivated");
        assert_eq!(value["data"]["status"], "LOCKED");
    }

    #[test]
    fn test_record_explorer_url() {
        let record = BlockchainRecord {
            id: "1".into(),
            hash: "0x7a8f2c...9d4e1b".into(),
            transaction_id: "0xabc".into(),
            timestamp: Utc::now(),
            block_number: 45_892_341,
        };
        assert_eq!(
            record.explorer_url("https://polygonscan.com/tx/"),
            "https://polygonscan.com/tx/0xabc"
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["transactionId"], "0xabc");
        assert_eq!(value["blockNumber"], 45_892_341);
    }
}
