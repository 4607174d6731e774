//! Synthetic dashboard session.
//!
//! Everything here is generated locally for demonstration: no file is scanned
//! and no chain is indexed. Lists are newest-first and live only as long as
//! the session value.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

use crate::types::{
    AttackEvent, AttackStatus, BlockchainRecord, Confirmation, ContractEvent, ContractEventType,
    DashboardStatus, DeviceStatusCode,
};

/// Device shown when none is configured
pub const DEFAULT_DEVICE_ID: &str = "DEVICE_001";

/// Block number of the seeded evidence record
const SEED_BLOCK: u64 = 45_892_341;

/// Digest shown on the seeded evidence record
const SEED_HASH: &str = "0x7a8f2c...9d4e1b";

/// Entropy of the simulated encrypted file
const ATTACK_ENTROPY: f64 = 7.89;

/// State behind the dashboard panels for one session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSession {
    device_id: String,
    status: DashboardStatus,
    attack_events: Vec<AttackEvent>,
    blockchain_records: Vec<BlockchainRecord>,
    contract_events: Vec<ContractEvent>,
    #[serde(skip)]
    next_id: u64,
}

impl DemoSession {
    /// Start a session with the seeded timeline
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        let mut session = Self {
            device_id: device_id.into(),
            status: DashboardStatus::Safe,
            attack_events: Vec::new(),
            blockchain_records: Vec::new(),
            contract_events: Vec::new(),
            next_id: 1,
        };
        session.seed(Utc::now());
        session
    }

    /// Device this session displays
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Current health panel status
    #[must_use]
    pub const fn status(&self) -> DashboardStatus {
        self.status
    }

    /// Returns true once the kill switch has been engaged
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == DashboardStatus::Locked
    }

    /// Attack timeline, newest first
    #[must_use]
    pub fn attack_events(&self) -> &[AttackEvent] {
        &self.attack_events
    }

    /// Evidence records, newest first
    #[must_use]
    pub fn blockchain_records(&self) -> &[BlockchainRecord] {
        &self.blockchain_records
    }

    /// Contract event log, newest first
    #[must_use]
    pub fn contract_events(&self) -> &[ContractEvent] {
        &self.contract_events
    }

    /// Play a ransomware attack against the device.
    ///
    /// Returns `false` (and changes nothing) if the device is already locked.
    pub fn simulate_attack(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }

        let now = Utc::now();
        let mut rng = rand::thread_rng();

        let event = AttackEvent {
            id: self.next_id(),
            file_name: "encrypted_file.locked".to_string(),
            entropy: ATTACK_ENTROPY,
            timestamp: now,
            status: AttackStatus::from_entropy(ATTACK_ENTROPY),
        };
        self.attack_events.insert(0, event);
        self.status = DashboardStatus::Locked;

        let record = BlockchainRecord {
            id: self.next_id(),
            hash: short_hash(&mut rng),
            transaction_id: short_hash(&mut rng),
            timestamp: now,
            block_number: SEED_BLOCK + 1 + rng.gen_range(0..100),
        };
        self.blockchain_records.insert(0, record);

        let infection = self.contract_event(
            ContractEventType::InfectionDetected,
            [("entropy", json!(ATTACK_ENTROPY))],
            now,
        );
        let kill_switch = self.contract_event(
            ContractEventType::KillSwitchActivated,
            [("status", json!(DeviceStatusCode::Locked.to_string()))],
            now,
        );
        self.contract_events.splice(0..0, [infection, kill_switch]);

        true
    }

    /// Add the evidence of a confirmed write to the session
    pub fn record_confirmation(&mut self, log_hash: &str, confirmation: &Confirmation) {
        let now = Utc::now();
        let record = BlockchainRecord {
            id: self.next_id(),
            hash: log_hash.to_string(),
            transaction_id: confirmation.transaction_id.to_string(),
            timestamp: now,
            block_number: confirmation.block_number.unwrap_or_default(),
        };
        self.blockchain_records.insert(0, record);

        for kind in &confirmation.events {
            let event = self.contract_event(
                *kind,
                [(
                    "transactionId",
                    json!(confirmation.transaction_id.as_str()),
                )],
                now,
            );
            self.contract_events.insert(0, event);
        }
    }

    /// Mirror a status read from the contract
    pub fn apply_status(&mut self, code: DeviceStatusCode) {
        self.status = code.into();
    }

    /// Back to the seeded timeline
    pub fn reset(&mut self) {
        self.status = DashboardStatus::Safe;
        self.attack_events.clear();
        self.blockchain_records.clear();
        self.contract_events.clear();
        self.next_id = 1;
        self.seed(Utc::now());
    }

    fn seed(&mut self, now: DateTime<Utc>) {
        let seeded = [
            ("document.pdf", 3.2, 5),
            ("report.xlsx", 4.1, 4),
            ("backup.zip", 6.8, 3),
        ];
        for (file_name, entropy, minutes_ago) in seeded {
            let event = AttackEvent {
                id: self.next_id(),
                file_name: file_name.to_string(),
                entropy,
                timestamp: now - Duration::minutes(minutes_ago),
                status: AttackStatus::from_entropy(entropy),
            };
            self.attack_events.insert(0, event);
        }

        let record = BlockchainRecord {
            id: self.next_id(),
            hash: SEED_HASH.to_string(),
            transaction_id: "0xabc123...def456".to_string(),
            timestamp: now - Duration::minutes(2),
            block_number: SEED_BLOCK,
        };
        self.blockchain_records.push(record);

        let stored = self.contract_event(
            ContractEventType::LogHashStored,
            [("hash", json!(SEED_HASH))],
            now - Duration::minutes(1),
        );
        self.contract_events.push(stored);
    }

    fn contract_event<const N: usize>(
        &mut self,
        kind: ContractEventType,
        extra: [(&str, serde_json::Value); N],
        timestamp: DateTime<Utc>,
    ) -> ContractEvent {
        let mut data = BTreeMap::from([("deviceId".to_string(), json!(self.device_id))]);
        data.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v)));
        ContractEvent {
            id: self.next_id(),
            kind,
            data,
            timestamp,
        }
    }

    fn next_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

impl Default for DemoSession {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_ID)
    }
}

/// Truncated pseudo hash in the dashboard's `0x12345678...9abcdef0` style
fn short_hash(rng: &mut impl Rng) -> String {
    format!("0x{:08x}...{:08x}", rng.gen::<u32>(), rng.gen::<u32>())
}
