//! Solidity ABI encoding for the kill-switch contract.
//!
//! Only the shapes the contract needs are supported: dynamic `string`
//! arguments in, a single `uint8` out, and topic hashes for its two events.

use sha3::{Digest, Keccak256};

use crate::error::AbiError;

/// `getStatus(string deviceId) view returns (uint8)`
pub const GET_STATUS: &str = "getStatus(string)";

/// `storeLogHash(string deviceId, string logHash)`
pub const STORE_LOG_HASH: &str = "storeLogHash(string,string)";

/// `reportInfection(string deviceId)`
pub const REPORT_INFECTION: &str = "reportInfection(string)";

/// `event LogHashStored(string indexed deviceId, string logHash)`
pub const LOG_HASH_STORED_EVENT: &str = "LogHashStored(string,string)";

/// `event InfectionDetected(string indexed deviceId)`
pub const INFECTION_DETECTED_EVENT: &str = "InfectionDetected(string)";

const WORD: usize = 32;

/// Keccak-256 digest
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// 4-byte function selector for a canonical signature
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Topic under which an indexed `string` is logged.
///
/// Indexed dynamic values are stored as the hash of their contents, so the
/// device id itself cannot be recovered from a log.
#[must_use]
pub fn device_topic(device_id: &str) -> [u8; 32] {
    keccak256(device_id.as_bytes())
}

/// A call against the contract, with its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCall<'a> {
    /// Read the device status
    GetStatus {
        /// Device identifier
        device_id: &'a str,
    },
    /// Anchor a log digest for a device
    StoreLogHash {
        /// Device identifier
        device_id: &'a str,
        /// Digest of the log being anchored
        log_hash: &'a str,
    },
    /// Flag a device as infected
    ReportInfection {
        /// Device identifier
        device_id: &'a str,
    },
}

impl ContractCall<'_> {
    /// Contract function name (used as the operation label in errors and logs)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetStatus { .. } => "getStatus",
            Self::StoreLogHash { .. } => "storeLogHash",
            Self::ReportInfection { .. } => "reportInfection",
        }
    }

    /// Canonical signature
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::GetStatus { .. } => GET_STATUS,
            Self::StoreLogHash { .. } => STORE_LOG_HASH,
            Self::ReportInfection { .. } => REPORT_INFECTION,
        }
    }

    /// True for `view` functions that are executed with `eth_call`
    #[must_use]
    pub const fn is_view(&self) -> bool {
        matches!(self, Self::GetStatus { .. })
    }

    /// Device the call refers to
    #[must_use]
    pub const fn device_id(&self) -> &str {
        match self {
            Self::GetStatus { device_id }
            | Self::StoreLogHash { device_id, .. }
            | Self::ReportInfection { device_id } => *device_id,
        }
    }

    /// Selector followed by the encoded arguments
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let selector = selector(self.signature());
        match self {
            Self::GetStatus { device_id } | Self::ReportInfection { device_id } => {
                encode_strings(selector, &[*device_id])
            }
            Self::StoreLogHash {
                device_id,
                log_hash,
            } => encode_strings(selector, &[*device_id, *log_hash]),
        }
    }
}

/// Encode a call whose arguments are all `string`.
///
/// Layout: one offset word per argument (relative to the start of the
/// arguments), then for each argument a length word and its UTF-8 bytes
/// right-padded to a word boundary.
#[must_use]
pub fn encode_strings(selector: [u8; 4], args: &[&str]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();

    for arg in args {
        head.extend_from_slice(&uint_word((args.len() * WORD + tail.len()) as u64));
        tail.extend_from_slice(&uint_word(arg.len() as u64));
        tail.extend_from_slice(arg.as_bytes());
        tail.resize(tail.len().next_multiple_of(WORD), 0);
    }

    let mut out = Vec::with_capacity(4 + head.len() + tail.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    out
}

/// Decode a single `uint8` return value
pub fn decode_uint8(data: &[u8]) -> Result<u8, AbiError> {
    let word = data.get(..WORD).ok_or(AbiError::Truncated {
        expected: WORD,
        actual: data.len(),
    })?;

    if word[..WORD - 1].iter().any(|b| *b != 0) {
        return Err(AbiError::Uint8Overflow);
    }
    Ok(word[WORD - 1])
}

/// Lowercase `0x`-prefixed hex
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed hex data (`"0x"` is empty data)
pub fn from_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let digits = strip_prefix(s)?;
    hex::decode(digits).map_err(|e| AbiError::InvalidHex(format!("{s}: {e}")))
}

/// Parse a JSON-RPC hex quantity such as `0x1a`
pub fn parse_quantity(s: &str) -> Result<u64, AbiError> {
    let digits = strip_prefix(s).map_err(|_| AbiError::InvalidQuantity(s.to_string()))?;
    if digits.is_empty() {
        return Err(AbiError::InvalidQuantity(s.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| AbiError::InvalidQuantity(s.to_string()))
}

fn strip_prefix(s: &str) -> Result<&str, AbiError> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| AbiError::InvalidHex(format!("missing 0x prefix: {s}")))
}

fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vectors() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_contract_selectors() {
        assert_eq!(hex::encode(selector(GET_STATUS)), "22b05ed2");
        assert_eq!(hex::encode(selector(STORE_LOG_HASH)), "18cc50b7");
        assert_eq!(hex::encode(selector(REPORT_INFECTION)), "9107817e");
    }

    #[test]
    fn test_device_topic() {
        assert_eq!(
            hex::encode(device_topic("DEVICE_001")),
            "1fb564e4f3270818aa7eedd5c356f87848e24a5c7559b76bca32ea0ad679be85"
        );
    }

    #[test]
    fn test_encode_single_string() {
        let data = ContractCall::GetStatus {
            device_id: "DEVICE_001",
        }
        .encode();

        assert_eq!(data.len(), 4 + 3 * 32);
        assert_eq!(&data[..4], &[0x22, 0xb0, 0x5e, 0xd2]);
        // offset
        assert_eq!(data[4 + 31], 0x20);
        // length
        assert_eq!(data[36 + 31], 10);
        assert_eq!(&data[68..78], b"DEVICE_001");
        assert!(data[78..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_two_strings() {
        let log_hash = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
        let data = ContractCall::StoreLogHash {
            device_id: "DEVICE_001",
            log_hash,
        }
        .encode();

        let args = &data[4..];
        // head: two offsets
        assert_eq!(args[31], 0x40);
        assert_eq!(args[63], 0x80);
        // first string at 0x40
        assert_eq!(args[0x40 + 31], 10);
        assert_eq!(&args[0x60..0x6a], b"DEVICE_001");
        // second string at 0x80: 64 bytes spans exactly two words
        assert_eq!(args[0x80 + 31], 64);
        assert_eq!(&args[0xa0..0xe0], log_hash.as_bytes());
        assert_eq!(args.len(), 0xe0);
    }

    #[test]
    fn test_encode_empty_string() {
        let data = encode_strings(selector(REPORT_INFECTION), &[""]);
        assert_eq!(data.len(), 4 + 2 * 32);
        assert!(data[36..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_call_metadata() {
        let call = ContractCall::ReportInfection { device_id: "D" };
        assert_eq!(call.name(), "reportInfection");
        assert_eq!(call.device_id(), "D");
        assert!(!call.is_view());
        assert!(ContractCall::GetStatus { device_id: "D" }.is_view());
    }

    #[test]
    fn test_decode_uint8() {
        let mut word = [0u8; 32];
        word[31] = 1;
        assert_eq!(decode_uint8(&word), Ok(1));

        // trailing data is ignored
        let mut long = word.to_vec();
        long.extend_from_slice(&[0xff; 32]);
        assert_eq!(decode_uint8(&long), Ok(1));

        word[30] = 1;
        assert_eq!(decode_uint8(&word), Err(AbiError::Uint8Overflow));

        assert_eq!(
            decode_uint8(&[]),
            Err(AbiError::Truncated {
                expected: 32,
                actual: 0
            })
        );
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(from_hex("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(from_hex("0xdeadBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(from_hex("deadbeef").is_err());
        assert!(from_hex("0xabc").is_err());
        assert_eq!(to_hex(&[0x01, 0xab]), "0x01ab");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0"), Ok(0));
        assert_eq!(parse_quantity("0x1a"), Ok(26));
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("26").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }
}
