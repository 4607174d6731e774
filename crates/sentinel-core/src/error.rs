use std::time::Duration;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// EIP-1193 error code for a request the user declined in their wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors raised while encoding or decoding contract data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// Input was not valid `0x`-prefixed hex
    #[error("invalid hex data: {0}")]
    InvalidHex(String),

    /// Return data was shorter than the declared output
    #[error("return data too short: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes received
        actual: usize,
    },

    /// A `uint8` word carried bits above the lowest byte
    #[error("return word does not fit in uint8")]
    Uint8Overflow,

    /// Status byte outside the SAFE/LOCKED domain
    #[error("device status {0} is outside the known range")]
    InvalidStatus(u8),

    /// Hex quantity could not be parsed
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// Errors raised while parsing an account or contract address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Address did not start with `0x`
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    /// Address was not 20 bytes
    #[error("address must be 40 hex characters, got {0}")]
    InvalidLength(usize),

    /// Address contained non-hex characters
    #[error("address contains non-hex characters: {0}")]
    InvalidHex(String),
}

/// Errors reported by a wallet provider or while interpreting its replies
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with an EIP-1193 / JSON-RPC error object
    #[error("provider error ({code}): {message}")]
    Rpc {
        /// Error code (4001 = user rejected)
        code: i64,
        /// Error message from the provider
        message: String,
        /// Optional structured payload (e.g. revert data)
        data: Option<serde_json::Value>,
    },

    /// Transport failure talking to the provider
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The provider did not answer in time, or a receipt never arrived
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reply had the wrong shape for the method that was called
    #[error("unexpected response to {method}: {reason}")]
    UnexpectedResponse {
        /// JSON-RPC method
        method: String,
        /// What was wrong with the reply
        reason: String,
    },

    /// Contract data could not be encoded or decoded
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// The provider exposed no accounts to sign with
    #[error("no accounts available from provider")]
    NoAccounts,

    /// The transaction was mined but reverted
    #[error("transaction {0} reverted")]
    Reverted(String),
}

impl ProviderError {
    /// Build an [`ProviderError::UnexpectedResponse`]
    pub fn unexpected(method: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the user declined the request in their wallet
    #[must_use]
    pub const fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }

    /// Returns the provider error code if this is an RPC error
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Outcome category of a failed gateway operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    /// No wallet provider is wired into the gateway
    WalletUnavailable,
    /// The user declined account access or a transaction
    UserRejected,
    /// Any provider, network or contract-level failure
    ContractCallFailed,
    /// The caller passed an unusable argument
    InvalidInput,
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WalletUnavailable => write!(f, "wallet unavailable"),
            Self::UserRejected => write!(f, "user rejected"),
            Self::ContractCallFailed => write!(f, "contract call failed"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}

/// Errors returned by the contract gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No wallet provider is present; nothing was sent
    #[error("wallet provider unavailable")]
    WalletUnavailable,

    /// The user declined the wallet prompt
    #[error("{operation} rejected in wallet: {source}")]
    UserRejected {
        /// Contract function being invoked
        operation: &'static str,
        /// Original provider error
        source: ProviderError,
    },

    /// Provider, network or contract failure
    #[error("{operation} failed: {source}")]
    ContractCallFailed {
        /// Contract function being invoked
        operation: &'static str,
        /// Original provider error
        source: ProviderError,
    },

    /// Argument rejected before any provider interaction
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// Normalize a provider failure raised while running `operation`
    #[must_use]
    pub fn from_provider(operation: &'static str, source: ProviderError) -> Self {
        if source.is_user_rejection() {
            Self::UserRejected { operation, source }
        } else {
            Self::ContractCallFailed { operation, source }
        }
    }

    /// The outcome category of this error
    #[must_use]
    pub const fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::WalletUnavailable => GatewayErrorKind::WalletUnavailable,
            Self::UserRejected { .. } => GatewayErrorKind::UserRejected,
            Self::ContractCallFailed { .. } => GatewayErrorKind::ContractCallFailed,
            Self::InvalidInput(_) => GatewayErrorKind::InvalidInput,
        }
    }

    /// The underlying provider error, if there was one
    #[must_use]
    pub const fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::UserRejected { source, .. } | Self::ContractCallFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// Returns true if no provider was available
    #[must_use]
    pub const fn is_wallet_unavailable(&self) -> bool {
        matches!(self, Self::WalletUnavailable)
    }
}
