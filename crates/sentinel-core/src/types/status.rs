use serde::{Deserialize, Serialize};

use crate::error::AbiError;

/// Device status as stored by the kill-switch contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum DeviceStatusCode {
    /// Device is operating normally
    Safe = 0,
    /// Kill switch engaged
    Locked = 1,
}

impl DeviceStatusCode {
    /// Raw on-chain value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if the kill switch is engaged
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

impl TryFrom<u8> for DeviceStatusCode {
    type Error = AbiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Safe),
            1 => Ok(Self::Locked),
            other => Err(AbiError::InvalidStatus(other)),
        }
    }
}

impl std::fmt::Display for DeviceStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Locked => write!(f, "LOCKED"),
        }
    }
}

/// Status shown on the dashboard health panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    /// No threat observed
    #[default]
    Safe,
    /// Suspicious activity observed
    Warning,
    /// Device locked down
    Locked,
}

impl From<DeviceStatusCode> for DashboardStatus {
    fn from(code: DeviceStatusCode) -> Self {
        match code {
            DeviceStatusCode::Safe => Self::Safe,
            DeviceStatusCode::Locked => Self::Locked,
        }
    }
}

impl std::fmt::Display for DashboardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Locked => write!(f, "locked"),
        }
    }
}
