//! Status events reported by the network stack

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// WiFi station state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WifiStatus {
    #[default]
    Disconnected,
    Connecting,
    /// Associated and holding an address
    Connected,
    /// Gave up after exhausting retries
    Failed,
}

impl WifiStatus {
    /// Short label for the status screen
    pub const fn label(&self) -> &'static str {
        match self {
            WifiStatus::Disconnected => "Disconnected",
            WifiStatus::Connecting => "Connecting",
            WifiStatus::Connected => "Connected",
            WifiStatus::Failed => "Failed",
        }
    }
}

/// NTP time synchronization state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeSyncStatus {
    #[default]
    NotSynced,
    Syncing,
    Synced,
}

impl TimeSyncStatus {
    /// Short label for the status screen
    pub const fn label(&self) -> &'static str {
        match self {
            TimeSyncStatus::NotSynced => "Not synced",
            TimeSyncStatus::Syncing => "Syncing",
            TimeSyncStatus::Synced => "Synced",
        }
    }
}

/// IPv4 address in network order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ipv4Address(pub [u8; 4]);

impl Ipv4Address {
    /// Create an address from its four octets
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    /// The four octets, most significant first
    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

/// A single status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusEvent {
    /// WiFi station changed state
    Wifi(WifiStatus),
    /// DHCP lease obtained
    IpAssigned(Ipv4Address),
    /// Signal strength sample in dBm
    Rssi(i8),
    /// Time sync changed state
    TimeSync(TimeSyncStatus),
    /// Wall clock reading in seconds since the Unix epoch
    Time(u64),
}
