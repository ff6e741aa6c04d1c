use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Unix timestamp of the NEM nemesis block (2015-03-29T00:06:25 UTC).
/// All on-chain timestamps count seconds from this instant.
pub const NEM_EPOCH_UNIX: u64 = 1_427_587_585;

/// The three NIS1 networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Mijin,
}

impl Network {
    /// Tag OR'd into the version field of every transaction on this network.
    pub fn version_tag(self) -> u32 {
        match self {
            Network::Mainnet => 0x6800_0000,
            Network::Testnet => 0x9800_0000,
            Network::Mijin => 0x6000_0000,
        }
    }

    /// Full version field for a transaction sub-version (1 or 2).
    pub fn transaction_version(self, sub_version: u32) -> u32 {
        self.version_tag() | sub_version
    }

    /// Leading byte of the decoded form of every address on this network.
    pub fn address_prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x68,
            Network::Testnet => 0x98,
            Network::Mijin => 0x60,
        }
    }

    /// First character of the base32 address form.
    pub fn address_letter(self) -> char {
        match self {
            Network::Mainnet => 'N',
            Network::Testnet => 'T',
            Network::Mijin => 'M',
        }
    }

    /// Transaction lifetime used when computing deadlines, in minutes.
    pub fn due_minutes(self) -> u32 {
        if self.is_testnet() {
            60
        } else {
            24 * 60
        }
    }

    pub fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Stable identifier used in stored wallet records.
    pub fn id(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Mijin => "mijin",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Converts a Unix timestamp to seconds since the NEM epoch, saturating
/// at zero for instants before the nemesis block.
pub fn network_time(unix_secs: u64) -> u32 {
    unix_secs.saturating_sub(NEM_EPOCH_UNIX) as u32
}

/// Current network timestamp from the system clock.
pub fn network_time_now() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    network_time(now.as_secs())
}
