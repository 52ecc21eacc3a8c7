//! Port statistics types
//!
//! `AllInfo` is the strict form of the `all_info` literal embedded in
//! `PortStatisticsRpm.htm`. The three arrays are parallel per port slot, except
//! `pkts`, which holds four counters per slot:
//!
//! ```text
//! state:       [s0, s1, ...]
//! link_status: [l0, l1, ...]
//! pkts:        [tx_good0, tx_bad0, rx_good0, rx_bad0, tx_good1, ...]
//! ```

use crate::error::ReshapeError;
use serde::Deserialize;

/// Port state value the switch uses for an enabled port
pub const PORT_STATE_ACTIVE: i64 = 1;

/// Counters stored per port slot in `pkts`
pub const COUNTERS_PER_PORT: usize = 4;

/// Session state of the switch web interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Decoded `all_info` literal
///
/// Keys the switch does not send decode as empty arrays.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AllInfo {
    #[serde(default)]
    pub state: Vec<i64>,
    #[serde(default)]
    pub link_status: Vec<i64>,
    #[serde(default)]
    pub pkts: Vec<u64>,
}

/// One of the four packet counters reported for an active port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketCounter {
    TxGood,
    TxBad,
    RxGood,
    RxBad,
}

impl PacketCounter {
    /// All counters in `pkts` window order
    pub const ALL: [PacketCounter; COUNTERS_PER_PORT] = [
        PacketCounter::TxGood,
        PacketCounter::TxBad,
        PacketCounter::RxGood,
        PacketCounter::RxBad,
    ];

    /// Name the switch UI uses for this counter
    pub fn key(self) -> &'static str {
        match self {
            PacketCounter::TxGood => "TxGoodPkt",
            PacketCounter::TxBad => "TxBadPkt",
            PacketCounter::RxGood => "RxGoodPkt",
            PacketCounter::RxBad => "RxBadPkt",
        }
    }

    /// Offset of this counter inside a port's `pkts` window
    pub fn offset(self) -> usize {
        match self {
            PacketCounter::TxGood => 0,
            PacketCounter::TxBad => 1,
            PacketCounter::RxGood => 2,
            PacketCounter::RxBad => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketCounters {
    pub tx_good: u64,
    pub tx_bad: u64,
    pub rx_good: u64,
    pub rx_bad: u64,
}

impl PacketCounters {
    fn from_window(window: &[u64; COUNTERS_PER_PORT]) -> Self {
        let [tx_good, tx_bad, rx_good, rx_bad] = *window;
        Self {
            tx_good,
            tx_bad,
            rx_good,
            rx_bad,
        }
    }

    pub fn get(&self, counter: PacketCounter) -> u64 {
        match counter {
            PacketCounter::TxGood => self.tx_good,
            PacketCounter::TxBad => self.tx_bad,
            PacketCounter::RxGood => self.rx_good,
            PacketCounter::RxBad => self.rx_bad,
        }
    }

    /// Iterate all four counters in window order
    pub fn iter(&self) -> impl Iterator<Item = (PacketCounter, u64)> + '_ {
        PacketCounter::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Statistics for one physical port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub state: i64,
    pub link_status: i64,
    /// Present only when `state` is [`PORT_STATE_ACTIVE`]
    pub counters: Option<PacketCounters>,
}

impl PortRecord {
    pub fn is_active(&self) -> bool {
        self.state == PORT_STATE_ACTIVE
    }
}

impl AllInfo {
    /// Number of port slots, taken from `state`
    pub fn port_count(&self) -> usize {
        self.state.len()
    }
}

/// Build the record for port slot `index` (0-based, port number `index + 1`)
///
/// Counters are read from `pkts[4 * index..4 * index + 4]` only for active ports.
/// A window past the end of `pkts` is an error, never truncated or zero-filled.
pub fn reshape_port(info: &AllInfo, index: usize) -> Result<PortRecord, ReshapeError> {
    let state = *info.state.get(index).ok_or(ReshapeError::PortOutOfRange {
        index,
        ports: info.state.len(),
    })?;
    let link_status = *info
        .link_status
        .get(index)
        .ok_or(ReshapeError::MissingLinkStatus {
            index,
            len: info.link_status.len(),
        })?;

    let counters = if state == PORT_STATE_ACTIVE {
        let start = COUNTERS_PER_PORT * index;
        let needed = start + COUNTERS_PER_PORT;
        let window: &[u64; COUNTERS_PER_PORT] = info
            .pkts
            .get(start..needed)
            .and_then(|w| w.try_into().ok())
            .ok_or(ReshapeError::PacketsOutOfRange {
                index,
                len: info.pkts.len(),
                needed,
            })?;
        Some(PacketCounters::from_window(window))
    } else {
        None
    };

    Ok(PortRecord {
        state,
        link_status,
        counters,
    })
}

/// Reshape every port slot in order
pub fn reshape_ports(info: &AllInfo) -> Result<Vec<PortRecord>, ReshapeError> {
    (0..info.port_count())
        .map(|index| reshape_port(info, index))
        .collect()
}
