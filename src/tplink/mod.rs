pub mod client;
pub mod parser;
pub mod transport;
pub mod types;

pub use client::SessionClient;
pub use transport::{HttpTransport, SwitchTransport};
pub use types::{PacketCounter, PacketCounters, PortRecord, SessionState};
