//! Connectivity status model
//!
//! The network stack reports WiFi and time-sync progress as explicit
//! events. Consumers either fold them into a [`StatusSnapshot`] or forward
//! them through a [`StatusObserver`].

pub mod events;
pub mod observer;
pub mod snapshot;

pub use events::{Ipv4Address, StatusEvent, TimeSyncStatus, WifiStatus};
pub use observer::{ChannelObserver, StatusObserver};
pub use snapshot::{StatusSnapshot, TimeOfDay, UtcOffset};
