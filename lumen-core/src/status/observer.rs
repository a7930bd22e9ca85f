//! Status notification delivery

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use super::events::StatusEvent;
use super::snapshot::StatusSnapshot;

/// Receiver of status events
///
/// Called from whichever context the network stack reports from, so
/// implementations must not block.
pub trait StatusObserver {
    fn notify(&mut self, event: StatusEvent);
}

impl StatusObserver for StatusSnapshot {
    fn notify(&mut self, event: StatusEvent) {
        self.apply(event);
    }
}

/// Forwards status events into an embassy channel
///
/// Events that arrive while the channel is full are dropped and counted.
pub struct ChannelObserver<'ch, M: RawMutex, const N: usize> {
    sender: Sender<'ch, M, StatusEvent, N>,
    dropped: u32,
}

impl<'ch, M: RawMutex, const N: usize> ChannelObserver<'ch, M, N> {
    /// Forward events into the channel behind `sender`
    pub fn new(sender: Sender<'ch, M, StatusEvent, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Number of events lost to a full channel
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<M: RawMutex, const N: usize> StatusObserver for ChannelObserver<'_, M, N> {
    fn notify(&mut self, event: StatusEvent) {
        if self.sender.try_send(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("Status channel full, dropped {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::WifiStatus;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    #[test]
    fn test_forwards_events() {
        let channel: Channel<NoopRawMutex, StatusEvent, 4> = Channel::new();
        let mut observer = ChannelObserver::new(channel.sender());

        observer.notify(StatusEvent::Wifi(WifiStatus::Connecting));
        observer.notify(StatusEvent::Rssi(-55));

        assert_eq!(
            channel.try_receive().ok(),
            Some(StatusEvent::Wifi(WifiStatus::Connecting))
        );
        assert_eq!(channel.try_receive().ok(), Some(StatusEvent::Rssi(-55)));
        assert_eq!(observer.dropped(), 0);
    }

    #[test]
    fn test_counts_dropped_events() {
        let channel: Channel<NoopRawMutex, StatusEvent, 2> = Channel::new();
        let mut observer = ChannelObserver::new(channel.sender());

        for rssi in 0..5 {
            observer.notify(StatusEvent::Rssi(-rssi));
        }
        assert_eq!(observer.dropped(), 3);
    }

    #[test]
    fn test_snapshot_as_observer() {
        let mut snapshot = StatusSnapshot::new();
        snapshot.notify(StatusEvent::Wifi(WifiStatus::Failed));
        assert_eq!(snapshot.wifi, WifiStatus::Failed);
    }
}
