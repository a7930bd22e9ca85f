//! Aggregated connectivity state

use core::fmt;

use super::events::{Ipv4Address, StatusEvent, TimeSyncStatus, WifiStatus};
use crate::color::Rgb;

const SECS_PER_DAY: u64 = 86_400;

/// Largest offset any time zone uses, in minutes
const MAX_OFFSET_MINUTES: i16 = 14 * 60;

/// Fixed offset from UTC, in minutes east of Greenwich
///
/// Values are clamped to the range real zones use (-14:00 to +14:00).
/// There is no daylight saving handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcOffset(i16);

impl UtcOffset {
    /// Zero offset
    pub const UTC: Self = Self(0);

    /// Offset from a signed minute count
    pub const fn from_minutes(minutes: i16) -> Self {
        if minutes > MAX_OFFSET_MINUTES {
            Self(MAX_OFFSET_MINUTES)
        } else if minutes < -MAX_OFFSET_MINUTES {
            Self(-MAX_OFFSET_MINUTES)
        } else {
            Self(minutes)
        }
    }

    /// Offset from a signed whole-hour count
    pub const fn from_hours(hours: i8) -> Self {
        Self::from_minutes(hours as i16 * 60)
    }

    /// Offset in minutes
    pub const fn minutes(self) -> i16 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("UTC");
        }
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Time of day for a Unix timestamp
    pub const fn from_unix(secs: u64) -> Self {
        let of_day = secs % SECS_PER_DAY;
        Self {
            hours: (of_day / 3600) as u8,
            minutes: (of_day / 60 % 60) as u8,
            seconds: (of_day % 60) as u8,
        }
    }

    /// Local time of day for a Unix timestamp
    pub const fn from_unix_with_offset(secs: u64, offset: UtcOffset) -> Self {
        let local = secs as i128 + offset.minutes() as i128 * 60;
        Self::from_unix(local.rem_euclid(SECS_PER_DAY as i128) as u64)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Latest known connectivity state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    pub wifi: WifiStatus,
    /// Only present while connected
    pub ip: Option<Ipv4Address>,
    /// Only present while connected
    pub rssi: Option<i8>,
    pub time_sync: TimeSyncStatus,
    /// Last wall-clock reading
    pub unix_time: Option<u64>,
}

impl StatusSnapshot {
    /// Disconnected, unsynced, no address
    pub const fn new() -> Self {
        Self {
            wifi: WifiStatus::Disconnected,
            ip: None,
            rssi: None,
            time_sync: TimeSyncStatus::NotSynced,
            unix_time: None,
        }
    }

    /// Fold an event into the snapshot
    ///
    /// Returns true if anything changed. Leaving the connected state drops
    /// the address and signal strength.
    pub fn apply(&mut self, event: StatusEvent) -> bool {
        let before = *self;

        match event {
            StatusEvent::Wifi(status) => {
                self.wifi = status;
                if status != WifiStatus::Connected {
                    self.ip = None;
                    self.rssi = None;
                }
            }
            StatusEvent::IpAssigned(ip) => self.ip = Some(ip),
            StatusEvent::Rssi(rssi) => self.rssi = Some(rssi),
            StatusEvent::TimeSync(status) => self.time_sync = status,
            StatusEvent::Time(secs) => self.unix_time = Some(secs),
        }

        let changed = *self != before;
        #[cfg(feature = "defmt")]
        if changed && (self.wifi != before.wifi || self.time_sync != before.time_sync) {
            defmt::debug!(
                "Status: wifi {:?} -> {:?}, time {:?} -> {:?}",
                before.wifi,
                self.wifi,
                before.time_sync,
                self.time_sync
            );
        }
        changed
    }

    /// UTC time of day, if the clock has been synchronized
    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        self.local_time_of_day(UtcOffset::UTC)
    }

    /// Time of day shifted by `offset`, if the clock has been synchronized
    pub fn local_time_of_day(&self, offset: UtcOffset) -> Option<TimeOfDay> {
        match (self.time_sync, self.unix_time) {
            (TimeSyncStatus::Synced, Some(secs)) => {
                Some(TimeOfDay::from_unix_with_offset(secs, offset))
            }
            _ => None,
        }
    }

    /// Color the status LED shows for this state
    ///
    /// Connected shows blue until the clock is synced, then green.
    pub fn indicator_color(&self) -> Rgb {
        match self.wifi {
            WifiStatus::Disconnected => Rgb::OFF,
            WifiStatus::Connecting => Rgb::YELLOW,
            WifiStatus::Connected if self.time_sync == TimeSyncStatus::Syncing => Rgb::BLUE,
            WifiStatus::Connected => Rgb::GREEN,
            WifiStatus::Failed => Rgb::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day() {
        assert_eq!(
            TimeOfDay::from_unix(0),
            TimeOfDay { hours: 0, minutes: 0, seconds: 0 }
        );
        // 2024-01-01 13:45:07 UTC
        assert_eq!(
            TimeOfDay::from_unix(1_704_116_707),
            TimeOfDay { hours: 13, minutes: 45, seconds: 7 }
        );
        assert_eq!(
            TimeOfDay::from_unix(86_399),
            TimeOfDay { hours: 23, minutes: 59, seconds: 59 }
        );
    }

    #[test]
    fn test_time_of_day_with_offset() {
        // 12:34:56 UTC
        let secs = 45_296;
        assert_eq!(
            TimeOfDay::from_unix_with_offset(secs, UtcOffset::from_hours(2)),
            TimeOfDay { hours: 14, minutes: 34, seconds: 56 }
        );
        assert_eq!(
            TimeOfDay::from_unix_with_offset(secs, UtcOffset::from_minutes(330)),
            TimeOfDay { hours: 18, minutes: 4, seconds: 56 }
        );
        // Wraps back across midnight
        assert_eq!(
            TimeOfDay::from_unix_with_offset(3_600, UtcOffset::from_hours(-5)),
            TimeOfDay { hours: 20, minutes: 0, seconds: 0 }
        );
        assert_eq!(
            TimeOfDay::from_unix_with_offset(secs, UtcOffset::UTC),
            TimeOfDay::from_unix(secs)
        );
    }

    #[test]
    fn test_utc_offset_clamp_and_display() {
        extern crate std;
        use std::string::ToString;

        assert_eq!(UtcOffset::from_hours(20).minutes(), 14 * 60);
        assert_eq!(UtcOffset::from_minutes(i16::MIN).minutes(), -14 * 60);
        assert_eq!(UtcOffset::UTC.to_string(), "UTC");
        assert_eq!(UtcOffset::from_hours(2).to_string(), "UTC+02:00");
        assert_eq!(UtcOffset::from_minutes(-570).to_string(), "UTC-09:30");
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut s = StatusSnapshot::new();
        assert!(s.apply(StatusEvent::Wifi(WifiStatus::Connecting)));
        assert!(!s.apply(StatusEvent::Wifi(WifiStatus::Connecting)));
        assert!(s.apply(StatusEvent::Wifi(WifiStatus::Connected)));
        assert!(s.apply(StatusEvent::IpAssigned(Ipv4Address::new(10, 0, 0, 2))));
        assert!(s.apply(StatusEvent::Rssi(-60)));
        assert!(!s.apply(StatusEvent::Rssi(-60)));
        assert_eq!(s.ip, Some(Ipv4Address::new(10, 0, 0, 2)));
    }

    #[test]
    fn test_disconnect_clears_link_details() {
        let mut s = StatusSnapshot::new();
        s.apply(StatusEvent::Wifi(WifiStatus::Connected));
        s.apply(StatusEvent::IpAssigned(Ipv4Address::new(10, 0, 0, 2)));
        s.apply(StatusEvent::Rssi(-70));
        s.apply(StatusEvent::Wifi(WifiStatus::Disconnected));
        assert_eq!(s.ip, None);
        assert_eq!(s.rssi, None);
    }

    #[test]
    fn test_time_requires_sync() {
        let mut s = StatusSnapshot::new();
        s.apply(StatusEvent::Time(3600));
        assert_eq!(s.time_of_day(), None);
        assert_eq!(s.local_time_of_day(UtcOffset::from_hours(1)), None);
        s.apply(StatusEvent::TimeSync(TimeSyncStatus::Synced));
        assert_eq!(
            s.time_of_day(),
            Some(TimeOfDay { hours: 1, minutes: 0, seconds: 0 })
        );
        assert_eq!(
            s.local_time_of_day(UtcOffset::from_hours(1)),
            Some(TimeOfDay { hours: 2, minutes: 0, seconds: 0 })
        );
    }

    #[test]
    fn test_indicator_colors() {
        let mut s = StatusSnapshot::new();
        assert_eq!(s.indicator_color(), Rgb::OFF);
        s.apply(StatusEvent::Wifi(WifiStatus::Connecting));
        assert_eq!(s.indicator_color(), Rgb::YELLOW);
        s.apply(StatusEvent::Wifi(WifiStatus::Connected));
        assert_eq!(s.indicator_color(), Rgb::GREEN);
        s.apply(StatusEvent::TimeSync(TimeSyncStatus::Syncing));
        assert_eq!(s.indicator_color(), Rgb::BLUE);
        s.apply(StatusEvent::TimeSync(TimeSyncStatus::Synced));
        assert_eq!(s.indicator_color(), Rgb::GREEN);
        s.apply(StatusEvent::Wifi(WifiStatus::Failed));
        assert_eq!(s.indicator_color(), Rgb::RED);
    }
}
