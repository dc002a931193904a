//! Board support shared by the firmware and its host-side tests.
//!
//! The game hands out `core::time::Duration`s; the hardware side runs on the
//! Embassy time base, so everything crossing that boundary goes through
//! [`to_embassy`].

#![allow(dead_code)]

use embassy_time::Duration;

#[cfg(target_os = "none")]
mod hardware;

#[cfg(target_os = "none")]
pub use hardware::HardwareBoard;

/// Converts a game delay into an Embassy duration, saturating on overflow.
///
/// Sub-microsecond remainders are dropped; every delay the game asks for is
/// a whole number of microseconds.
pub fn to_embassy(duration: core::time::Duration) -> Duration {
    u64::try_from(duration.as_micros())
        .ok()
        .and_then(Duration::try_from_micros)
        .unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_periods_survive_conversion() {
        let converted = to_embassy(core::time::Duration::from_micros(451));
        assert_eq!(converted.as_micros(), 451);

        let lead_in = to_embassy(core::time::Duration::from_millis(1_000));
        assert_eq!(lead_in.as_millis(), 1_000);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(to_embassy(core::time::Duration::MAX), Duration::MAX);
    }
}
