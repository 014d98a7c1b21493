//! Session clock conversions
//!
//! Log records are stamped with the number of seconds since the session
//! epoch. The epoch and the current time are both `chrono` UTC timestamps.

use chrono::{DateTime, Utc};

const NANOS_PER_SECOND: f64 = 1e9;

/// Seconds elapsed from `epoch` to `now`, negative if `now` is earlier.
///
/// A `chrono::Duration` only counts nanoseconds for about 292 years either
/// way, a longer span gives `None` and the session clock reports NaN for it.
pub fn seconds_since(epoch: &DateTime<Utc>, now: &DateTime<Utc>) -> Option<f64> {
    now.signed_duration_since(*epoch)
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_seconds_since() {
        let epoch = Utc::now();

        assert_eq!(seconds_since(&epoch, &epoch), Some(0.0));
        assert_eq!(
            seconds_since(&epoch, &(epoch + Duration::milliseconds(1500))),
            Some(1.5)
        );
        assert_eq!(
            seconds_since(&epoch, &(epoch - Duration::milliseconds(250))),
            Some(-0.25)
        );

        // Past the nanosecond range of a duration
        assert_eq!(
            seconds_since(&epoch, &(epoch + Duration::days(365 * 300))),
            None
        );
    }
}
