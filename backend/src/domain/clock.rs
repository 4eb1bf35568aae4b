//! Timestamps at the precision the store keeps them.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use tokio::sync::{Mutex, MutexGuard};

/// Truncate to microseconds so values read back from storage compare equal
/// to the values handed out when they were written.
pub(crate) fn to_store_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(6)
}

/// Current time at store precision.
pub(crate) fn store_timestamp(clock: &dyn Clock) -> DateTime<Utc> {
    to_store_precision(clock.utc())
}

/// Serialises id allocation with timestamp issue so that, within one
/// process, later ids never carry an earlier creation time.
#[derive(Debug, Default)]
pub(crate) struct StampSequence {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl StampSequence {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold the sequence while ids are allocated, then [`StampGuard::issue`].
    pub(crate) async fn lock(&self) -> StampGuard<'_> {
        StampGuard(self.last.lock().await)
    }
}

/// Exclusive access to a [`StampSequence`].
pub(crate) struct StampGuard<'a>(MutexGuard<'a, Option<DateTime<Utc>>>);

impl StampGuard<'_> {
    /// Current time at store precision, never earlier than the previous
    /// stamp even if the clock steps back.
    pub(crate) fn issue(&mut self, clock: &dyn Clock) -> DateTime<Utc> {
        let now = store_timestamp(clock);
        let stamp = self.0.map_or(now, |previous| previous.max(now));
        *self.0 = Some(stamp);
        stamp
    }
}
