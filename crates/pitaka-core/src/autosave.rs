use chrono::{DateTime, Duration, Utc};

/// Default quiet period before an autosave fires.
pub const DEFAULT_AUTOSAVE_DELAY_MS: i64 = 1500;

/// Single-slot debounce timer driven by explicit timestamps.
///
/// Each [`schedule`](Debouncer::schedule) replaces the pending snapshot and
/// pushes the deadline out, so a burst of edits produces one save carrying the
/// latest state.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: DateTime<Utc>,
    snapshot: T,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: DateTime<Utc>, snapshot: T) {
        self.pending = Some(Pending {
            due: now + self.delay,
            snapshot,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Takes the snapshot once its deadline has passed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now => self.flush(),
            _ => None,
        }
    }

    /// Takes the pending snapshot regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.snapshot)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_AUTOSAVE_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::seconds(2));
        debouncer.schedule(at(0), "first");
        assert_eq!(debouncer.poll(at(1)), None);
        assert_eq!(debouncer.poll(at(2)), Some("first"));
        assert_eq!(debouncer.poll(at(3)), None);
    }

    #[test]
    fn rescheduling_replaces_snapshot_and_deadline() {
        let mut debouncer = Debouncer::new(Duration::seconds(2));
        debouncer.schedule(at(0), 1);
        debouncer.schedule(at(1), 2);
        assert_eq!(debouncer.due_at(), Some(at(3)));
        assert_eq!(debouncer.poll(at(2)), None);
        assert_eq!(debouncer.poll(at(3)), Some(2));
    }

    #[test]
    fn flush_and_cancel() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(at(0), "pending");
        assert_eq!(debouncer.flush(), Some("pending"));
        assert!(!debouncer.is_pending());

        debouncer.schedule(at(0), "dropped");
        debouncer.cancel();
        assert_eq!(debouncer.poll(at(60)), None);
    }
}
