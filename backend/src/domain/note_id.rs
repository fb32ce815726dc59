//! Note identifier generation.
//!
//! Identifiers are numeric strings of epoch milliseconds. A single generator
//! never repeats a value: when the clock has not moved past the last issued
//! value the next id is the last one plus one.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use mockable::Clock;

use super::NoteId;

/// Source of fresh note identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait NoteIdGenerator: Send + Sync {
    /// Issue the next identifier.
    fn next_id(&self) -> NoteId;
}

/// Millisecond timestamp ids that are strictly increasing per instance.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use notes_backend::domain::{NoteIdGenerator, TimestampNoteIds};
///
/// let ids = TimestampNoteIds::new(Arc::new(DefaultClock));
/// let first = ids.next_id();
/// let second = ids.next_id();
/// assert!(second.as_ref().parse::<i64>().unwrap() > first.as_ref().parse::<i64>().unwrap());
/// ```
pub struct TimestampNoteIds {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl TimestampNoteIds {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    fn next_millis(&self) -> i64 {
        let now = self.clock.utc().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > last { now } else { last.saturating_add(1) };
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(observed) => last = observed,
            }
        }
    }
}

impl NoteIdGenerator for TimestampNoteIds {
    fn next_id(&self) -> NoteId {
        NoteId::from_millis(self.next_millis())
    }
}
