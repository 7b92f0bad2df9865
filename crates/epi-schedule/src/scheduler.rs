//! `Scheduler` — the time-ordered event queue and simulation clock.
//!
//! # Ordering
//!
//! Entries are kept in a `BinaryHeap` keyed by `(time, seq)`, where `seq` is
//! a monotonically increasing insertion counter.  The earliest time pops
//! first; equal times pop in insertion order.  Insert and extract-min are
//! both O(log n), and insertion stays valid while the queue is being drained,
//! which is required because handlers enqueue new entries mid-run.
//!
//! # Clock
//!
//! The scheduler owns the simulation clock.  Popping an entry moves the
//! clock to that entry's time; `advance_to` moves it forward without popping.
//! The clock never moves backwards, and entries earlier than the clock are
//! rejected by [`Scheduler::push`] with [`ScheduleError::InPast`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

use epi_core::TimePoint;

use crate::{Event, ScheduleEntry, ScheduleError, ScheduleResult};

/// Receives entries popped by [`Scheduler::run_until`].
///
/// The scheduler is handed back on every call so the handler can enqueue
/// follow-up entries.  Returning `ControlFlow::Break(())` stops the run after
/// the current entry.
pub trait EventHandler {
    type Error;

    fn handle(
        &mut self,
        entry:     ScheduleEntry,
        scheduler: &mut Scheduler,
    ) -> Result<ControlFlow<()>, Self::Error>;
}

/// Summary of one [`Scheduler::run_until`] call.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RunStats {
    /// Number of entries handed to the handler.
    pub handled: usize,
    /// `true` if the handler asked to stop (as opposed to the queue running
    /// dry or reaching the stop time).
    pub broke:   bool,
}

/// A priority queue of `(TimePoint, Event)` entries plus the current clock.
pub struct Scheduler {
    heap:     BinaryHeap<QueuedEntry>,
    next_seq: u64,
    now:      TimePoint,
}

impl Scheduler {
    /// An empty schedule with its clock at `origin`.
    pub fn new(origin: TimePoint) -> Self {
        Self {
            heap:     BinaryHeap::new(),
            next_seq: 0,
            now:      origin,
        }
    }

    /// The current simulation time.
    #[inline]
    pub fn now(&self) -> TimePoint {
        self.now
    }

    /// Enqueue `event` at absolute time `time`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InPast`] if `time` is earlier than the clock.  An
    /// entry at exactly the current time is accepted and fires after every
    /// entry already queued for that time.
    pub fn push(&mut self, time: TimePoint, event: Event) -> ScheduleResult<()> {
        if time < self.now {
            return Err(ScheduleError::InPast { at: time, now: self.now });
        }
        self.heap.push(QueuedEntry { time, seq: self.next_seq, event });
        self.next_seq += 1;
        Ok(())
    }

    /// Time of the earliest queued entry, or `None` if the queue is empty.
    pub fn peek_time(&self) -> Option<TimePoint> {
        self.heap.peek().map(|e| e.time)
    }

    /// Remove and return the earliest entry if its time is ≤ `stop`,
    /// advancing the clock to that time.
    pub fn pop_until(&mut self, stop: TimePoint) -> Option<ScheduleEntry> {
        if self.peek_time()? > stop {
            return None;
        }
        let queued = self.heap.pop()?;
        debug_assert!(queued.time >= self.now, "queued entry earlier than the clock");
        self.now = queued.time;
        Some(ScheduleEntry { time: queued.time, event: queued.event })
    }

    /// Pop entries with time ≤ `stop` and hand them to `handler` until the
    /// queue is exhausted, the next entry lies beyond `stop`, or the handler
    /// breaks.
    ///
    /// The clock is left at the time of the last handled entry; callers that
    /// need it on `stop` exactly follow up with [`advance_to`][Self::advance_to].
    pub fn run_until<H: EventHandler>(
        &mut self,
        stop:    TimePoint,
        handler: &mut H,
    ) -> Result<RunStats, H::Error> {
        let mut stats = RunStats::default();
        while let Some(entry) = self.pop_until(stop) {
            stats.handled += 1;
            if handler.handle(entry, self)?.is_break() {
                stats.broke = true;
                break;
            }
        }
        Ok(stats)
    }

    /// Move the clock forward to `time`.  Earlier times are ignored.
    pub fn advance_to(&mut self, time: TimePoint) {
        if time > self.now {
            self.now = time;
        }
    }

    /// Re-anchor the clock of an empty schedule at `origin`, which may lie
    /// before the current clock.
    ///
    /// Returns `false` (and changes nothing) if anything is queued.
    pub fn reset_origin(&mut self, origin: TimePoint) -> bool {
        if !self.heap.is_empty() {
            return false;
        }
        self.now = origin;
        true
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Heap record ordered so that `BinaryHeap` (a max-heap) yields the
/// earliest time first and, among equal times, the lowest sequence number.
#[derive(Debug)]
struct QueuedEntry {
    time:  TimePoint,
    seq:   u64,
    event: Event,
}

impl PartialEq for QueuedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for QueuedEntry {}

impl PartialOrd for QueuedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
            .reverse()
    }
}
