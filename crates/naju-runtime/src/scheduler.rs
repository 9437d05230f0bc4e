#![forbid(unsafe_code)]

//! Cancellable delayed messages on a virtual clock.
//!
//! [`Scheduler`] stores one message per [`Token`] together with its deadline.
//! Nothing fires on its own: the owner advances time and receives due
//! entries one at a time through [`pop_due`](Scheduler::pop_due), dispatching
//! each to completion before asking for the next. Work scheduled while
//! dispatching is visible to the same advance if its deadline falls inside
//! the window.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use naju_runtime::Scheduler;
//!
//! let mut sched = Scheduler::new();
//! let a = sched.schedule(Duration::from_millis(16), "a");
//! let _b = sched.schedule(Duration::from_millis(16), "b");
//! assert!(sched.cancel(a));
//!
//! let mut seen = Vec::new();
//! sched.advance(Duration::from_millis(20), |_, fired| seen.push(fired.msg));
//! assert_eq!(seen, vec!["b"]);
//! ```
//!
//! # Invariants
//!
//! 1. Entries fire in deadline order; equal deadlines fire in scheduling order.
//! 2. The clock never moves backwards and equals each entry's deadline while
//!    it is being dispatched.
//! 3. A cancelled token never fires. Cancellation is synchronous and total.
//! 4. Tokens are never reused within one scheduler.
//!
//! # Failure Modes
//!
//! - Cancelling a fired, cancelled or unknown token returns `false` and
//!   changes nothing.
//! - A handler that keeps re-scheduling with a zero delay keeps the current
//!   advance running; controllers always use a positive interval.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Handle to a scheduled entry, used for cancellation and stale-tick checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

impl Token {
    /// Raw sequence number.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A due entry handed back to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<M> {
    /// Token the entry was scheduled under.
    pub token: Token,
    /// Deadline the entry fired at.
    pub at: Duration,
    /// The scheduled message.
    pub msg: M,
}

/// Registry of cancellable, delayed messages.
pub struct Scheduler<M> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), M>,
    deadlines: HashMap<u64, Duration>,
}

impl<M> fmt::Debug for Scheduler<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

impl<M> Default for Scheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

impl<M> Scheduler<M> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 1,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Register `msg` to fire after `delay`.
    pub fn schedule(&mut self, delay: Duration, msg: M) -> Token {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, seq), msg);
        self.deadlines.insert(seq, deadline);
        let deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
        tracing::trace!(token = seq, deadline_ms, "scheduled");
        Token(seq)
    }

    /// Remove a pending entry. Returns whether it was still pending.
    pub fn cancel(&mut self, token: Token) -> bool {
        let Some(deadline) = self.deadlines.remove(&token.0) else {
            return false;
        };
        self.queue.remove(&(deadline, token.0));
        tracing::trace!(token = token.0, "cancelled");
        true
    }

    /// Cancel `token` if present, leaving `None` behind.
    pub fn cancel_slot(&mut self, slot: &mut Option<Token>) -> bool {
        slot.take().is_some_and(|token| self.cancel(token))
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Pop the earliest entry due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<M>> {
        let (&(deadline, seq), _) = self.queue.first_key_value()?;
        if deadline > until {
            return None;
        }
        let msg = self.queue.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        if deadline > self.now {
            self.now = deadline;
        }
        Some(Fired {
            token: Token(seq),
            at: deadline,
            msg,
        })
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_clock(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    /// Fire everything due within `dt`, handing each entry to `dispatch`
    /// together with the scheduler so it can register follow-up work.
    ///
    /// Returns the number of entries dispatched.
    pub fn advance<F>(&mut self, dt: Duration, mut dispatch: F) -> usize
    where
        F: FnMut(&mut Self, Fired<M>),
    {
        let until = self.now.saturating_add(dt);
        let mut fired = 0;
        while let Some(entry) = self.pop_due(until) {
            dispatch(self, entry);
            fired += 1;
        }
        self.advance_clock(until);
        fired
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Number of pending entries.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether `token` is still pending.
    #[must_use]
    pub fn is_pending(&self, token: Token) -> bool {
        self.deadlines.contains_key(&token.0)
    }

    /// Deadline of the earliest pending entry.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Tokens of pending entries whose message matches `pred`, in firing order.
    pub fn pending_where<P>(&self, mut pred: P) -> Vec<Token>
    where
        P: FnMut(&M) -> bool,
    {
        self.queue
            .iter()
            .filter(|(_, msg)| pred(msg))
            .map(|(&(_, seq), _)| Token(seq))
            .collect()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
