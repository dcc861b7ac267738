//! Turn queue
//!
//! Commands that must run after the current turn of the host loop has
//! finished, e.g. starting playback once a newly selected source has been
//! committed to the media surface. Only ordering is guaranteed, never a
//! delay.

use std::collections::VecDeque;

/// Command deferred to the end of the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Start playback of whatever source is loaded
    Play,
}

/// FIFO of deferred commands
#[derive(Debug, Default)]
pub struct TurnQueue {
    pending: VecDeque<Deferred>,
}

impl TurnQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a command for after the current turn
    ///
    /// Scheduling the same command twice is allowed; both run.
    pub fn schedule(&mut self, command: Deferred) {
        self.pending.push_back(command);
    }

    /// Take every pending command in scheduling order
    pub fn take(&mut self) -> Vec<Deferred> {
        self.pending.drain(..).collect()
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_in_order() {
        let mut queue = TurnQueue::new();
        queue.schedule(Deferred::Play);
        queue.schedule(Deferred::Play);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.take(), vec![Deferred::Play, Deferred::Play]);
        assert!(queue.is_empty());
        assert!(queue.take().is_empty());
    }
}
