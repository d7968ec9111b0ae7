//! Ordering of in-flight data requests
//!
//! Every request gets a monotonically increasing sequence number and the
//! epoch it was issued in. Switching endpoints opens a new epoch; answers to
//! requests from an older epoch belong to a record list that no longer
//! exists and are dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub sequence: u64,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Newest answer so far in the current epoch
    Current,
    /// Current epoch, but a newer request already completed
    Reordered,
    /// Issued before the last endpoint switch
    Stale,
}

#[derive(Debug, Default)]
pub struct RequestGuard {
    next_sequence: u64,
    epoch: u64,
    last_applied: Option<u64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTag {
        self.next_sequence += 1;
        RequestTag {
            sequence: self.next_sequence,
            epoch: self.epoch,
        }
    }

    /// Invalidate everything issued so far
    pub fn next_epoch(&mut self) {
        self.epoch += 1;
        self.last_applied = None;
    }

    pub fn classify(&self, tag: RequestTag) -> Freshness {
        if tag.epoch != self.epoch {
            return Freshness::Stale;
        }
        match self.last_applied {
            Some(last) if tag.sequence <= last => Freshness::Reordered,
            _ => Freshness::Current,
        }
    }

    pub fn mark_applied(&mut self, tag: RequestTag) {
        if tag.epoch == self.epoch {
            self.last_applied = Some(self.last_applied.map_or(tag.sequence, |l| l.max(tag.sequence)));
        }
    }
}
