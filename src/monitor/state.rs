use super::model::{classify, MatchBoard, MatchSnapshot};

/// Core monitor state machine. Every fetch, scheduled or forced, is a poll
/// cycle: it takes a monotonic sequence number when it begins and reports
/// back with that number when it completes. Completions are applied only if
/// their sequence is at least the last applied one and the monitor has not
/// been stopped, so a slow stale poll can never overwrite a fresher result
/// and nothing mutates after teardown.
#[derive(Debug)]
pub struct MonitorState {
    next_seq: u64,
    last_applied_seq: u64,
    stopped: bool,
    /// Last-known-good snapshot set; `None` until the first success
    snapshots: Option<Vec<MatchSnapshot>>,
    /// Most recent fetch error; cleared by the next applied success
    last_error: Option<String>,
    /// True until the first cycle resolves either way
    first_load: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        MonitorState {
            next_seq: 0,
            last_applied_seq: 0,
            stopped: false,
            snapshots: None,
            last_error: None,
            first_load: true,
        }
    }

    /// Begin a new poll cycle, returning its sequence number, or `None` if
    /// the monitor has been stopped.
    pub fn begin_cycle(&mut self) -> Option<u64> {
        if self.stopped {
            return None;
        }
        self.next_seq += 1;
        Some(self.next_seq)
    }

    /// Apply a successful fetch. The whole snapshot set is replaced
    /// atomically; returns whether the result was applied.
    pub fn apply_success(&mut self, seq: u64, snapshots: Vec<MatchSnapshot>) -> bool {
        if !self.cycle_current(seq) {
            return false;
        }
        self.last_applied_seq = seq;
        self.snapshots = Some(snapshots);
        self.last_error = None;
        self.first_load = false;
        true
    }

    /// Apply a failed fetch. Previously fetched snapshots are retained so
    /// the view degrades to last-known-good data instead of going blank.
    pub fn apply_error(&mut self, seq: u64, message: String) -> bool {
        if !self.cycle_current(seq) {
            return false;
        }
        self.last_applied_seq = seq;
        self.last_error = Some(message);
        self.first_load = false;
        true
    }

    /// Mark the monitor stopped. In-flight cycles may still complete but
    /// their results are discarded.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    fn cycle_current(&self, seq: u64) -> bool {
        !self.stopped && seq >= self.last_applied_seq
    }

    /// Render the current state. Classification is recomputed from the
    /// last applied set on every call.
    pub fn board(&self) -> MatchBoard {
        let classified = classify(self.snapshots.as_deref().unwrap_or(&[]));
        MatchBoard {
            loading: self.first_load,
            live: classified.live,
            finished: classified.finished,
            error: self.last_error.clone(),
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
