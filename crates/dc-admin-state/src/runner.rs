//! Request runner state machine.
//!
//! One asynchronous unit of work at a time, exposed as observable state:
//! {idle, loading, success, error}. Starting a run clears the previous
//! result and error atomically; settling replaces the state wholesale.
//! Concurrent runs are last-write-wins: outcomes carry the sequence number
//! of the invocation they belong to, and whichever outcome is applied last
//! is what the view reflects. No cancellation, no de-duplication.

use serde_json::Value;

/// Observable state of the request runner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerState {
    pub loading: bool,
    /// Human description of the in-flight or last operation.
    pub label: String,
    /// Payload of the last successful run, if any.
    pub result: Option<Value>,
    /// User-facing message of the last failed run; empty means no error.
    pub error: String,
    /// Sequence number of the invocation this state reflects.
    pub seq: u64,
    next_seq: u64,
}

/// Settled outcome of one invocation, delivered back to the state.
#[derive(Debug, Clone)]
pub struct RunnerOutcome {
    pub seq: u64,
    pub label: String,
    pub result: Result<Value, String>,
}

impl RunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run: loading becomes true, prior result and error are
    /// cleared in the same transition. Returns the sequence number that the
    /// matching outcome must carry.
    pub fn start(&mut self, label: &str) -> u64 {
        self.next_seq += 1;
        self.loading = true;
        self.label = label.to_string();
        self.result = None;
        self.error.clear();
        self.seq = self.next_seq;
        self.next_seq
    }

    /// Apply a settled outcome. Last write wins: a late outcome from an
    /// earlier invocation still replaces the state, matching the source
    /// behavior this console preserves.
    pub fn apply(&mut self, outcome: RunnerOutcome) {
        self.loading = false;
        self.label = outcome.label;
        self.seq = outcome.seq;
        match outcome.result {
            Ok(value) => {
                self.result = Some(value);
                self.error.clear();
            }
            Err(message) => {
                self.result = None;
                self.error = message;
            }
        }
    }

    /// True when neither a run is in flight nor any outcome has been shown.
    pub fn is_idle(&self) -> bool {
        !self.loading && self.error.is_empty() && self.result.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(seq: u64, label: &str, value: Value) -> RunnerOutcome {
        RunnerOutcome { seq, label: label.into(), result: Ok(value) }
    }

    fn err(seq: u64, label: &str, msg: &str) -> RunnerOutcome {
        RunnerOutcome { seq, label: label.into(), result: Err(msg.into()) }
    }

    #[test]
    fn test_start_clears_previous_facets() {
        let mut state = RunnerState::new();
        let seq = state.start("load users");
        state.apply(err(seq, "load users", "boom"));
        assert_eq!(state.error, "boom");

        state.start("load users");
        assert!(state.loading);
        assert!(state.error.is_empty());
        assert!(state.result.is_none());
    }

    #[test]
    fn test_facets_are_mutually_exclusive_after_settle() {
        let mut state = RunnerState::new();
        let seq = state.start("op");
        state.apply(ok(seq, "op", json!({"code": 200})));
        assert!(!state.loading);
        assert!(state.result.is_some());
        assert!(state.error.is_empty());

        let seq = state.start("op");
        state.apply(err(seq, "op", "request failed"));
        assert!(state.result.is_none());
        assert!(!state.error.is_empty());
    }

    #[test]
    fn test_last_write_wins_across_overlapping_runs() {
        let mut state = RunnerState::new();
        let first = state.start("a");
        let second = state.start("b");
        assert_ne!(first, second);

        // Second run settles first, then the stale first run lands late.
        state.apply(ok(second, "b", json!(2)));
        assert_eq!(state.result, Some(json!(2)));
        state.apply(ok(first, "a", json!(1)));
        assert_eq!(state.result, Some(json!(1)));
        assert_eq!(state.seq, first);
    }

    #[test]
    fn test_idle_until_first_run() {
        let state = RunnerState::new();
        assert!(state.is_idle());
    }
}
