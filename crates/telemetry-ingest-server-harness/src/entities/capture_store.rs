use std::mem;
use std::sync::Mutex;

use super::CapturedRequest;

#[derive(Debug, Default)]
struct CaptureState {
    requests: Vec<CapturedRequest>,
    caller_identity: String,
}

/// Thread-safe buffer of the write requests one mock service instance has
/// received, plus the most recently observed caller identity.
///
/// Tests hold a handle to the store and read it from outside the serving
/// task. Every operation runs under the store's single lock and touches no
/// I/O, so a drain is atomic with respect to concurrent appends: a request
/// lands either before or after it, never in both results and never in
/// neither.
#[derive(Debug, Default)]
pub struct CaptureStore {
    state: Mutex<CaptureState>,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `request` and overwrites the stored caller identity, which
    /// may be empty when the call carried no metadata.
    pub fn append(&self, request: CapturedRequest, caller_identity: String) {
        if let Ok(mut state) = self.state.lock() {
            state.requests.push(request);
            state.caller_identity = caller_identity;
        }
    }

    /// Returns every request received so far, in arrival order, and resets
    /// the store to empty.
    pub fn drain_all(&self) -> Vec<CapturedRequest> {
        self.state
            .lock()
            .map(|mut state| mem::take(&mut state.requests))
            .unwrap_or_default()
    }

    /// Pops the identity of the most recent caller, or an empty string when
    /// no call arrived since the last read.
    pub fn take_caller_identity(&self) -> String {
        self.state
            .lock()
            .map(|mut state| mem::take(&mut state.caller_identity))
            .unwrap_or_default()
    }
}
