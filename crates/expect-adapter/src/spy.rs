use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Clonable call recorder backing the call-count matchers.
///
/// Clones share one log, so a spy can be handed to the code under test
/// while the test keeps its own handle for assertions.
#[derive(Clone, Debug, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<Value>>>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation's arguments, conventionally a JSON array.
    pub fn record(&self, args: Value) {
        self.calls.lock().push(args);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().clone()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_calls_in_order() {
        let spy = Spy::new();
        spy.record(json!(["first"]));
        spy.record(json!(["second", 2]));
        assert_eq!(spy.call_count(), 2);
        assert_eq!(spy.calls(), vec![json!(["first"]), json!(["second", 2])]);
    }

    #[test]
    fn clones_share_one_log() {
        let spy = Spy::new();
        let handle = spy.clone();
        handle.record(json!([1]));
        assert_eq!(spy.call_count(), 1);
        spy.reset();
        assert_eq!(handle.call_count(), 0);
    }
}
