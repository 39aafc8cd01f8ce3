use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::container::value::Value;

/// Positional and named placeholder values for one resolution call.
///
/// The positional lane is a FIFO queue consumed strictly left to right
/// across the parameter list; the named lane is keyed by parameter name and
/// consulted ahead of the positional front. Consumption returns the shrunk
/// cursor so threading through the strategy chain is explicit: a
/// placeholder taken for parameter *i* is gone for parameter *i+1*, and an
/// exhausted cursor makes resolution fall through to declared defaults
/// rather than failing outright.
#[derive(Default)]
pub struct Placeholders {
    named: HashMap<String, Value>,
    positional: VecDeque<Value>,
}

impl Placeholders {
    /// An empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor over the given positional values, in order.
    pub fn from_positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            named: HashMap::new(),
            positional: values.into_iter().collect(),
        }
    }

    /// Add a named entry consumed by the parameter with the same name.
    pub fn with_named(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    /// Append a positional value at the back of the queue.
    pub fn with_positional(mut self, value: Value) -> Self {
        self.positional.push_back(value);
        self
    }

    /// Take the entry registered under the given parameter name.
    pub fn take_named(mut self, name: &str) -> (Option<Value>, Self) {
        let value = self.named.remove(name);
        (value, self)
    }

    /// Take the front of the positional queue.
    pub fn take_positional(mut self) -> (Option<Value>, Self) {
        let value = self.positional.pop_front();
        (value, self)
    }

    /// How many positional values are left.
    pub fn positional_remaining(&self) -> usize {
        self.positional.len()
    }

    /// Whether both lanes are exhausted.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}

impl fmt::Debug for Placeholders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholders")
            .field("named", &self.named.len())
            .field("positional", &self.positional.len())
            .finish()
    }
}
