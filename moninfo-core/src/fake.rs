//! In-memory query engine and records for unit tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::errors::MonitorInfoError;
use crate::query::{QueryEngine, QueryTarget};
use crate::record::RawRecord;

#[derive(Debug, Clone)]
enum FakeValue {
    Bool(bool),
    Long(i32),
    UChar(u8),
    LongArray(Vec<i32>),
    Text(String),
}

/// A record backed by a property map.  A property stored with the wrong
/// type reads as `None`, like a failed VARIANT conversion.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRecord {
    props: HashMap<String, FakeValue>,
}

impl FakeRecord {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with(mut self, name: &str, value: FakeValue) -> Self {
        self.props.insert(name.to_owned(), value);
        self
    }

    pub(crate) fn with_bool(self, name: &str, value: bool) -> Self {
        self.with(name, FakeValue::Bool(value))
    }

    pub(crate) fn with_long(self, name: &str, value: i32) -> Self {
        self.with(name, FakeValue::Long(value))
    }

    pub(crate) fn with_uchar(self, name: &str, value: u8) -> Self {
        self.with(name, FakeValue::UChar(value))
    }

    pub(crate) fn with_long_array(self, name: &str, value: Vec<i32>) -> Self {
        self.with(name, FakeValue::LongArray(value))
    }

    /// Store `text` as an array of character codes.
    pub(crate) fn with_codes(self, name: &str, text: &str) -> Self {
        let codes = text.bytes().map(i32::from).collect();
        self.with_long_array(name, codes)
    }

    pub(crate) fn with_string(self, name: &str, value: &str) -> Self {
        self.with(name, FakeValue::Text(value.to_owned()))
    }

    pub(crate) fn without(mut self, name: &str) -> Self {
        self.props.remove(name);
        self
    }
}

impl RawRecord for FakeRecord {
    fn get_bool(&self, name: &str) -> Option<bool> {
        match self.props.get(name)? {
            FakeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn get_long(&self, name: &str) -> Option<i32> {
        match self.props.get(name)? {
            FakeValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    fn get_uchar(&self, name: &str) -> Option<u8> {
        match self.props.get(name)? {
            FakeValue::UChar(v) => Some(*v),
            _ => None,
        }
    }

    fn get_long_array(&self, name: &str) -> Option<Vec<i32>> {
        match self.props.get(name)? {
            FakeValue::LongArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn get_string(&self, name: &str) -> Option<String> {
        match self.props.get(name)? {
            FakeValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Engine returning a canned outcome and counting invocations.
pub(crate) struct FakeEngine {
    outcome: Result<Vec<FakeRecord>, String>,
    pub(crate) calls: Cell<usize>,
    pub(crate) last_target: Cell<Option<QueryTarget>>,
}

impl FakeEngine {
    pub(crate) fn ok(records: Vec<FakeRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: Cell::new(0),
            last_target: Cell::new(None),
        }
    }

    pub(crate) fn failing(msg: &str) -> Self {
        Self {
            outcome: Err(msg.to_owned()),
            calls: Cell::new(0),
            last_target: Cell::new(None),
        }
    }
}

impl QueryEngine for FakeEngine {
    type Record = FakeRecord;

    fn execute(&self, target: &QueryTarget) -> Result<Vec<FakeRecord>, MonitorInfoError> {
        self.calls.set(self.calls.get() + 1);
        self.last_target.set(Some(*target));
        self.outcome
            .clone()
            .map_err(MonitorInfoError::QueryError)
    }
}
