//! Boundary to the management-query engine.
//!
//! The core never talks to WMI directly: it hands a [`QueryTarget`] to a
//! [`QueryEngine`] and reads the returned records through
//! [`RawRecord`](crate::record::RawRecord).

use crate::errors::MonitorInfoError;
use crate::record::RawRecord;

/// Query text and namespace for one call.  Immutable, passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTarget {
    pub query: &'static str,
    pub namespace: &'static str,
}

/// The display-monitor identification class.
pub const MONITOR_ID_TARGET: QueryTarget = QueryTarget {
    query: "SELECT * FROM WmiMonitorID",
    namespace: "ROOT\\WMI",
};

/// Executes a query and returns its records in delivery order.
///
/// An `Err` means the query could not run at all.  `Ok` with an empty
/// `Vec` means it ran and matched nothing.
pub trait QueryEngine {
    type Record: RawRecord;

    fn execute(&self, target: &QueryTarget) -> Result<Vec<Self::Record>, MonitorInfoError>;
}

/// Outcome of one step of a result enumerator.
#[derive(Debug)]
pub enum Fetch<T> {
    /// The next record.
    Item(T),
    /// The enumerator is exhausted.
    Done,
    /// The wait for the next record expired before one arrived.
    TimedOut,
    /// The enumerator itself failed.
    Failed(String),
}

/// Pull records from `next` until it is exhausted or `limit` is reached.
///
/// A failed step fails the whole query, even after some records were read:
/// a partial result must not look like a complete one.  A timeout or the
/// record cap ends the drain early with a warning.
pub fn drain_records<T>(
    target: &QueryTarget,
    limit: usize,
    mut next: impl FnMut() -> Fetch<T>,
) -> Result<Vec<T>, MonitorInfoError> {
    let mut records = Vec::new();
    while records.len() < limit {
        match next() {
            Fetch::Item(record) => records.push(record),
            Fetch::Done => return Ok(records),
            Fetch::TimedOut => {
                log::warn!(
                    "{} in {}: timed out waiting for the next record, keeping {} record(s)",
                    target.query,
                    target.namespace,
                    records.len()
                );
                return Ok(records);
            }
            Fetch::Failed(msg) => {
                return Err(MonitorInfoError::QueryError(format!(
                    "{} after {} record(s): {msg}",
                    target.query,
                    records.len()
                )))
            }
        }
    }

    log::warn!(
        "{} in {}: stopped at the {limit}-record cap, remaining records dropped",
        target.query,
        target.namespace
    );
    Ok(records)
}

/// Stand-in engine for platforms without WMI.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngine;

/// Record type of [`UnavailableEngine`]; never constructed.
#[derive(Debug)]
pub enum NoRecord {}

impl RawRecord for NoRecord {
    fn get_bool(&self, _: &str) -> Option<bool> {
        match *self {}
    }
    fn get_long(&self, _: &str) -> Option<i32> {
        match *self {}
    }
    fn get_uchar(&self, _: &str) -> Option<u8> {
        match *self {}
    }
    fn get_long_array(&self, _: &str) -> Option<Vec<i32>> {
        match *self {}
    }
    fn get_string(&self, _: &str) -> Option<String> {
        match *self {}
    }
}

impl QueryEngine for UnavailableEngine {
    type Record = NoRecord;

    fn execute(&self, target: &QueryTarget) -> Result<Vec<NoRecord>, MonitorInfoError> {
        Err(MonitorInfoError::Unsupported(format!(
            "WMI namespace {} is only available on Windows",
            target.namespace
        )))
    }
}
