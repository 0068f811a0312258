//! Monitor identification rows: query once, normalize every record.
//!
//! [`collect_monitors`] is the platform entry point.  It never fails: a
//! query that cannot run and a query that matches nothing both produce an
//! empty `Vec`, each with its own warning so the two stay distinguishable
//! in logs.

use crate::errors::MonitorInfoError;
use crate::query::{QueryEngine, MONITOR_ID_TARGET};
use crate::record::normalize_record;
use crate::row::MonitorRow;

/// Run the monitor query against `engine` and normalize the result.
///
/// Rows come back in the order the engine delivered the records.  Each row
/// is built fresh from its own record.
pub fn collect_monitors_with<E: QueryEngine>(engine: &E) -> Vec<MonitorRow> {
    let records = match engine.execute(&MONITOR_ID_TARGET) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Error retrieving monitor information from WMI: {e}");
            return Vec::new();
        }
    };

    if records.is_empty() {
        log::warn!(
            "WMI query '{}' in {} returned no records",
            MONITOR_ID_TARGET.query,
            MONITOR_ID_TARGET.namespace
        );
        return Vec::new();
    }

    records.iter().map(normalize_record).collect()
}

/// Collect one row per monitor known to WMI on this machine.
///
/// Initialises the calling thread's COM apartment for the duration of the
/// call.  Blocking; safe to call from several threads at once.
#[cfg(windows)]
pub fn collect_monitors() -> Vec<MonitorRow> {
    let _com = match crate::com::COMGuard::init() {
        Ok(guard) => guard,
        Err(e) => {
            log::warn!("Error retrieving monitor information from WMI: {e}");
            return Vec::new();
        }
    };
    collect_monitors_with(&crate::wmi::WmiEngine)
}

/// Collect one row per monitor known to WMI on this machine.
///
/// WMI does not exist here, so this logs a warning and returns no rows.
#[cfg(not(windows))]
pub fn collect_monitors() -> Vec<MonitorRow> {
    collect_monitors_with(&crate::query::UnavailableEngine)
}

/// Like [`collect_monitors`], but a query that cannot run is returned as
/// the error instead of being logged.  Zero monitors is still `Ok(vec![])`.
#[cfg(windows)]
pub fn try_collect_monitors() -> Result<Vec<MonitorRow>, MonitorInfoError> {
    let _com = crate::com::COMGuard::init()?;
    try_collect_monitors_with(&crate::wmi::WmiEngine)
}

/// Like [`collect_monitors`], but a query that cannot run is returned as
/// the error instead of being logged.  Here that is always `Unsupported`.
#[cfg(not(windows))]
pub fn try_collect_monitors() -> Result<Vec<MonitorRow>, MonitorInfoError> {
    try_collect_monitors_with(&crate::query::UnavailableEngine)
}

/// Same query, but surface the failure instead of folding it into an empty
/// result.  Zero records is still `Ok(vec![])`.
pub fn try_collect_monitors_with<E: QueryEngine>(
    engine: &E,
) -> Result<Vec<MonitorRow>, MonitorInfoError> {
    let records = engine.execute(&MONITOR_ID_TARGET)?;
    Ok(records.iter().map(normalize_record).collect())
}
