//! `moninfo_core` -- Pure Rust core for WMI monitor identification rows.
//!
//! Queries `WmiMonitorID` in `ROOT\WMI` and turns each record into a flat,
//! all-text [`MonitorRow`](row::MonitorRow).  Consumed by:
//! - `moninfo-cli` (standalone `moninfo` tool)
//! - `moninfo-ffi` (C ABI DLL for ctypes / other languages)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `MonitorInfoError` enum via `thiserror` |
//! | [`decode`] | Char-code arrays, booleans and integers -> text |
//! | [`row`] | `MonitorRow` and the fixed column schema |
//! | [`record`] | `RawRecord` accessors and per-record normalization |
//! | [`query`] | `QueryEngine` boundary and the fixed query target |
//! | [`monitor`] | Query once, apply the empty/failure policy, collect rows |
//! | `com` | `COMGuard` RAII wrapper for COM apartment init (Windows) |
//! | `wmi` | `WmiEngine` over `IWbemServices` (Windows) |

#[cfg(windows)]
pub mod com;
pub mod decode;
pub mod errors;
pub mod monitor;
pub mod query;
pub mod record;
pub mod row;
#[cfg(windows)]
pub mod wmi;

#[cfg(test)]
mod fake;

pub use monitor::{collect_monitors, collect_monitors_with, try_collect_monitors};
pub use row::MonitorRow;
