//! The canonical monitor row.
//!
//! [`MonitorRow`] is an owned, COM-free value.  Every column is text, even
//! the boolean and integer ones, so consumers can treat a row as a flat
//! string table.  Field order is the column order and the serialization
//! order.

use serde::Serialize;

use crate::decode::trim_padding;

/// Column names, in output order.
pub const COLUMNS: [&str; 8] = [
    "manufacturer",
    "model",
    "serial_number",
    "monitor_name",
    "instance_name",
    "active",
    "manufacture_year",
    "manufacture_week",
];

/// One normalized `WmiMonitorID` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorRow {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub monitor_name: String,
    pub instance_name: String,
    pub active: String,
    pub manufacture_year: String,
    pub manufacture_week: String,
}

impl MonitorRow {
    /// `(column, value)` pairs in [`COLUMNS`] order.
    pub fn columns(&self) -> [(&'static str, &str); 8] {
        [
            (COLUMNS[0], self.manufacturer.as_str()),
            (COLUMNS[1], self.model.as_str()),
            (COLUMNS[2], self.serial_number.as_str()),
            (COLUMNS[3], self.monitor_name.as_str()),
            (COLUMNS[4], self.instance_name.as_str()),
            (COLUMNS[5], self.active.as_str()),
            (COLUMNS[6], self.manufacture_year.as_str()),
            (COLUMNS[7], self.manufacture_week.as_str()),
        ]
    }

    /// Look a value up by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Copy of this row with trailing NUL padding removed from every column.
    pub fn trimmed(&self) -> MonitorRow {
        let t = |s: &String| trim_padding(s).to_owned();
        MonitorRow {
            manufacturer: t(&self.manufacturer),
            model: t(&self.model),
            serial_number: t(&self.serial_number),
            monitor_name: t(&self.monitor_name),
            instance_name: t(&self.instance_name),
            active: t(&self.active),
            manufacture_year: t(&self.manufacture_year),
            manufacture_week: t(&self.manufacture_week),
        }
    }
}
