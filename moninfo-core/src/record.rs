//! Record normalization: one raw query record -> one [`MonitorRow`].

use crate::decode::{decode_char_codes, format_bool, format_integer, FieldKind};
use crate::row::MonitorRow;

/// Typed, read-only access to one query result record.
///
/// Accessors return `None` when the property is missing or cannot be
/// converted to the requested type.
pub trait RawRecord {
    fn get_bool(&self, name: &str) -> Option<bool>;
    fn get_long(&self, name: &str) -> Option<i32>;
    fn get_uchar(&self, name: &str) -> Option<u8>;
    fn get_long_array(&self, name: &str) -> Option<Vec<i32>>;
    fn get_string(&self, name: &str) -> Option<String>;
}

/// `WmiMonitorID` property names and how each one is encoded, in column
/// order.
pub const MONITOR_ID_FIELDS: [(&str, FieldKind); 8] = [
    ("ManufacturerName", FieldKind::CharCodes),
    ("ProductCodeID", FieldKind::CharCodes),
    ("SerialNumberID", FieldKind::CharCodes),
    ("UserFriendlyName", FieldKind::CharCodes),
    ("InstanceName", FieldKind::Text),
    ("Active", FieldKind::Bool),
    ("YearOfManufacture", FieldKind::Long),
    ("WeekOfManufacture", FieldKind::UChar),
];

/// Decode a single property, falling back to the kind's zero value.
pub fn decode_field<R: RawRecord + ?Sized>(record: &R, name: &str, kind: FieldKind) -> String {
    match kind {
        FieldKind::CharCodes => record
            .get_long_array(name)
            .map(|codes| decode_char_codes(&codes))
            .unwrap_or_default(),
        FieldKind::Text => record.get_string(name).unwrap_or_default(),
        FieldKind::Bool => format_bool(record.get_bool(name).unwrap_or(false)).to_owned(),
        FieldKind::Long => format_integer(record.get_long(name).unwrap_or(0)),
        FieldKind::UChar => format_integer(record.get_uchar(name).unwrap_or(0)),
    }
}

/// Build a fresh row from one record.  Every column is always populated.
pub fn normalize_record<R: RawRecord + ?Sized>(record: &R) -> MonitorRow {
    let [
        manufacturer,
        model,
        serial_number,
        monitor_name,
        instance_name,
        active,
        manufacture_year,
        manufacture_week,
    ] = MONITOR_ID_FIELDS.map(|(name, kind)| decode_field(record, name, kind));

    MonitorRow {
        manufacturer,
        model,
        serial_number,
        monitor_name,
        instance_name,
        active,
        manufacture_year,
        manufacture_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeRecord;

    fn dell() -> FakeRecord {
        FakeRecord::new()
            .with_codes("ManufacturerName", "DEL")
            .with_codes("ProductCodeID", "A0B1")
            .with_codes("SerialNumberID", "CN0ABC")
            .with_codes("UserFriendlyName", "DELL U2415")
            .with_string("InstanceName", "DISPLAY\\DELA0B1\\5&1_0")
            .with_bool("Active", true)
            .with_long("YearOfManufacture", 2016)
            .with_uchar("WeekOfManufacture", 7)
    }

    #[test]
    fn test_normalize_full_record() {
        let row = normalize_record(&dell());
        assert_eq!(row.manufacturer, "DEL");
        assert_eq!(row.model, "A0B1");
        assert_eq!(row.serial_number, "CN0ABC");
        assert_eq!(row.monitor_name, "DELL U2415");
        assert_eq!(row.instance_name, "DISPLAY\\DELA0B1\\5&1_0");
        assert_eq!(row.active, "true");
        assert_eq!(row.manufacture_year, "2016");
        assert_eq!(row.manufacture_week, "7");
    }

    #[test]
    fn test_padding_survives_normalization() {
        let record = dell().with_long_array("UserFriendlyName", vec![72, 101, 0, 0]);
        let row = normalize_record(&record);
        assert_eq!(row.monitor_name, "He\0\0");
    }

    #[test]
    fn test_missing_manufacturer_defaults_to_empty() {
        let record = dell().without("ManufacturerName");
        let row = normalize_record(&record);
        assert_eq!(row.manufacturer, "");
        assert_eq!(row.model, "A0B1");
        assert_eq!(row.manufacture_week, "7");
    }

    #[test]
    fn test_empty_record_yields_defaults() {
        let row = normalize_record(&FakeRecord::new());
        assert_eq!(row.manufacturer, "");
        assert_eq!(row.instance_name, "");
        assert_eq!(row.active, "false");
        assert_eq!(row.manufacture_year, "0");
        assert_eq!(row.manufacture_week, "0");
    }

    #[test]
    fn test_inactive_monitor() {
        let row = normalize_record(&dell().with_bool("Active", false));
        assert_eq!(row.active, "false");
    }

    #[test]
    fn test_implausible_dates_are_not_validated() {
        let record = dell()
            .with_long("YearOfManufacture", 0)
            .with_uchar("WeekOfManufacture", 255);
        let row = normalize_record(&record);
        assert_eq!(row.manufacture_year, "0");
        assert_eq!(row.manufacture_week, "255");
    }

    #[test]
    fn test_field_table_matches_columns() {
        assert_eq!(MONITOR_ID_FIELDS.len(), crate::row::COLUMNS.len());
        assert_eq!(MONITOR_ID_FIELDS[2].0, "SerialNumberID");
        assert_eq!(MONITOR_ID_FIELDS[7].1, FieldKind::UChar);
    }
}
