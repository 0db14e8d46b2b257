//! ==============================================================================
//! store.rs - latest-reading store
//! ==============================================================================
//!
//! purpose:
//!     holds the most recent reading per device, in memory only. nothing
//!     here survives a restart; durable logging is the caller's concern.
//!
//! semantics:
//!     record() replaces the whole prior entry for a device; there is no
//!     field-level merge at this layer. last write per device wins, and no
//!     ordering is promised across different devices.
//!
//! sharing:
//!     one store is created at startup and shared by reference between the
//!     ingestion path (writes) and the dashboard/api path (reads). the inner
//!     map sits behind an rwlock. readers walking several devices do not get
//!     an atomic snapshot across the set; a refresh racing a room query can
//!     be observed partially, which is accepted.
//!
//! ==============================================================================

use crate::report::{DeviceReport, SensorFields};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// the most recent report from one device, with its receipt stamp
#[derive(Debug, Clone, Serialize)]
pub struct SensorReading {
    pub device_name: String,
    pub sensors: SensorFields,
    /// wall-clock receipt time, compared chronologically
    pub received_at: DateTime<Utc>,
}

/// in-memory map of device name -> latest reading
#[derive(Debug, Default)]
pub struct ReadingStore {
    inner: RwLock<HashMap<String, SensorReading>>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// stamp a report with the current receipt time and store it,
    /// discarding any prior reading for the same device
    pub fn record(&self, report: DeviceReport) -> DateTime<Utc> {
        let now = Utc::now();
        self.record_at(report, now);
        now
    }

    /// store a report with a caller-supplied receipt stamp
    ///
    /// used when replaying logged reports; same replacement semantics as
    /// [`record`](Self::record).
    pub fn record_at(&self, report: DeviceReport, received_at: DateTime<Utc>) {
        let reading = SensorReading {
            device_name: report.device_name.clone(),
            sensors: report.sensors,
            received_at,
        };
        // a poisoned lock only means some writer panicked mid-insert;
        // the map itself is still usable
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(report.device_name, reading);
    }

    /// latest reading for a device, or None if it has never reported
    pub fn get(&self, device_name: &str) -> Option<SensorReading> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(device_name).cloned()
    }

    /// names of every device that has reported at least once, sorted
    pub fn device_names(&self) -> Vec<String> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SensorValue;
    use chrono::TimeZone;
    use serde_json::json;

    fn report(device: &str, sensors: serde_json::Value) -> DeviceReport {
        DeviceReport::from_json(json!({ "device_name": device, "sensors": sensors })).unwrap()
    }

    fn ts(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, hour, min, 0).unwrap()
    }

    #[test]
    fn get_is_absent_for_unknown_device() {
        let store = ReadingStore::new();
        assert!(store.get("nobody").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn record_keeps_the_latest_reading() {
        let store = ReadingStore::new();
        store.record_at(report("node", json!({ "temperature": 20.0 })), ts(8, 0));
        store.record_at(report("node", json!({ "temperature": 22.5 })), ts(8, 5));

        let reading = store.get("node").unwrap();
        assert_eq!(reading.received_at, ts(8, 5));
        assert_eq!(
            reading.sensors.get("temperature"),
            Some(&Some(SensorValue::Number(22.5)))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn a_new_report_fully_replaces_the_old_one() {
        let store = ReadingStore::new();
        store.record_at(
            report("node", json!({ "temperature": 20.0, "humidity": 45.0 })),
            ts(8, 0),
        );
        // second report drops humidity entirely; it must not be retained
        store.record_at(report("node", json!({ "temperature": 21.0 })), ts(8, 5));

        let reading = store.get("node").unwrap();
        assert!(reading.sensors.get("humidity").is_none());
    }

    #[test]
    fn devices_are_independent() {
        let store = ReadingStore::new();
        store.record_at(report("a", json!({ "temperature": 20.0 })), ts(8, 0));
        store.record_at(report("b", json!({ "light": 120.0 })), ts(8, 1));

        assert_eq!(store.device_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get("a").unwrap().received_at, ts(8, 0));
        assert_eq!(store.get("b").unwrap().received_at, ts(8, 1));
    }

    #[test]
    fn record_stamps_with_the_current_time() {
        let store = ReadingStore::new();
        let before = Utc::now();
        let stamp = store.record(report("node", json!({})));
        let after = Utc::now();

        assert!(stamp >= before && stamp <= after);
        assert_eq!(store.get("node").unwrap().received_at, stamp);
    }
}
