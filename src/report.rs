//! ==============================================================================
//! report.rs - inbound sensor report boundary
//! ==============================================================================
//!
//! purpose:
//!     defines the shape a sensor node must send and validates it before
//!     anything reaches the reading store.
//!
//! contract:
//!     a report is a json object carrying a "device_name" plus a nested
//!     "sensors" map of field name -> nullable number-or-string. field names
//!     are not validated: unknown fields are stored as-is and surfaced
//!     unchanged downstream. only the identifying field is required; a
//!     report without it is rejected with a typed error, never a panic.
//!
//! ==============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// a single sensor field value as sent by a node
///
/// nodes report either raw numbers (temperature, lux, adc peaks) or
/// free-form strings. untagged so the wire format stays flat:
/// `{"temperature": 21.5, "state": "ok"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

impl SensorValue {
    /// numeric view of the value, if it is one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SensorValue::Number(n) => Some(*n),
            SensorValue::Text(_) => None,
        }
    }
}

/// field name -> nullable value, exactly as reported
///
/// a json `null` deserializes to `None` and is kept rather than dropped:
/// the store holds whatever the node sent, and only the room aggregator
/// filters nulls out.
pub type SensorFields = BTreeMap<String, Option<SensorValue>>;

/// the validated inbound envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceReport {
    /// stable node identifier (e.g., "HomePOD_Env_Node")
    pub device_name: String,
    /// reported sensor fields; empty when the node sent none
    #[serde(default)]
    pub sensors: SensorFields,
}

/// why an inbound report was rejected
///
/// every variant is local to the one request that caused it; none are
/// fatal to the process.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report payload is not a json object")]
    NotAnObject,
    #[error("report is missing the device_name field")]
    MissingDeviceName,
    #[error("device_name must be a non-empty string")]
    EmptyDeviceName,
    #[error("malformed report payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl DeviceReport {
    /// validate a decoded json value into a report
    ///
    /// the identifying field is checked explicitly so the caller gets a
    /// precise rejection reason instead of a generic serde message.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ReportError> {
        let object = value.as_object().ok_or(ReportError::NotAnObject)?;
        match object.get("device_name") {
            None => return Err(ReportError::MissingDeviceName),
            Some(serde_json::Value::String(name)) if name.trim().is_empty() => {
                return Err(ReportError::EmptyDeviceName)
            }
            // non-string identifiers fall through to serde and come back
            // as a Payload error
            _ => {}
        }
        Ok(serde_json::from_value(value)?)
    }

    /// parse raw request bytes into a validated report
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReportError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_json(value)
    }
}
