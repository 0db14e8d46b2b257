//! ==============================================================================
//! rooms.rs - room configuration and aggregation
//! ==============================================================================
//!
//! purpose:
//!     groups sensor nodes into logical rooms and merges their latest
//!     readings into one view per room, recomputed fresh on every query.
//!
//! merge rule:
//!     member devices are visited in configured order; every non-null field
//!     overwrites the accumulator, so when two devices report the same field
//!     the one later in the list wins. that ordering is an observable
//!     contract, not an accident of map iteration.
//!
//! configuration (rooms.toml):
//!
//! ```toml
//!     [[rooms]]
//!     name = "Bedroom"
//!     devices = ["HomePOD_Env_Node", "HomePOD_Light_Node"]
//! ```
//!
//! ==============================================================================

use crate::levels::{interpret_audio, interpret_light, AudioLevel, LightLevel};
use crate::report::SensorValue;
use crate::store::ReadingStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// one logical room and its member devices, in merge order
#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    pub name: String,
    pub devices: Vec<String>,
}

/// static room membership, loaded once at startup and immutable after
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomConfig {
    #[serde(default)]
    rooms: Vec<Room>,
}

/// one room's merged sensor state, derived on demand and never stored
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub room: String,
    /// merged fields; a field appears here iff at least one member device
    /// currently reports it non-null
    pub sensors: BTreeMap<String, SensorValue>,
    /// max receipt stamp among the members that contributed a field
    pub last_updated: DateTime<Utc>,
}

impl RoomConfig {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// load room membership from a toml file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read room config: {}", e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: RoomConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse room config: {}", e))?;
        Ok(config)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// merged view of one room, or None when the name is unknown or no
    /// member has reported anything non-null yet
    ///
    /// an unknown room is indistinguishable from one with no data on
    /// purpose: the caller shows "no data" either way.
    pub fn view(&self, store: &ReadingStore, room_name: &str) -> Option<RoomView> {
        let room = self.rooms.iter().find(|r| r.name == room_name)?;
        room.merge(store)
    }

    /// views for every room with data, in configured order
    ///
    /// rooms whose members have never reported (or report only nulls) are
    /// omitted entirely, never returned as empty views.
    pub fn views(&self, store: &ReadingStore) -> Vec<RoomView> {
        self.rooms.iter().filter_map(|r| r.merge(store)).collect()
    }
}

impl Room {
    fn merge(&self, store: &ReadingStore) -> Option<RoomView> {
        let mut sensors: BTreeMap<String, SensorValue> = BTreeMap::new();
        let mut last_updated: Option<DateTime<Utc>> = None;

        for device_name in &self.devices {
            // a configured device that has never reported contributes
            // nothing; that is not an error
            let Some(reading) = store.get(device_name) else {
                continue;
            };

            let mut contributed = false;
            for (field, value) in &reading.sensors {
                if let Some(value) = value {
                    sensors.insert(field.clone(), value.clone());
                    contributed = true;
                }
            }

            // only devices that carried at least one non-null field count
            // toward the room's freshness stamp
            if contributed {
                last_updated = Some(match last_updated {
                    Some(ts) => ts.max(reading.received_at),
                    None => reading.received_at,
                });
            }
        }

        let last_updated = last_updated?;
        Some(RoomView {
            room: self.name.clone(),
            sensors,
            last_updated,
        })
    }
}

impl RoomView {
    /// numeric value of a merged field, if present and numeric
    pub fn numeric(&self, field: &str) -> Option<f64> {
        self.sensors.get(field).and_then(SensorValue::as_f64)
    }

    /// coarse loudness label from the node's "audio_peak" field
    pub fn audio_level(&self) -> Option<AudioLevel> {
        interpret_audio(self.numeric("audio_peak"))
    }

    /// coarse brightness label from the node's "light" field (lux)
    pub fn light_level(&self) -> Option<LightLevel> {
        interpret_light(self.numeric("light"))
    }
}
