//! ==============================================================================
//! homepod-hub - sensor fusion core for the HomePOD touch dashboard
//! ==============================================================================
//!
//! purpose:
//!     the ingestion core behind a raspberry pi touch dashboard: keep the
//!     latest reading per sensor node, merge nodes into logical rooms, and
//!     turn raw sensor numbers into human-readable levels.
//!
//! data flow (one direction):
//!
//! ```text
//!     device report ──▶ ReadingStore (replace) ──▶ RoomConfig::view (merge)
//!                                                        │
//!                                                        ▼
//!                                                 level interpreters
//!                                                        │
//!                                                        ▼
//!                                           presentation layer (external)
//! ```
//!
//! boundaries:
//!     http wiring, html rendering, the weather fetch, and file persistence
//!     all live outside this crate. everything exposed here derives
//!     Serialize so that layer can hand it back as json unchanged.
//!
//! ==============================================================================

pub mod levels;
pub mod report;
pub mod rooms;
pub mod store;

pub use levels::{interpret_audio, interpret_light, AudioLevel, LightLevel};
pub use report::{DeviceReport, ReportError, SensorFields, SensorValue};
pub use rooms::{Room, RoomConfig, RoomView};
pub use store::{ReadingStore, SensorReading};
