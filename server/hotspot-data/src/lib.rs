//! RiskRadar data sources — CSV-backed collaborators for the fire risk engine.
//!
//! Loads FIRMS hotspot detections and daily weather readings, resolves locations
//! through an injectable registry, and caches parsed files per modification time.
//! Malformed rows are skipped and counted, never fatal to a whole file.

pub mod cache;
pub mod error;
pub mod firms;
pub mod registry;
pub mod table;
pub mod weather;

pub use cache::RecordCache;
pub use error::DataError;
pub use firms::{load_detections, DetectionSet};
pub use registry::{Location, LocationRegistry};
pub use weather::{load_weather, WeatherTable};
