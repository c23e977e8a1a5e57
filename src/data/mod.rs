//! Input documents
//!
//! Typed models of the four JSON files the tool reads and the loader that
//! turns them into in-memory, read-only structures.

pub mod city;
pub mod grid;
pub mod loader;
pub mod schedule;
pub mod traffic;

pub use city::{CityData, RoadInfo};
pub use grid::{CityGrid, GridEdge, GridNode};
pub use loader::load_json;
pub use schedule::{HourlyVoltage, Voltage, VoltageSchedule};
pub use traffic::{HourlyCount, RoadTraffic, TrafficData};

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::core::error::Result;
use crate::reporting::logging;

/// A JSON document loaded once per run.
pub trait Dataset: DeserializeOwned + Sized {
    /// Name used in log lines
    const KIND: &'static str;

    /// Number of top-level records, for logging
    fn record_count(&self) -> usize;

    fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let dataset: Self = load_json(path).inspect_err(|e| {
            logging::log_error(&format!("Could not load {}", Self::KIND), Some(e));
        })?;
        logging::log_dataset_loaded(Self::KIND, path, dataset.record_count());
        Ok(dataset)
    }
}

impl Dataset for CityData {
    const KIND: &'static str = "city analysis";

    fn record_count(&self) -> usize {
        self.road_stats.len()
    }
}

impl Dataset for VoltageSchedule {
    const KIND: &'static str = "voltage schedule";

    fn record_count(&self) -> usize {
        self.edge_count()
    }
}

impl Dataset for TrafficData {
    const KIND: &'static str = "traffic data";

    fn record_count(&self) -> usize {
        self.len()
    }
}

impl Dataset for CityGrid {
    const KIND: &'static str = "city grid";

    fn record_count(&self) -> usize {
        self.nodes.len()
    }
}
