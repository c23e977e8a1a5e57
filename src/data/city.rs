use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::types::edge_key;

/// City topology statistics as written to `city_analysis.json`.
///
/// Absent keys fall back to zero or empty so a sparse document still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    /// Streetlights the city reports in total
    #[serde(default)]
    pub total_streetlights: u64,

    /// Per-edge statistics keyed by `"{src}-{dst}"`
    #[serde(default)]
    pub road_stats: BTreeMap<String, RoadInfo>,
}

/// Statistics of one directed road segment. Unknown fields are ignored.
///
/// An entry written as `{}` carries no statistics and is treated as absent
/// by [`CityData::road`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RoadInfo {
    pub streetlights: u64,

    pub length_km: f64,

    #[serde(skip)]
    empty: bool,
}

#[derive(Deserialize)]
struct RoadFields {
    #[serde(default)]
    streetlights: u64,
    #[serde(default)]
    length_km: f64,
}

impl TryFrom<Map<String, Value>> for RoadInfo {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let empty = object.is_empty();
        let fields: RoadFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            streetlights: fields.streetlights,
            length_km: fields.length_km,
            empty,
        })
    }
}

impl RoadInfo {
    pub fn new(streetlights: u64, length_km: f64) -> Self {
        Self {
            streetlights,
            length_km,
            empty: false,
        }
    }

    /// True for an entry that was an empty JSON object
    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

impl CityData {
    /// Road statistics for the directed edge `source -> target`; empty entries count as absent
    pub fn road(&self, source: &str, target: &str) -> Option<&RoadInfo> {
        self.road_stats
            .get(&edge_key(source, target))
            .filter(|road| !road.is_empty())
    }

    /// Streetlights on `source -> target`, zero when the edge is unknown
    pub fn lamps_on(&self, source: &str, target: &str) -> u64 {
        self.road(source, target)
            .map(|road| road.streetlights)
            .unwrap_or(0)
    }
}
