use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Vehicles and pedestrians counted in one hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub vehicles: u64,
    pub pedestrians: u64,
}

impl AddAssign for HourlyCount {
    fn add_assign(&mut self, other: Self) {
        self.vehicles += other.vehicles;
        self.pedestrians += other.pedestrians;
    }
}

/// Hourly counts of one road, indexed by hour of day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadTraffic {
    #[serde(default)]
    pub vehicles: Vec<u64>,

    #[serde(default)]
    pub pedestrians: Vec<u64>,
}

impl RoadTraffic {
    /// Counts for `hour`; hours past the end of a short series count as zero
    pub fn at(&self, hour: usize) -> HourlyCount {
        HourlyCount {
            vehicles: self.vehicles.get(hour).copied().unwrap_or(0),
            pedestrians: self.pedestrians.get(hour).copied().unwrap_or(0),
        }
    }
}

/// Contents of `traffic_data.json`: road key -> hourly counts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TrafficData {
    roads: BTreeMap<String, RoadTraffic>,
}

impl TrafficData {
    pub fn road(&self, key: &str) -> Option<&RoadTraffic> {
        self.roads.get(key)
    }

    /// All roads in key order
    pub fn roads(&self) -> impl Iterator<Item = (&str, &RoadTraffic)> {
        self.roads.iter().map(|(key, traffic)| (key.as_str(), traffic))
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn insert(&mut self, key: &str, traffic: RoadTraffic) {
        self.roads.insert(key.to_string(), traffic);
    }
}
