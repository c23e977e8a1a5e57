use serde::Serialize;

use crate::core::types::edge_key;
use crate::data::{CityData, VoltageSchedule};

/// Outcome of checking the voltage schedule against the streetlight inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LampVerification {
    /// Streetlights the city reports
    pub total_city: u64,
    /// Streetlights on scheduled edges that exist in the road statistics
    pub total_scheduled: u64,
    /// Scheduled edges with no road statistics, in schedule order
    pub missing_edges: Vec<String>,
}

impl LampVerification {
    /// True when every scheduled edge is known to the city data
    pub fn is_complete(&self) -> bool {
        self.missing_edges.is_empty()
    }
}

/// Match every scheduled edge against `road_stats` and total the lamps found.
pub fn cross_verify_lamps(city: &CityData, schedule: &VoltageSchedule) -> LampVerification {
    let mut verification = LampVerification {
        total_city: city.total_streetlights,
        ..Default::default()
    };

    for (source, target, _) in schedule.edges() {
        match city.road(source, target) {
            Some(road) => verification.total_scheduled += road.streetlights,
            None => verification.missing_edges.push(edge_key(source, target)),
        }
    }

    verification
}
