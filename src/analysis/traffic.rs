//! Zone and road views over the traffic counts and the voltage schedule.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

use super::energy::ActiveHours;
use crate::core::constants::energy::HOURS_PER_DAY;
use crate::core::types::EdgeKey;
use crate::data::{CityGrid, HourlyCount, TrafficData, VoltageSchedule};

/// Intersection id -> zone, built from the grid nodes.
#[derive(Debug, Clone, Default)]
pub struct ZoneIndex {
    zones: FxHashMap<String, String>,
}

impl ZoneIndex {
    pub fn from_grid(grid: &CityGrid) -> Self {
        let zones = grid
            .nodes
            .iter()
            .map(|node| (node.id.clone(), node.zone.clone()))
            .collect();
        Self { zones }
    }

    pub fn zone_of(&self, node: &str) -> Option<&str> {
        self.zones.get(node).map(String::as_str)
    }
}

/// Source intersection of a road key: everything before the first `-`.
fn road_source(road: &str) -> &str {
    road.split('-').next().unwrap_or(road)
}

/// Roads whose source intersection lies in `zone`, in key order.
pub fn zone_roads<'a>(traffic: &'a TrafficData, zones: &ZoneIndex, zone: &str) -> Vec<&'a str> {
    traffic
        .roads()
        .map(|(road, _)| road)
        .filter(|road| zones.zone_of(road_source(road)) == Some(zone))
        .collect()
}

/// Hourly vehicle and pedestrian totals across every road of `zone`.
pub fn aggregate_zone_traffic(
    traffic: &TrafficData,
    zones: &ZoneIndex,
    zone: &str,
) -> [HourlyCount; HOURS_PER_DAY] {
    let mut totals = [HourlyCount::default(); HOURS_PER_DAY];
    for road in zone_roads(traffic, zones, zone) {
        if let Some(counts) = traffic.road(road) {
            for (hour, total) in totals.iter_mut().enumerate() {
                *total += counts.at(hour);
            }
        }
    }
    totals
}

/// Counts of `road` for every active hour, in window order. `None` for an unknown road.
pub fn road_night_traffic(
    traffic: &TrafficData,
    road: &str,
    hours: &ActiveHours,
) -> Option<Vec<(u8, HourlyCount)>> {
    let counts = traffic.road(road)?;
    Some(
        hours
            .iter()
            .map(|hour| (hour, counts.at(hour as usize)))
            .collect(),
    )
}

/// Nightly voltages of one road; hours without a scheduled value are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoltageProfile {
    pub road: String,
    pub points: Vec<(u8, Option<f64>)>,
}

impl VoltageProfile {
    /// True when at least one active hour has no scheduled voltage
    pub fn is_partial(&self) -> bool {
        self.points.iter().any(|(_, voltage)| voltage.is_none())
    }

    pub fn missing_hours(&self) -> Vec<u8> {
        self.points
            .iter()
            .filter(|(_, voltage)| voltage.is_none())
            .map(|(hour, _)| *hour)
            .collect()
    }

    /// Message shown next to a partial profile
    pub fn partial_warning(&self) -> String {
        format!("Some voltage data is missing for road '{}'.", self.road)
    }
}

/// Voltage lookups that fail are shown to the user, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Road key is not `source-destination`
    MalformedRoad(String),
    /// The schedule has no (or an empty) entry for the road
    NotFound(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::MalformedRoad(road) => write!(
                f,
                "Road '{road}' is not a '<source>-<destination>' key."
            ),
            ProfileError::NotFound(road) => {
                write!(f, "Voltage data for road '{road}' not found.")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Look up the scheduled voltage of `road` for every active hour.
pub fn road_voltage_profile(
    schedule: &VoltageSchedule,
    road: &str,
    hours: &ActiveHours,
) -> Result<VoltageProfile, ProfileError> {
    let edge = EdgeKey::parse(road).ok_or_else(|| ProfileError::MalformedRoad(road.to_string()))?;

    let voltages = schedule
        .hours_for(&edge.source, &edge.target)
        .filter(|voltages| !voltages.is_empty())
        .ok_or_else(|| ProfileError::NotFound(road.to_string()))?;

    let points = hours
        .iter()
        .map(|hour| {
            let voltage = voltages.get(&u32::from(hour)).map(|v| v.percent());
            (hour, voltage)
        })
        .collect();

    Ok(VoltageProfile {
        road: road.to_string(),
        points,
    })
}
