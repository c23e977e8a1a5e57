//! Analysis engine
//!
//! Pure, single-pass aggregations over the loaded documents: lamp
//! cross-verification, area estimation, the nightly energy model, and the
//! zone/road views used by the dashboard.

pub mod area;
pub mod energy;
pub mod report;
pub mod traffic;
pub mod verify;

pub use area::{CityArea, compute_city_area};
pub use energy::{ActiveHours, EnergyParams, Savings, baseline_energy, optimized_energy};
pub use report::AnalysisReport;
pub use traffic::{
    ProfileError, VoltageProfile, ZoneIndex, aggregate_zone_traffic, road_night_traffic,
    road_voltage_profile, zone_roads,
};
pub use verify::{LampVerification, cross_verify_lamps};
