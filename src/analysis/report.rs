use serde::Serialize;

use super::area::{CityArea, compute_city_area};
use super::energy::{EnergyParams, Savings, baseline_energy, optimized_energy};
use super::verify::{LampVerification, cross_verify_lamps};
use crate::data::{CityData, VoltageSchedule};
use crate::reporting::logging;

/// Everything the nightly energy report shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub params: EnergyParams,
    pub verification: LampVerification,
    pub area: CityArea,
    pub baseline_kwh: f64,
    pub optimized_kwh: f64,
    pub savings: Savings,
}

impl AnalysisReport {
    /// Run verify, area, baseline, optimized and savings in order.
    pub fn build(city: &CityData, schedule: &VoltageSchedule, params: &EnergyParams) -> Self {
        let verification = cross_verify_lamps(city, schedule);
        logging::log_verification(&verification);

        let area = compute_city_area(city);
        logging::log_area(&area);

        let baseline_kwh = baseline_energy(city, params);
        let optimized_kwh = optimized_energy(city, schedule, params);
        let savings = Savings::new(baseline_kwh, optimized_kwh);
        logging::log_energy_summary(baseline_kwh, optimized_kwh, &savings);

        Self {
            params: params.clone(),
            verification,
            area,
            baseline_kwh,
            optimized_kwh,
            savings,
        }
    }
}
