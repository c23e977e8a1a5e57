//! Nightly energy model
//!
//! Lamps draw `unit_power_kw` at nominal voltage and power scales with the
//! square of the applied voltage (resistive load). Every hour inside the
//! active window counts as one hour of operation.

use serde::Serialize;

use crate::core::constants::energy;
use crate::core::error::{GridError, Result};
use crate::data::{CityData, VoltageSchedule};

/// Hours of the day during which streetlights are powered.
///
/// Order is preserved so nightly series can be presented evening first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveHours {
    hours: Vec<u8>,
}

impl Default for ActiveHours {
    fn default() -> Self {
        Self {
            hours: energy::ACTIVE_HOURS.to_vec(),
        }
    }
}

impl ActiveHours {
    /// Build a window from explicit hours. Hours must be below 24, distinct,
    /// and at least one must be given.
    pub fn new(hours: Vec<u8>) -> Result<Self> {
        if hours.is_empty() {
            return Err(GridError::Config(
                "Active hours cannot be empty. Expected hours between 0-23.".to_string(),
            ));
        }
        let mut seen = [false; energy::HOURS_PER_DAY];
        for &hour in &hours {
            let slot = seen.get_mut(hour as usize).ok_or_else(|| {
                GridError::Config(format!(
                    "Active hour {hour} is invalid. Expected hours between 0-23."
                ))
            })?;
            if *slot {
                return Err(GridError::Config(format!(
                    "Active hour {hour} is listed more than once."
                )));
            }
            *slot = true;
        }
        Ok(Self { hours })
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.iter().any(|&h| u32::from(h) == hour)
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.hours.iter().copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.hours
    }
}

/// Constants of the energy model, injected into every computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyParams {
    /// Power of one lamp at nominal voltage, in kW
    pub unit_power_kw: f64,
    pub active_hours: ActiveHours,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            unit_power_kw: energy::STREETLIGHT_POWER_KW,
            active_hours: ActiveHours::default(),
        }
    }
}

impl EnergyParams {
    /// Power drawn by one lamp at `voltage_percent` of nominal voltage
    pub fn lamp_power_kw(&self, voltage_percent: f64) -> f64 {
        self.unit_power_kw * (voltage_percent / energy::NOMINAL_VOLTAGE_PERCENT).powi(2)
    }
}

/// Energy (kWh) if every lamp ran at full voltage for the whole active window.
pub fn baseline_energy(city: &CityData, params: &EnergyParams) -> f64 {
    city.total_streetlights as f64 * params.unit_power_kw * params.active_hours.len() as f64
}

/// Energy (kWh) drawn under the dimming schedule.
///
/// Edges without road statistics or without lamps contribute nothing, and
/// scheduled hours outside the active window are ignored.
pub fn optimized_energy(city: &CityData, schedule: &VoltageSchedule, params: &EnergyParams) -> f64 {
    let mut total = 0.0;
    for (source, target, hours) in schedule.edges() {
        let lamps = city.lamps_on(source, target);
        if lamps == 0 {
            continue;
        }
        for (&hour, voltage) in hours {
            if params.active_hours.contains(hour) {
                // one hour at this power
                total += params.lamp_power_kw(voltage.percent()) * lamps as f64;
            }
        }
    }
    total
}

/// Savings of the schedule against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Savings {
    pub saved_kwh: f64,
    pub percent_saved: f64,
}

impl Savings {
    pub fn new(baseline_kwh: f64, optimized_kwh: f64) -> Self {
        let saved_kwh = baseline_kwh - optimized_kwh;
        let percent_saved = if baseline_kwh != 0.0 {
            saved_kwh / baseline_kwh * 100.0
        } else {
            0.0
        };
        Self {
            saved_kwh,
            percent_saved,
        }
    }
}
