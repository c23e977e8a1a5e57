//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::energy::{ActiveHours, EnergyParams};
use crate::core::constants::{energy, files, output_formats, zones};
use crate::core::error::{GridError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Power of one streetlight at full voltage, in kW
    pub power_kw: Option<f64>,

    /// Hours of the day during which streetlights are on
    pub active_hours: Option<Vec<u8>>,

    /// Directory the input files are resolved against
    pub data_dir: Option<String>,

    /// City topology and streetlight inventory
    pub city_analysis: Option<String>,

    /// Voltage dimming schedule
    pub voltage_schedule: Option<String>,

    /// Hourly traffic counts per road
    pub traffic_data: Option<String>,

    /// Grid nodes and edges
    pub city_grid: Option<String>,

    /// Zones offered by the dashboard, in display order
    pub zones: Option<Vec<String>>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Exit with failure when scheduled edges are missing from the city data
    pub strict: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            power_kw: Some(energy::STREETLIGHT_POWER_KW),
            active_hours: Some(energy::ACTIVE_HOURS.to_vec()),
            data_dir: None, // Working directory
            city_analysis: Some(files::CITY_ANALYSIS.to_string()),
            voltage_schedule: Some(files::VOLTAGE_SCHEDULE.to_string()),
            traffic_data: Some(files::TRAFFIC_DATA.to_string()),
            city_grid: Some(files::CITY_GRID.to_string()),
            zones: Some(zones::ALL.iter().map(|z| z.to_string()).collect()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            strict: Some(false),
        }
    }
}

/// The input documents the tool knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    CityAnalysis,
    VoltageSchedule,
    TrafficData,
    CityGrid,
}

impl DataFile {
    pub fn default_name(self) -> &'static str {
        match self {
            DataFile::CityAnalysis => files::CITY_ANALYSIS,
            DataFile::VoltageSchedule => files::VOLTAGE_SCHEDULE,
            DataFile::TrafficData => files::TRAFFIC_DATA,
            DataFile::CityGrid => files::CITY_GRID,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GridError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            GridError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check the current directory first
        if let Ok(config) = Self::load_from_file(files::CONFIG) {
            return config;
        }

        // Then up to three parent directories
        for i in 1..=files::CONFIG_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), files::CONFIG);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Energy model
        if let Some(power_kw) = cli_config.power_kw {
            self.power_kw = Some(power_kw);
        }
        if let Some(ref active_hours) = cli_config.active_hours {
            self.active_hours = Some(active_hours.clone());
        }

        // Input files
        if let Some(ref data_dir) = cli_config.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(ref city) = cli_config.city_analysis {
            self.city_analysis = Some(city.clone());
        }
        if let Some(ref schedule) = cli_config.voltage_schedule {
            self.voltage_schedule = Some(schedule.clone());
        }
        if let Some(ref traffic) = cli_config.traffic_data {
            self.traffic_data = Some(traffic.clone());
        }
        if let Some(ref grid) = cli_config.city_grid {
            self.city_grid = Some(grid.clone());
        }

        // Output & behavior
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.strict {
            self.strict = Some(true);
        }
    }

    /// Energy model constants described by this configuration
    pub fn energy_params(&self) -> Result<EnergyParams> {
        let active_hours = match self.active_hours {
            Some(ref hours) => ActiveHours::new(hours.clone())?,
            None => ActiveHours::default(),
        };
        Ok(EnergyParams {
            unit_power_kw: self.power_kw.unwrap_or(energy::STREETLIGHT_POWER_KW),
            active_hours,
        })
    }

    /// Path of an input document, resolved against `data_dir`
    pub fn input_path(&self, file: DataFile) -> PathBuf {
        let name = match file {
            DataFile::CityAnalysis => self.city_analysis.as_deref(),
            DataFile::VoltageSchedule => self.voltage_schedule.as_deref(),
            DataFile::TrafficData => self.traffic_data.as_deref(),
            DataFile::CityGrid => self.city_grid.as_deref(),
        }
        .unwrap_or(file.default_name());

        match self.data_dir {
            Some(ref dir) => Path::new(dir).join(name),
            None => PathBuf::from(name),
        }
    }

    /// Zones offered by the dashboard
    pub fn zone_list(&self) -> Vec<String> {
        self.zones
            .clone()
            .unwrap_or_else(|| zones::ALL.iter().map(|z| z.to_string()).collect())
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate lamp power
        if let Some(power_kw) = self.power_kw
            && (!power_kw.is_finite() || power_kw <= 0.0)
        {
            return Err(GridError::Config(format!(
                "Streetlight power of {power_kw} kW is invalid. Expected a positive number."
            )));
        }

        // Validate the active window
        if let Some(ref hours) = self.active_hours {
            ActiveHours::new(hours.clone())?;
        }

        // Validate zones
        if let Some(ref zones) = self.zones
            && (zones.is_empty() || zones.iter().any(|z| z.trim().is_empty()))
        {
            return Err(GridError::Config(
                "Zones cannot be empty. Expected at least one zone name.".to_string(),
            ));
        }

        // Validate output format
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(GridError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Energy model
    pub power_kw: Option<f64>,          // --power-kw
    pub active_hours: Option<Vec<u8>>, // --active-hours

    // Input files
    pub data_dir: Option<String>,         // --data-dir
    pub city_analysis: Option<String>,    // --city
    pub voltage_schedule: Option<String>, // --schedule
    pub traffic_data: Option<String>,     // --traffic
    pub city_grid: Option<String>,        // --grid

    // Output & behavior
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub strict: bool,                  // --strict

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.power_kw, Some(0.1));
        assert_eq!(config.active_hours.as_ref().map(Vec::len), Some(12));
        assert_eq!(
            config.output_format,
            Some(output_formats::DEFAULT.to_string())
        );
        assert_eq!(config.strict, Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"power_kw = 0.15\nactive_hours = [22, 23, 0]\ndata_dir = \"data\"\nstrict = true",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.power_kw, Some(0.15));
        assert_eq!(config.active_hours, Some(vec![22, 23, 0]));
        assert_eq!(config.data_dir, Some("data".to_string()));
        assert_eq!(config.strict, Some(true));
        // fields absent from the file stay unset
        assert_eq!(config.city_analysis, None);

        Ok(())
    }

    #[test]
    fn test_config_load_invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"power_kw = [")?;

        let result = Config::load_from_file(file.path());
        match result {
            Err(GridError::Config(msg)) => assert!(msg.contains("Invalid TOML")),
            other => panic!("Expected Config error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = Config::load_from_file("does/not/exist.toml");
        match result {
            Err(GridError::Config(msg)) => assert!(msg.contains("Could not read config file")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_load_rejects_invalid_values() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"active_hours = [19, 25]")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            power_kw: Some(0.2),
            data_dir: Some("/tmp/city".to_string()),
            verbose: true,
            strict: true,
            output_format: Some("json".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.power_kw, Some(0.2));
        assert_eq!(config.data_dir, Some("/tmp/city".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.output_format(), "json");
        // untouched values survive
        assert_eq!(config.active_hours.as_ref().map(Vec::len), Some(12));
    }

    #[test]
    fn test_merge_false_flags_keep_config_values() {
        let mut config = Config {
            strict: Some(true),
            ..Default::default()
        };
        config.merge_with_cli(&CliConfig::default());
        assert_eq!(config.strict, Some(true));
    }

    #[test]
    fn test_energy_params_from_config() -> Result<()> {
        let config = Config {
            power_kw: Some(0.2),
            active_hours: Some(vec![23, 0]),
            ..Default::default()
        };

        let params = config.energy_params()?;
        assert_eq!(params.unit_power_kw, 0.2);
        assert_eq!(params.active_hours.as_slice(), &[23, 0]);
        Ok(())
    }

    #[test]
    fn test_energy_params_fall_back_to_defaults() -> Result<()> {
        let config = Config {
            power_kw: None,
            active_hours: None,
            ..Default::default()
        };

        assert_eq!(config.energy_params()?, EnergyParams::default());
        Ok(())
    }

    #[test]
    fn test_input_path_resolution() {
        let mut config = Config::default();
        assert_eq!(
            config.input_path(DataFile::CityAnalysis),
            PathBuf::from("city_analysis.json")
        );

        config.data_dir = Some("data".to_string());
        config.traffic_data = Some("traffic-2024.json".to_string());
        assert_eq!(
            config.input_path(DataFile::TrafficData),
            Path::new("data").join("traffic-2024.json")
        );

        config.city_grid = None;
        assert_eq!(
            config.input_path(DataFile::CityGrid),
            Path::new("data").join("city_grid.json")
        );
    }

    #[test]
    fn test_validate_power() {
        for power in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = Config {
                power_kw: Some(power),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "power {power} should be rejected");
        }
    }

    #[test]
    fn test_validate_output_format() {
        let config = Config {
            output_format: Some("xml".to_string()),
            ..Default::default()
        };
        let error = config.validate().unwrap_err();
        assert!(format!("{error}").contains("Invalid output format 'xml'"));
    }

    #[test]
    fn test_validate_zones() {
        let config = Config {
            zones: Some(vec![]),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            zones: Some(vec!["harbour".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.zone_list(), vec!["harbour".to_string()]);
    }
}
