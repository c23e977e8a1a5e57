use crate::analysis::area::CityArea;
use crate::analysis::energy::{EnergyParams, Savings};
use crate::analysis::verify::LampVerification;
use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // A second initialization (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, params: &EnergyParams) {
    let hours: Vec<String> = params.active_hours.iter().map(|h| h.to_string()).collect();

    info!(
        "Energy model: lamp power={} kW, active hours=[{}]",
        params.unit_power_kw,
        hours.join(",")
    );
    info!(
        "Data directory: {}",
        config.data_dir.as_deref().unwrap_or(".")
    );
    info!(
        "Output: format={}, strict={}",
        config.output_format(),
        config.strict.unwrap_or(false)
    );
}

/// Log a document that was read and parsed
pub fn log_dataset_loaded(kind: &str, path: &Path, records: usize) {
    info!("Loaded {kind} from {} ({records} records)", path.display());
}

/// Log the outcome of the lamp cross-verification
pub fn log_verification(verification: &LampVerification) {
    info!(
        "Lamp verification: city={}, scheduled={}",
        verification.total_city, verification.total_scheduled
    );
    for edge in &verification.missing_edges {
        warn!("Scheduled edge {edge} is not in the city data");
    }
}

/// Log the area estimate
pub fn log_area(area: &CityArea) {
    debug!(
        "Area: {} rows (avg {:.4} km), {} columns (avg {:.4} km)",
        area.rows, area.avg_row_length_km, area.columns, area.avg_col_length_km
    );
    info!("Area estimate: {:.4} km²", area.km2);
}

/// Log the energy totals
pub fn log_energy_summary(baseline_kwh: f64, optimized_kwh: f64, savings: &Savings) {
    info!(
        "Energy: baseline={baseline_kwh:.2} kWh, optimized={optimized_kwh:.2} kWh, saved={:.2} kWh ({:.1}%)",
        savings.saved_kwh, savings.percent_saved
    );
}

/// Log a file written by one of the views
pub fn log_view_written(view: &str, path: &Path) {
    info!("Wrote {view} to {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logger_initialization_verbose() {
        init_logger(true, false);
    }

    #[test]
    fn test_logger_initialization_quiet() {
        init_logger(false, true);
    }

    #[test]
    fn test_logger_initialization_twice() {
        init_logger(false, false);
        init_logger(true, true);
    }

    #[test]
    fn test_log_config_info() {
        let config = Config {
            data_dir: Some("data".to_string()),
            ..Default::default()
        };
        log_config_info(&config, &EnergyParams::default());
        log_config_info(&Config::default(), &EnergyParams::default());
    }

    #[test]
    fn test_log_verification_with_missing_edges() {
        let verification = LampVerification {
            total_city: 10,
            total_scheduled: 4,
            missing_edges: vec!["A1-A2".to_string(), "B1-B2".to_string()],
        };
        log_verification(&verification);
        log_verification(&LampVerification::default());
    }

    #[test]
    fn test_log_area_and_energy() {
        log_area(&CityArea::default());
        log_energy_summary(2.4, 0.25, &Savings::new(2.4, 0.25));
        log_energy_summary(0.0, 0.0, &Savings::new(0.0, 0.0));
    }

    #[test]
    fn test_log_dataset_and_view() {
        log_dataset_loaded("city analysis", Path::new("city_analysis.json"), 12);
        log_view_written("grid map", Path::new("grid.html"));
    }

    #[test]
    fn test_log_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to read file", Some(&io_error));
        log_error("Simple error message", None);
        log_warning("This is a warning message");
    }
}
