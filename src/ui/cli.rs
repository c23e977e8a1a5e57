// Command-line interface definitions and parsing for streetgrid

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::error::{GridError, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Input Files
    /// Directory the input files are resolved against (default: current directory)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Input Files")]
    pub data_dir: Option<String>,

    /// City topology and streetlight inventory (default: city_analysis.json)
    #[arg(long, value_name = "FILE", global = true, help_heading = "Input Files")]
    pub city: Option<String>,

    /// Voltage dimming schedule (default: smoothed_voltage_schedule.json)
    #[arg(long, value_name = "FILE", global = true, help_heading = "Input Files")]
    pub schedule: Option<String>,

    /// Hourly traffic counts (default: traffic_data.json)
    #[arg(long, value_name = "FILE", global = true, help_heading = "Input Files")]
    pub traffic: Option<String>,

    /// Grid nodes and edges (default: city_grid.json)
    #[arg(long, value_name = "FILE", global = true, help_heading = "Input Files")]
    pub grid: Option<String>,

    // Energy Model
    /// Power of one streetlight at full voltage in kW (default: 0.1)
    #[arg(long, value_name = "KW", global = true, help_heading = "Energy Model")]
    pub power_kw: Option<f64>,

    /// Hours the streetlights are on, comma-separated (default: 19-23,0-6)
    #[arg(long, value_name = "HOURS", global = true, help_heading = "Energy Model")]
    pub active_hours: Option<String>,

    /// Fail when the schedule references edges missing from the city data
    #[arg(long, global = true, help_heading = "Energy Model")]
    pub strict: bool,

    // Output & Verbosity
    /// Suppress log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, global = true, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Cross-verify lamps, estimate the city area and compute nightly savings (default)
    Report,
    /// Zone traffic and road voltage views
    Dashboard {
        /// Zone to show (default: every configured zone)
        #[arg(long, value_name = "ZONE")]
        zone: Option<String>,

        /// Road of the zone to detail, as SOURCE-DESTINATION
        #[arg(long, value_name = "ROAD", requires = "zone")]
        road: Option<String>,

        /// Write an interactive HTML dashboard instead of printing
        #[arg(long, value_name = "PATH")]
        html: Option<String>,
    },
    /// Grid map and intersection details
    Grid {
        /// Intersection to describe
        #[arg(long, value_name = "ID")]
        node: Option<String>,

        /// Write a clickable HTML grid map
        #[arg(long, value_name = "PATH")]
        html: Option<String>,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Parse a comma-separated list of hours such as `19,20,21`
pub fn parse_active_hours(list: &str) -> Result<Vec<u8>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>().map_err(|_| {
                GridError::InvalidArgument(format!(
                    "Active hour '{s}' is not a valid hour. Expected a number between 0-23."
                ))
            })
        })
        .collect()
}

/// Convert the parsed CLI into the overrides merged over the config file
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let mut cli_config = CliConfig::default();

    // Energy model
    if let Some(power_kw) = cli.power_kw {
        if !power_kw.is_finite() || power_kw <= 0.0 {
            return Err(GridError::InvalidArgument(format!(
                "Streetlight power of {power_kw} kW is invalid. Expected a positive number."
            )));
        }
        cli_config.power_kw = Some(power_kw);
    }

    if let Some(ref hours) = cli.active_hours {
        cli_config.active_hours = Some(parse_active_hours(hours)?);
    }
    cli_config.strict = cli.strict;

    // Input files
    cli_config.data_dir = cli.data_dir.clone();
    cli_config.city_analysis = cli.city.clone();
    cli_config.voltage_schedule = cli.schedule.clone();
    cli_config.traffic_data = cli.traffic.clone();
    cli_config.city_grid = cli.grid.clone();

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.output_format = cli.format.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    Ok(cli_config)
}
