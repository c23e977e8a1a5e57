use clap::{CommandFactory, Parser};
use streetgrid::analysis::{AnalysisReport, EnergyParams};
use streetgrid::config::{CliConfig, Config, DataFile};
use streetgrid::core::constants::output_formats;
use streetgrid::core::error::GridError;
use streetgrid::data::{CityData, CityGrid, Dataset, TrafficData, VoltageSchedule};
use streetgrid::reporting::logging;
use streetgrid::reporting::{DashboardData, GridMap, HtmlDashboard, NodeDetails};
use streetgrid::ui::completion::print_completions;
use streetgrid::ui::output;
use streetgrid::ui::{Cli, Commands, cli_to_config};

use std::path::Path;

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_streetgrid(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main logic extracted from main() for testing
pub fn run_streetgrid(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli)?;

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);

    let params = config.energy_params()?;
    logging::log_config_info(&config, &params);

    match cli.command {
        None | Some(Commands::Report) => run_report(&config, &params),
        Some(Commands::Dashboard {
            ref zone,
            ref road,
            ref html,
        }) => run_dashboard(
            &config,
            &params,
            zone.as_deref(),
            road.as_deref(),
            html.as_deref(),
        ),
        Some(Commands::Grid { ref node, ref html }) => {
            run_grid(&config, node.as_deref(), html.as_deref())
        }
        Some(Commands::CompletionGenerate { .. }) => Ok(0),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Verify lamps, estimate the area and print the nightly energy report
pub fn run_report(
    config: &Config,
    params: &EnergyParams,
) -> Result<i32, Box<dyn std::error::Error>> {
    let city = CityData::load(config.input_path(DataFile::CityAnalysis))?;
    let schedule = VoltageSchedule::load(config.input_path(DataFile::VoltageSchedule))?;

    let report = AnalysisReport::build(&city, &schedule, params);
    output::display_report(&report, config.output_format())?;

    Ok(determine_exit_code(&report, config))
}

/// Exit code of the report: failure only in strict mode with missing edges
pub fn determine_exit_code(report: &AnalysisReport, config: &Config) -> i32 {
    if config.strict.unwrap_or(false) && !report.verification.is_complete() {
        logging::log_warning(&format!(
            "Strict mode: {} scheduled edges are missing from the city data",
            report.verification.missing_edges.len()
        ));
        1
    } else {
        0
    }
}

fn generation_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

/// Zone traffic and road voltage views, printed or written as HTML
pub fn run_dashboard(
    config: &Config,
    params: &EnergyParams,
    zone: Option<&str>,
    road: Option<&str>,
    html: Option<&str>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let traffic = TrafficData::load(config.input_path(DataFile::TrafficData))?;
    let schedule = VoltageSchedule::load(config.input_path(DataFile::VoltageSchedule))?;
    let grid = CityGrid::load(config.input_path(DataFile::CityGrid))?;

    let zones = match zone {
        Some(zone) => vec![zone.to_string()],
        None => config.zone_list(),
    };
    let data = DashboardData::build(
        &traffic,
        &schedule,
        &grid,
        &zones,
        &params.active_hours,
        generation_timestamp(),
    );

    if let Some(path) = html {
        HtmlDashboard::generate_dashboard(&data, path)?;
        logging::log_view_written("dashboard", Path::new(path));
        println!("📊 HTML dashboard generated: {path}");
        return Ok(0);
    }

    let output_format = config.output_format();
    let Some(zone) = zone.and_then(|zone| data.zone(zone)) else {
        println!("{}", output::render_dashboard_overview(&data, output_format)?);
        return Ok(0);
    };

    match road {
        Some(road) => {
            let view = zone.road(road).ok_or_else(|| {
                GridError::InvalidData(format!(
                    "Road '{road}' is not in zone '{}'",
                    zone.name
                ))
            })?;
            if output_format == output_formats::TEXT {
                println!("{}\n", output::render_zone(zone, output_format)?);
            }
            println!("{}", output::render_road(view, output_format)?);
        }
        None => println!("{}", output::render_zone(zone, output_format)?),
    }

    Ok(0)
}

/// Grid overview, intersection details and the HTML grid map
pub fn run_grid(
    config: &Config,
    node: Option<&str>,
    html: Option<&str>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let grid = CityGrid::load(config.input_path(DataFile::CityGrid))?;

    // Streetlight counts fall back to the city statistics when available
    let city_path = config.input_path(DataFile::CityAnalysis);
    let city = if city_path.exists() {
        Some(CityData::load(&city_path)?)
    } else {
        logging::log_warning(&format!(
            "{} not found; edges without their own count show 0 streetlights",
            city_path.display()
        ));
        None
    };

    let output_format = config.output_format();

    if let Some(path) = html {
        GridMap::write_html(&grid, city.as_ref(), path)?;
        logging::log_view_written("grid map", Path::new(path));
        println!("🗺️ Grid map generated: {path}");
    }

    match node {
        Some(node) => {
            let details = NodeDetails::collect(&grid, city.as_ref(), node)?;
            println!("{}", output::render_node_info(&details, output_format)?);
        }
        None if html.is_none() => {
            println!("{}", output::render_grid_summary(&grid, output_format)?);
        }
        None => {}
    }

    Ok(0)
}
