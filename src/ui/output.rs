//! Output formatting and display logic for streetgrid

use crate::analysis::report::AnalysisReport;
use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::data::CityGrid;
use crate::reporting::dashboard::{DashboardData, RoadView, VoltageView, ZoneView};
use crate::reporting::grid_map::NodeDetails;
use crate::ui::color::{Colors, bold, colorize};
use serde::Serialize;
use std::fmt::Write as _;

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the energy report in the requested format
pub fn render_report(report: &AnalysisReport, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => to_json(report),
        output_formats::MINIMAL => Ok(render_report_minimal(report)),
        _ => Ok(render_report_text(report)),
    }
}

/// Print the energy report
pub fn display_report(report: &AnalysisReport, output_format: &str) -> Result<()> {
    println!("{}", render_report(report, output_format)?);
    Ok(())
}

fn render_report_text(report: &AnalysisReport) -> String {
    let verification = &report.verification;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "City reports {} streetlights.",
        verification.total_city
    );
    if !verification.missing_edges.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            colorize(
                &format!(
                    "{} Warning: {} edges not in city data:",
                    display::WARNING_EMOJI,
                    verification.missing_edges.len()
                ),
                Colors::YELLOW
            )
        );
        for edge in &verification.missing_edges {
            let _ = writeln!(out, "  - {edge}");
        }
    }
    let _ = writeln!(
        out,
        "Schedule covers {} streetlights (matched).",
        verification.total_scheduled
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "{} City area estimate: {:.4} km² ({:.2} m²)",
        display::CITY_EMOJI,
        report.area.km2,
        report.area.m2
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "{} Baseline (100% voltage): {:.2} kWh",
        display::BATTERY_EMOJI,
        report.baseline_kwh
    );
    let _ = writeln!(
        out,
        "{} After optimization:    {:.2} kWh",
        display::NIGHT_EMOJI,
        report.optimized_kwh
    );
    let _ = write!(
        out,
        "{}",
        colorize(
            &format!(
                "{} You saved {:.2} kWh ({:.1}% reduction) in one night!",
                display::SAVINGS_EMOJI,
                report.savings.saved_kwh,
                report.savings.percent_saved
            ),
            Colors::BRIGHT_GREEN
        )
    );
    out
}

fn render_report_minimal(report: &AnalysisReport) -> String {
    let verification = &report.verification;
    [
        format!("city_streetlights={}", verification.total_city),
        format!("scheduled_streetlights={}", verification.total_scheduled),
        format!("missing_edges={}", verification.missing_edges.join(",")),
        format!("area_km2={:.4}", report.area.km2),
        format!("area_m2={:.2}", report.area.m2),
        format!("baseline_kwh={:.2}", report.baseline_kwh),
        format!("optimized_kwh={:.2}", report.optimized_kwh),
        format!("saved_kwh={:.2}", report.savings.saved_kwh),
        format!("percent_saved={:.1}", report.savings.percent_saved),
    ]
    .join("\n")
}

/// Render the details of one intersection
pub fn render_node_info(details: &NodeDetails, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => to_json(details),
        output_formats::MINIMAL => Ok(details
            .roads
            .iter()
            .map(|road| {
                format!(
                    "{},{},{},{},{},{}",
                    details.id,
                    road.target,
                    road.road_type,
                    road.distance,
                    road.capacity,
                    road.streetlights
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        _ => {
            let mut out = format!("{} Node: {}\n", display::NODE_EMOJI, bold(&details.id));
            for line in details.attribute_lines() {
                let _ = writeln!(out, "{line}");
            }
            let _ = write!(out, "\n{} Connected Roads:", display::ROADS_EMOJI);
            for road in &details.roads {
                let _ = write!(out, "\n{}", road.describe());
            }
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct GridSummary<'a> {
    intersections: usize,
    roads: usize,
    rows: usize,
    columns: usize,
    nodes: Vec<&'a str>,
}

/// Render an overview of the grid
pub fn render_grid_summary(grid: &CityGrid, output_format: &str) -> Result<String> {
    let (rows, columns) = grid.dimensions();
    let summary = GridSummary {
        intersections: grid.nodes.len(),
        roads: grid.edges.len(),
        rows,
        columns,
        nodes: grid.nodes.iter().map(|node| node.id.as_str()).collect(),
    };

    match output_format {
        output_formats::JSON => to_json(&summary),
        output_formats::MINIMAL => Ok(format!(
            "intersections={}\nroads={}\nrows={}\ncolumns={}",
            summary.intersections, summary.roads, summary.rows, summary.columns
        )),
        _ => Ok(format!(
            "🟢 City grid: {} intersections, {} roads ({}×{})\nNodes: {}\n\nUse --node <ID> for intersection details or --html <PATH> for a map.",
            summary.intersections,
            summary.roads,
            summary.rows,
            summary.columns,
            summary.nodes.join(", ")
        )),
    }
}

/// One-line-per-zone overview of the dashboard data
pub fn render_dashboard_overview(data: &DashboardData, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => to_json(data),
        output_formats::MINIMAL => Ok(data
            .zones
            .iter()
            .map(|zone| format!("{}={}", zone.name, zone.roads.len()))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => {
            let mut out = format!("{} Smart City Traffic & Voltage Dashboard", display::TRAFFIC_EMOJI);
            for zone in &data.zones {
                let _ = write!(out, "\n{}: {} roads", bold(&capitalize(&zone.name)), zone.roads.len());
                if let Some((hour, count)) = zone.peak_hour() {
                    let _ = write!(out, ", peak hour {hour} ({} vehicles)", count.vehicles);
                }
            }
            let _ = write!(out, "\n\nUse --zone <ZONE> [--road <ROAD>] for details or --html <PATH> for charts.");
            Ok(out)
        }
    }
}

fn traffic_table<'a>(rows: impl Iterator<Item = (usize, u64, u64)> + 'a) -> String {
    let mut out = format!("{:>4}  {:>10}  {:>11}", "Hour", "Vehicles", "Pedestrians");
    for (hour, vehicles, pedestrians) in rows {
        let _ = write!(out, "\n{hour:>4}  {vehicles:>10}  {pedestrians:>11}");
    }
    out
}

/// Render the hourly traffic of a zone and the roads it contains
pub fn render_zone(zone: &ZoneView, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => to_json(zone),
        output_formats::MINIMAL => Ok(zone
            .traffic
            .iter()
            .enumerate()
            .map(|(hour, count)| format!("{hour},{},{}", count.vehicles, count.pedestrians))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => {
            let mut out = format!(
                "{}\n",
                bold(&format!("{} Zone: Hourly Traffic", capitalize(&zone.name)))
            );
            out.push_str(&traffic_table(
                zone.traffic
                    .iter()
                    .enumerate()
                    .map(|(hour, count)| (hour, count.vehicles, count.pedestrians)),
            ));
            out.push_str("\n\n");
            if zone.roads.is_empty() {
                out.push_str(&colorize("No roads found for this zone.", Colors::YELLOW));
            } else {
                let roads: Vec<&str> = zone.roads.iter().map(|road| road.road.as_str()).collect();
                let _ = write!(out, "Roads: {}", roads.join(", "));
            }
            Ok(out)
        }
    }
}

/// Render the nightly traffic and voltage of one road
pub fn render_road(road: &RoadView, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => to_json(road),
        output_formats::MINIMAL => {
            let voltages: Vec<(u8, Option<f64>)> = match &road.voltage {
                VoltageView::Complete { points } | VoltageView::Partial { points, .. } => {
                    points.clone()
                }
                VoltageView::Unavailable { .. } => Vec::new(),
            };
            Ok(road
                .night
                .iter()
                .map(|point| {
                    let voltage = voltages
                        .iter()
                        .find(|(hour, _)| *hour == point.hour)
                        .and_then(|(_, v)| *v)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    format!(
                        "{},{},{},{}",
                        point.hour, point.vehicles, point.pedestrians, voltage
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        _ => {
            let mut out = format!("{}\n", bold(&format!("{}: Nightly Traffic", road.road)));
            out.push_str(&traffic_table(road.night.iter().map(|point| {
                (point.hour as usize, point.vehicles, point.pedestrians)
            })));
            let _ = write!(
                out,
                "\n\n{}\n",
                bold(&format!("Voltage Profile for {}", road.road))
            );
            out.push_str(&render_voltage(&road.voltage));
            Ok(out)
        }
    }
}

fn render_voltage(voltage: &VoltageView) -> String {
    let points = match voltage {
        VoltageView::Unavailable { error } => {
            return colorize(&format!("{} {error}", display::ERROR_EMOJI), Colors::RED);
        }
        VoltageView::Complete { points } | VoltageView::Partial { points, .. } => points,
    };

    let mut out = format!("{:>4}  {:>11}", "Hour", "Voltage (%)");
    for (hour, value) in points {
        let value = value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        let _ = write!(out, "\n{hour:>4}  {value:>11}");
    }
    if let VoltageView::Partial { warning, .. } = voltage {
        let _ = write!(
            out,
            "\n{}",
            colorize(&format!("{} {warning}", display::WARNING_EMOJI), Colors::YELLOW)
        );
    }
    out
}
