use crate::analysis::energy::ActiveHours;
use crate::analysis::traffic::{
    ProfileError, VoltageProfile, ZoneIndex, aggregate_zone_traffic, road_night_traffic,
    road_voltage_profile, zone_roads,
};
use crate::data::{CityGrid, HourlyCount, TrafficData, VoltageSchedule};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Message shown for a zone without roads
    pub const NO_ROADS: &str = "No roads found for this zone.";
}

/// Traffic of one hour of the nightly window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NightPoint {
    pub hour: u8,
    pub vehicles: u64,
    pub pedestrians: u64,
}

/// Voltage schedule of a road as the dashboard presents it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VoltageView {
    Complete { points: Vec<(u8, Option<f64>)> },
    Partial {
        points: Vec<(u8, Option<f64>)>,
        warning: String,
    },
    Unavailable { error: String },
}

impl VoltageView {
    fn from_lookup(lookup: Result<VoltageProfile, ProfileError>) -> Self {
        match lookup {
            Ok(profile) if profile.is_partial() => VoltageView::Partial {
                warning: profile.partial_warning(),
                points: profile.points,
            },
            Ok(profile) => VoltageView::Complete {
                points: profile.points,
            },
            Err(error) => VoltageView::Unavailable {
                error: error.to_string(),
            },
        }
    }
}

/// Nightly traffic and voltage of one road
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadView {
    pub road: String,
    pub night: Vec<NightPoint>,
    pub voltage: VoltageView,
}

/// Hourly traffic of one zone and the roads leaving it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    pub name: String,
    pub traffic: Vec<HourlyCount>,
    pub roads: Vec<RoadView>,
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub zones: Vec<ZoneView>,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

impl DashboardData {
    /// Compute the zone and road views for every zone in `zones`
    pub fn build(
        traffic: &TrafficData,
        schedule: &VoltageSchedule,
        grid: &CityGrid,
        zones: &[String],
        hours: &ActiveHours,
        timestamp: String,
    ) -> Self {
        let index = ZoneIndex::from_grid(grid);
        let zones = zones
            .iter()
            .map(|zone| Self::build_zone(traffic, schedule, &index, zone, hours))
            .collect();

        Self { zones, timestamp }
    }

    fn build_zone(
        traffic: &TrafficData,
        schedule: &VoltageSchedule,
        index: &ZoneIndex,
        zone: &str,
        hours: &ActiveHours,
    ) -> ZoneView {
        let roads = zone_roads(traffic, index, zone)
            .into_iter()
            .map(|road| RoadView {
                road: road.to_string(),
                night: road_night_traffic(traffic, road, hours)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(hour, count)| NightPoint {
                        hour,
                        vehicles: count.vehicles,
                        pedestrians: count.pedestrians,
                    })
                    .collect(),
                voltage: VoltageView::from_lookup(road_voltage_profile(schedule, road, hours)),
            })
            .collect();

        ZoneView {
            name: zone.to_string(),
            traffic: aggregate_zone_traffic(traffic, index, zone).to_vec(),
            roads,
        }
    }

    pub fn zone(&self, name: &str) -> Option<&ZoneView> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    pub fn road_count(&self) -> usize {
        self.zones.iter().map(|zone| zone.roads.len()).sum()
    }

    /// Roads whose voltage view carries an error or a warning
    pub fn voltage_issue_count(&self) -> usize {
        self.zones
            .iter()
            .flat_map(|zone| &zone.roads)
            .filter(|road| !matches!(road.voltage, VoltageView::Complete { .. }))
            .count()
    }
}

impl ZoneView {
    pub fn road(&self, road: &str) -> Option<&RoadView> {
        self.roads.iter().find(|view| view.road == road)
    }

    /// Busiest hour by vehicles, earliest on ties; `None` when the zone saw no vehicles
    pub fn peak_hour(&self) -> Option<(usize, HourlyCount)> {
        self.traffic
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| count.vehicles > 0)
            .min_by_key(|(hour, count)| (std::cmp::Reverse(count.vehicles), *hour))
    }
}

/// Error type for dashboard generation
#[derive(Debug)]
pub enum DashboardError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::FileWrite(e) => write!(f, "Failed to write dashboard file: {}", e),
            DashboardError::Serialization(e) => write!(f, "Failed to serialize data: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::FileWrite(e) => Some(e),
            DashboardError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(e: io::Error) -> Self {
        DashboardError::FileWrite(e)
    }
}

/// Escape text placed inside HTML elements or attributes
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serialize `value` for embedding inside a `<script>` element
pub(crate) fn script_json<T: Serialize>(value: &T) -> Result<String, DashboardError> {
    serde_json::to_string(value)
        .map(|json| json.replace('<', "\\u003c"))
        .map_err(|e| DashboardError::Serialization(e.to_string()))
}

/// HTML dashboard of zone traffic and road traffic/voltage
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard<P: AsRef<Path>>(
        data: &DashboardData,
        output_path: P,
    ) -> Result<(), DashboardError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> Result<String, DashboardError> {
        let css_styles = Self::generate_css();
        let js_scripts = Self::generate_javascript();
        let body_content = Self::generate_body_content(data)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Smart City Traffic &amp; Voltage Dashboard - streetgrid</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
</body>
</html>"#,
            dashboard_constants::CHART_JS_CDN,
            css_styles,
            body_content,
            js_scripts
        ))
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #2563eb;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

        .header {
            text-align: center;
            margin-bottom: 2rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--primary-color), #3b82f6);
            color: white;
            border-radius: 12px;
        }

        .header h1 { font-size: 2.25rem; margin-bottom: 0.5rem; font-weight: 700; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }

        .stat-card, .chart-container {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .chart-container { margin-bottom: 2rem; }
        .stat-value { font-size: 2rem; font-weight: 700; }
        .stat-label {
            color: var(--text-secondary);
            font-size: 0.9rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .chart-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }

        label { font-weight: 600; margin-right: 0.5rem; }
        select { padding: 0.4rem 0.6rem; border-radius: 6px; border: 1px solid var(--border-color); }

        .notice { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; display: none; }
        .notice.warning { display: block; color: var(--warning-color); background-color: #fffbeb; }
        .notice.error { display: block; color: var(--error-color); background-color: #fef2f2; }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .stats-grid { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> Result<String, DashboardError> {
        let zone_options = data
            .zones
            .iter()
            .enumerate()
            .map(|(i, zone)| format!(r#"<option value="{i}">{}</option>"#, escape_html(&zone.name)))
            .collect::<Vec<_>>()
            .join("");

        Ok(format!(
            r#"
            <div class="container">
                <div class="header">
                    <h1>🚦 Smart City Traffic &amp; Voltage Dashboard</h1>
                    <p>Generated on {} by streetgrid</p>
                </div>
                {}
                <div class="chart-container">
                    <label for="zoneSelect">1) Select Zone</label>
                    <select id="zoneSelect">{}</select>
                    <h3 class="chart-title" id="zoneTitle"></h3>
                    <canvas id="zoneChart" width="400" height="180"></canvas>
                </div>
                <div class="chart-container">
                    <label for="roadSelect">2) Select Road</label>
                    <select id="roadSelect"></select>
                    <div id="roadNotice" class="notice"></div>
                    <h3 class="chart-title" id="roadTitle"></h3>
                    <canvas id="roadTrafficChart" width="400" height="180"></canvas>
                    <h3 class="chart-title" id="voltageTitle"></h3>
                    <div id="voltageNotice" class="notice"></div>
                    <canvas id="voltageChart" width="400" height="180"></canvas>
                </div>
            </div>
            <script>
                window.dashboardData = {};
                window.noRoadsMessage = {};
            </script>
            "#,
            escape_html(&data.timestamp),
            Self::generate_stats_section(data),
            zone_options,
            script_json(data)?,
            script_json(&dashboard_constants::NO_ROADS)?
        ))
    }

    /// Generate the statistics cards section
    fn generate_stats_section(data: &DashboardData) -> String {
        format!(
            r#"
            <div class="stats-grid">
                {}
                {}
                {}
            </div>
            "#,
            Self::generate_stat_card(&data.zones.len().to_string(), "Zones"),
            Self::generate_stat_card(&data.road_count().to_string(), "Roads"),
            Self::generate_stat_card(
                &data.voltage_issue_count().to_string(),
                "Roads With Voltage Gaps"
            ),
        )
    }

    /// Generate a single statistics card
    fn generate_stat_card(value: &str, label: &str) -> String {
        format!(
            r#"
            <div class="stat-card">
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
            "#,
            value, label
        )
    }

    fn generate_javascript() -> &'static str {
        r#"
        const charts = {};

        function capitalize(text) {
            return text.charAt(0).toUpperCase() + text.slice(1);
        }

        function drawLines(id, labels, series, yLabel) {
            if (typeof Chart === 'undefined') { return; }
            if (charts[id]) { charts[id].destroy(); }
            charts[id] = new Chart(document.getElementById(id), {
                type: 'line',
                data: { labels: labels, datasets: series },
                options: {
                    responsive: true,
                    spanGaps: false,
                    scales: { y: { title: { display: true, text: yLabel } } }
                }
            });
        }

        function setNotice(id, kind, message) {
            const el = document.getElementById(id);
            el.className = kind ? 'notice ' + kind : 'notice';
            el.textContent = message || '';
        }

        function showRoad(zone, index) {
            const road = zone.roads[index];
            if (!road) { return; }
            const labels = road.night.map(p => String(p.hour));
            document.getElementById('roadTitle').textContent =
                road.road + ': Nightly Traffic';
            drawLines('roadTrafficChart', labels, [
                { label: 'Vehicles', data: road.night.map(p => p.vehicles), pointStyle: 'circle' },
                { label: 'Pedestrians', data: road.night.map(p => p.pedestrians), pointStyle: 'crossRot' }
            ], 'Count');

            document.getElementById('voltageTitle').textContent =
                'Voltage Profile for ' + road.road;
            const voltage = road.voltage;
            if (voltage.status === 'unavailable') {
                setNotice('voltageNotice', 'error', voltage.error);
                if (charts.voltageChart) { charts.voltageChart.destroy(); delete charts.voltageChart; }
                return;
            }
            setNotice('voltageNotice', voltage.status === 'partial' ? 'warning' : '', voltage.warning);
            drawLines('voltageChart', voltage.points.map(p => String(p[0])), [
                { label: 'Voltage for ' + road.road, data: voltage.points.map(p => p[1]) }
            ], 'Voltage (%)');
        }

        function showZone(index) {
            const zone = window.dashboardData.zones[index];
            if (!zone) { return; }
            document.getElementById('zoneTitle').textContent =
                capitalize(zone.name) + ' Zone: Hourly Traffic';
            drawLines('zoneChart', zone.traffic.map((_, h) => String(h)), [
                { label: 'Vehicles', data: zone.traffic.map(c => c.vehicles), pointStyle: 'circle' },
                { label: 'Pedestrians', data: zone.traffic.map(c => c.pedestrians), pointStyle: 'crossRot' }
            ], 'Count');

            const roadSelect = document.getElementById('roadSelect');
            roadSelect.innerHTML = '';
            zone.roads.forEach((road, i) => {
                const option = document.createElement('option');
                option.value = i;
                option.textContent = road.road;
                roadSelect.appendChild(option);
            });
            roadSelect.onchange = () => showRoad(zone, Number(roadSelect.value));

            if (zone.roads.length === 0) {
                setNotice('roadNotice', 'warning', window.noRoadsMessage);
                ['roadTrafficChart', 'voltageChart'].forEach(id => {
                    if (charts[id]) { charts[id].destroy(); delete charts[id]; }
                });
                document.getElementById('roadTitle').textContent = '';
                document.getElementById('voltageTitle').textContent = '';
                setNotice('voltageNotice', '', '');
                return;
            }
            setNotice('roadNotice', '', '');
            showRoad(zone, 0);
        }

        document.addEventListener('DOMContentLoaded', function() {
            const zoneSelect = document.getElementById('zoneSelect');
            zoneSelect.onchange = () => showZone(Number(zoneSelect.value));
            showZone(0);
        });
        "#
    }
}
