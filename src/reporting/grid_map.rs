use crate::core::error::{GridError, Result};
use crate::core::types::GridLabel;
use crate::data::{CityData, CityGrid, GridEdge};
use crate::reporting::dashboard::{DashboardError, escape_html, script_json};
use crate::reporting::logging;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Layout of the grid drawing, in pixels
mod layout {
    pub const CELL_SIZE: f64 = 80.0;
    pub const NODE_RADIUS: f64 = 10.0;
    pub const MARGIN: f64 = 60.0;
    /// Extra canvas space beyond `cells * CELL_SIZE`
    pub const PADDING: f64 = 100.0;
    pub const LAMP_RADIUS: f64 = 2.0;
    pub const MAJOR_COLOR: &str = "black";
    pub const MINOR_COLOR: &str = "orange";
}

/// One outgoing road as shown in the node details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadDetail {
    pub target: String,
    pub road_type: String,
    pub distance: f64,
    pub capacity: f64,
    pub streetlights: u64,
}

impl RoadDetail {
    pub fn describe(&self) -> String {
        format!(
            "→ {}: {} road, {} km, Capacity: {}, Streetlights: {}",
            self.target, self.road_type, self.distance, self.capacity, self.streetlights
        )
    }
}

/// Attributes of an intersection and its outgoing roads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetails {
    pub id: String,
    pub zone: String,
    pub traffic_light: bool,
    pub traffic_light_delay: Option<f64>,
    pub roads: Vec<RoadDetail>,
}

/// Streetlights of an edge: its own count, else the city statistics, else zero
fn edge_streetlights(edge: &GridEdge, city: Option<&CityData>) -> u64 {
    edge.streetlights
        .or_else(|| city.map(|city| city.lamps_on(&edge.source, &edge.target)))
        .unwrap_or(0)
}

impl NodeDetails {
    pub fn collect(grid: &CityGrid, city: Option<&CityData>, id: &str) -> Result<Self> {
        let node = grid
            .node(id)
            .ok_or_else(|| GridError::InvalidData(format!("Unknown grid node '{id}'")))?;

        let roads = grid
            .successors(id)
            .map(|edge| RoadDetail {
                target: edge.target.clone(),
                road_type: edge.road_type.clone(),
                distance: edge.distance,
                capacity: edge.capacity,
                streetlights: edge_streetlights(edge, city),
            })
            .collect();

        Ok(Self {
            id: node.id.clone(),
            zone: node.zone.clone(),
            traffic_light: node.traffic_light,
            traffic_light_delay: node.traffic_light_delay,
            roads,
        })
    }

    /// Header lines (zone and traffic light), without the node title
    pub fn attribute_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Zone: {}", self.zone),
            format!(
                "Traffic Light: {}",
                if self.traffic_light { "Yes" } else { "No" }
            ),
        ];
        if self.traffic_light
            && let Some(delay) = self.traffic_light_delay
        {
            lines.push(format!("Traffic Light Delay: {delay}s"));
        }
        lines
    }
}

/// Pixel position of a label's cell
fn position(label: &GridLabel) -> (f64, f64) {
    (
        label.column_index() as f64 * layout::CELL_SIZE + layout::MARGIN,
        label.row_index() as f64 * layout::CELL_SIZE + layout::MARGIN,
    )
}

/// Clickable SVG map of the grid with per-node detail panels
pub struct GridMap {
    positions: FxHashMap<String, (f64, f64)>,
    /// Node ids in file order, restricted to placed nodes
    order: Vec<String>,
    width: f64,
    height: f64,
}

impl GridMap {
    /// Place every node whose id is a grid label; others are skipped
    pub fn layout(grid: &CityGrid) -> Self {
        let mut positions = FxHashMap::default();
        let mut order = Vec::new();

        for node in &grid.nodes {
            match GridLabel::parse(&node.id) {
                Some(label) => {
                    positions.insert(node.id.clone(), position(&label));
                    order.push(node.id.clone());
                }
                None => logging::log_warning(&format!(
                    "Skipping node '{}': id is not a grid label",
                    node.id
                )),
            }
        }

        let (rows, cols) = grid.dimensions();
        Self {
            positions,
            order,
            width: cols as f64 * layout::CELL_SIZE + layout::PADDING,
            height: rows as f64 * layout::CELL_SIZE + layout::PADDING,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
        self.positions.get(id).copied()
    }

    /// Edges to draw, one per connected pair, in node order
    fn drawn_edges<'a>(&self, grid: &'a CityGrid) -> Vec<&'a GridEdge> {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut edges = Vec::new();

        for id in &self.order {
            visited.insert(id.as_str());
            for edge in grid.successors(id) {
                if visited.contains(edge.target.as_str())
                    || !self.positions.contains_key(&edge.target)
                {
                    continue;
                }
                edges.push(edge);
            }
        }
        edges
    }

    /// Render the `<svg>` element
    pub fn render_svg(&self, grid: &CityGrid, city: Option<&CityData>) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for color in [layout::MAJOR_COLOR, layout::MINOR_COLOR] {
            let _ = write!(
                svg,
                r#"<defs><marker id="arrow-{color}" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{color}"/></marker></defs>"#
            );
        }

        for edge in self.drawn_edges(grid) {
            let (Some((x1, y1)), Some((x2, y2))) =
                (self.position_of(&edge.source), self.position_of(&edge.target))
            else {
                continue;
            };
            let color = if edge.is_major() {
                layout::MAJOR_COLOR
            } else {
                layout::MINOR_COLOR
            };
            let _ = write!(
                svg,
                r#"<line class="road" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{color}" stroke-width="2" marker-end="url(#arrow-{color})"/>"#
            );

            let count = edge_streetlights(edge, city);
            for i in 1..=count {
                let t = i as f64 / (count + 1) as f64;
                let _ = write!(
                    svg,
                    r#"<circle class="lamp" cx="{:.1}" cy="{:.1}" r="{}" fill="yellow"/>"#,
                    x1 + t * (x2 - x1),
                    y1 + t * (y2 - y1),
                    layout::LAMP_RADIUS
                );
            }
        }

        for id in &self.order {
            let Some((x, y)) = self.position_of(id) else {
                continue;
            };
            let id = escape_html(id);
            let _ = write!(
                svg,
                r#"<g class="node" data-node="{id}"><circle cx="{x}" cy="{y}" r="{r}" fill="lightblue" stroke="black"/><text x="{x}" y="{ty}" text-anchor="middle" font-size="8">{id}</text></g>"#,
                r = layout::NODE_RADIUS,
                ty = y - 15.0
            );
        }

        svg.push_str("</svg>");
        svg
    }

    /// Details of every placed node, keyed by id
    fn details(&self, grid: &CityGrid, city: Option<&CityData>) -> FxHashMap<String, NodeDetails> {
        self.order
            .iter()
            .filter_map(|id| {
                NodeDetails::collect(grid, city, id)
                    .ok()
                    .map(|details| (id.clone(), details))
            })
            .collect()
    }

    /// Render the complete HTML page
    pub fn generate_html_content(
        grid: &CityGrid,
        city: Option<&CityData>,
    ) -> std::result::Result<String, DashboardError> {
        let map = Self::layout(grid);
        let svg = map.render_svg(grid, city);
        let details: std::collections::BTreeMap<_, _> = map.details(grid, city).into_iter().collect();

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>🟢 City Grid Viewer - streetgrid</title>
    <style>{}</style>
</head>
<body>
    <h1>🟢 City Grid Viewer</h1>
    <div class="layout">
        <div class="map">{}</div>
        <div id="details" class="details">Click an intersection to see its details.</div>
    </div>
    <script>
        window.nodeDetails = {};
        {}
    </script>
</body>
</html>"#,
            Self::generate_css(),
            svg,
            script_json(&details)?,
            Self::generate_javascript()
        ))
    }

    /// Render the grid map and write it to `output_path`
    pub fn write_html<P: AsRef<Path>>(
        grid: &CityGrid,
        city: Option<&CityData>,
        output_path: P,
    ) -> std::result::Result<(), DashboardError> {
        let html = Self::generate_html_content(grid, city)?;
        fs::write(output_path, html)?;
        Ok(())
    }

    fn generate_css() -> &'static str {
        r#"
        body { font-family: Arial, sans-serif; background: #ffffff; margin: 1.5rem; }
        .layout { display: flex; gap: 1.5rem; align-items: flex-start; }
        .map svg { border: 1px solid #e2e8f0; background: white; }
        .node { cursor: pointer; }
        .node:hover circle { fill: #7dd3fc; }
        .details {
            min-width: 320px;
            white-space: pre-line;
            padding: 1rem;
            border: 1px solid #e2e8f0;
            border-radius: 8px;
            background: #f8fafc;
        }
        "#
    }

    fn generate_javascript() -> &'static str {
        r#"
        function showNode(id) {
            const node = window.nodeDetails[id];
            if (!node) { return; }
            const lines = ['📍 Node: ' + node.id, 'Zone: ' + node.zone,
                'Traffic Light: ' + (node.traffic_light ? 'Yes' : 'No')];
            if (node.traffic_light && node.traffic_light_delay !== null) {
                lines.push('Traffic Light Delay: ' + node.traffic_light_delay + 's');
            }
            lines.push('', '🚗 Connected Roads:');
            node.roads.forEach(r => lines.push('→ ' + r.target + ': ' + r.road_type + ' road, ' +
                r.distance + ' km, Capacity: ' + r.capacity + ', Streetlights: ' + r.streetlights));
            document.getElementById('details').textContent = lines.join('\n');
        }

        document.querySelectorAll('.node').forEach(el => {
            el.addEventListener('click', () => showNode(el.dataset.node));
        });
        "#
    }
}
