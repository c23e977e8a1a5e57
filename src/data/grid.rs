use serde::{Deserialize, Serialize};

use crate::core::constants::road_types;
use crate::core::types::GridLabel;

/// Contents of `city_grid.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityGrid {
    #[serde(default)]
    pub nodes: Vec<GridNode>,

    #[serde(default)]
    pub edges: Vec<GridEdge>,
}

/// One intersection of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridNode {
    pub id: String,

    #[serde(default)]
    pub zone: String,

    #[serde(default)]
    pub traffic_light: bool,

    /// Seconds; only meaningful when the node has a traffic light
    #[serde(default)]
    pub traffic_light_delay: Option<f64>,
}

/// One directed road between two intersections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridEdge {
    pub source: String,
    pub target: String,

    #[serde(default)]
    pub road_type: String,

    /// Kilometres
    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub capacity: f64,

    /// Streetlights along the edge, when the generator recorded them
    #[serde(default)]
    pub streetlights: Option<u64>,
}

impl GridEdge {
    pub fn is_major(&self) -> bool {
        self.road_type == road_types::MAJOR
    }
}

impl CityGrid {
    pub fn node(&self, id: &str) -> Option<&GridNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Outgoing edges of `id` in file order. The edges outlive the borrow of `id`.
    pub fn successors<'a, 'id>(
        &'a self,
        id: &'id str,
    ) -> impl Iterator<Item = &'a GridEdge> + use<'a, 'id> {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
    }

    /// Rows and columns spanned by the node labels that parse as grid cells
    pub fn dimensions(&self) -> (usize, usize) {
        self.nodes
            .iter()
            .filter_map(|node| GridLabel::parse(&node.id))
            .fold((0, 0), |(rows, cols), label| {
                (
                    rows.max(label.row_index() + 1),
                    cols.max(label.column_index() + 1),
                )
            })
    }
}
