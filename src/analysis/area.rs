use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::constants::energy::KM2_TO_M2;
use crate::core::types::{EdgeKey, GridLabel};
use crate::data::CityData;

/// City area estimated from the average length of its grid rows and columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CityArea {
    /// Rows (distinct row letters) with at least one row edge
    pub rows: usize,
    /// Columns (distinct column numbers) with at least one column edge
    pub columns: usize,
    pub avg_row_length_km: f64,
    pub avg_col_length_km: f64,
    pub km2: f64,
    pub m2: f64,
}

enum Orientation {
    Row(String),
    Column(String),
}

/// Row edges join cells of the same row letters, column edges cells of the
/// same column digits. Anything else, including unparsable keys, is skipped.
fn orientation(key: &str) -> Option<Orientation> {
    let edge = EdgeKey::parse(key)?;
    let source = GridLabel::parse(&edge.source)?;
    let target = GridLabel::parse(&edge.target)?;

    if source.row == target.row {
        Some(Orientation::Row(source.row))
    } else if source.column == target.column {
        Some(Orientation::Column(source.column))
    } else {
        None
    }
}

/// Estimate the city area from the block lengths in `road_stats`.
///
/// The total length of each row is averaged over all rows, likewise for
/// columns, and the area is the product of the two averages. A grid with no
/// rows or no columns has zero area.
pub fn compute_city_area(city: &CityData) -> CityArea {
    let mut rows: FxHashMap<String, f64> = FxHashMap::default();
    let mut cols: FxHashMap<String, f64> = FxHashMap::default();

    for (key, road) in &city.road_stats {
        match orientation(key) {
            Some(Orientation::Row(row)) => *rows.entry(row).or_insert(0.0) += road.length_km,
            Some(Orientation::Column(col)) => *cols.entry(col).or_insert(0.0) += road.length_km,
            None => log::debug!("Edge '{key}' is neither a row nor a column edge"),
        }
    }

    if rows.is_empty() || cols.is_empty() {
        return CityArea {
            rows: rows.len(),
            columns: cols.len(),
            ..Default::default()
        };
    }

    let avg_row_length_km = rows.values().sum::<f64>() / rows.len() as f64;
    let avg_col_length_km = cols.values().sum::<f64>() / cols.len() as f64;
    let km2 = avg_row_length_km * avg_col_length_km;

    CityArea {
        rows: rows.len(),
        columns: cols.len(),
        avg_row_length_km,
        avg_col_length_km,
        km2,
        m2: km2 * KM2_TO_M2,
    }
}
