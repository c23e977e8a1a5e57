//! Views and logging
//!
//! This module handles the HTML traffic/voltage dashboard, the grid map,
//! and structured logging for the application.

pub mod dashboard;
pub mod grid_map;
pub mod logging;

// Re-export commonly used items
pub use dashboard::{DashboardData, DashboardError, HtmlDashboard};
pub use grid_map::{GridMap, NodeDetails};
