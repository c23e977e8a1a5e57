//! streetgrid
//!
//! Analyses the streetlights of a synthetic city grid: cross-verifies the
//! dimming schedule against the city inventory, estimates the city area,
//! computes the energy saved by one night of dimming, and renders the
//! traffic/voltage dashboard and grid map views.

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod reporting;
pub mod ui;

pub use analysis::AnalysisReport;
pub use config::{CliConfig, Config, DataFile};
pub use core::error::{GridError, Result};
