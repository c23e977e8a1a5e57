/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the domain defaults (lamp power, the nightly
/// window, file names) and the literal strings used by the output layers.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain key=value lines without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Energy model defaults
pub mod energy {
    /// Power drawn by one streetlight at 100% voltage, in kW.
    ///
    /// Older notes describe the lamps as 150 W; the value used by every
    /// computation has always been 0.1 kW and is kept as the contract.
    pub const STREETLIGHT_POWER_KW: f64 = 0.1;

    /// Nightly lamp-operation window, evening hours first (7 PM to 6 AM inclusive)
    pub const ACTIVE_HOURS: [u8; 12] = [19, 20, 21, 22, 23, 0, 1, 2, 3, 4, 5, 6];

    /// Number of hours in a day
    pub const HOURS_PER_DAY: usize = 24;

    /// Voltage percentage that corresponds to nominal voltage
    pub const NOMINAL_VOLTAGE_PERCENT: f64 = 100.0;

    /// Square kilometres to square metres
    pub const KM2_TO_M2: f64 = 1e6;
}

/// Default input file names, resolved against the data directory
pub mod files {
    /// City topology and streetlight inventory
    pub const CITY_ANALYSIS: &str = "city_analysis.json";
    /// Per-edge, per-hour voltage dimming schedule
    pub const VOLTAGE_SCHEDULE: &str = "smoothed_voltage_schedule.json";
    /// Hourly vehicle and pedestrian counts per road
    pub const TRAFFIC_DATA: &str = "traffic_data.json";
    /// Grid nodes (id, zone, traffic lights) and edges
    pub const CITY_GRID: &str = "city_grid.json";
    /// Configuration file looked up in the working directory and its parents
    pub const CONFIG: &str = ".streetgrid.toml";
    /// How many parent directories are searched for the configuration file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Zones known to the dashboard
pub mod zones {
    pub const RESIDENTIAL: &str = "residential";
    pub const COMMERCIAL: &str = "commercial";
    pub const INDUSTRIAL: &str = "industrial";
    pub const PARK: &str = "park";

    /// Default zone list, in display order
    pub const ALL: [&str; 4] = [RESIDENTIAL, COMMERCIAL, INDUSTRIAL, PARK];
}

/// Road types as written by the grid generator
pub mod road_types {
    /// Major roads are drawn in black, every other type in orange
    pub const MAJOR: &str = "major";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for the area estimate line
    pub const CITY_EMOJI: &str = "🏙️";
    /// Emoji for the baseline energy line
    pub const BATTERY_EMOJI: &str = "🔋";
    /// Emoji for the optimized energy line
    pub const NIGHT_EMOJI: &str = "🌙";
    /// Emoji for the savings line
    pub const SAVINGS_EMOJI: &str = "💾";
    /// Emoji for grid node details
    pub const NODE_EMOJI: &str = "📍";
    /// Emoji for connected roads
    pub const ROADS_EMOJI: &str = "🚗";
    /// Emoji for the traffic dashboard
    pub const TRAFFIC_EMOJI: &str = "🚦";
}
