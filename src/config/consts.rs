// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.basketball-reference.com";
pub const USER_AGENT: &str = "nba_viz/0.1";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Seasons
/// Most recent season (ending year) the column assumptions are known to hold for.
pub const LATEST_SEASON: i32 = 2022;
/// Seasons ending before this year belong to the BAA.
pub const FIRST_NBA_SEASON: i32 = 1950;

// Cleaning
pub const SMOOTHING_SIGMA: f64 = 3.0;
pub const SMOOTHING_TRUNCATE: f64 = 4.0;
pub const MIN_MARGIN_COVERAGE: f64 = 0.75;
/// No single game has ever produced this many points for one team.
pub const SEASON_TOTAL_POINTS_FLOOR: f64 = 200.0;

// Local store (logs only)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "visualizations";
