//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for basketball-reference. Each spec
//! knows *where the ground truth lives* on one page and how to pull it out:
//!
//! - `tables` – generic `<table>` reader shared by every page.
//! - `season_stats` – `/leagues/<NBA|BAA>_<season>.html`: picks the team
//!   *totals* table among the many tables on the page.
//! - `game_log` – `/teams/<code>/<season>_games.html`: per-game scores of one
//!   team, turned into point margins.
//!
//! Specs only fetch and extract. Deciding which teams survive, smoothing and
//! shaping for charts lives in `sourcing`.
//!
//! Every spec splits `fetch` (network) from `parse_doc` (pure) so the parsing
//! can be tested offline against captured HTML.
pub mod game_log;
pub mod season_stats;
pub mod tables;
