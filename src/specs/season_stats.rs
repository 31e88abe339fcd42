//! Scraping *spec* for the season overview page.
//!
//! The page lists a dozen tables (per game, totals, per 100 possessions,
//! opponent versions, …) and their ids have changed over the years, so the
//! totals table is found by content: the first table with a `PTS` column
//! holding any value above 200, which no single-game score reaches.
//!
//! Team names come with a trailing `*` for playoff teams; it is removed here
//! so names match the directory and user input exactly.

use crate::config::consts::{FIRST_NBA_SEASON, SEASON_TOTAL_POINTS_FLOOR};
use crate::core::net::PageSource;
use crate::core::sanitize::{parse_number, strip_marker};
use crate::error::{Result, VizError};
use crate::table::Frame;

use super::tables::{read_tables, RawTable};

pub const TEAM_COL: &str = "Team";
pub const POINTS_COL: &str = "PTS";

/// "NBA" from 1950 on, "BAA" before.
pub fn league(season: i32) -> &'static str {
    if season >= FIRST_NBA_SEASON { "NBA" } else { "BAA" }
}

pub fn path(season: i32) -> String {
    format!("/leagues/{}_{}.html", league(season), season)
}

/// Season-wide totals, one row per participating team, indexed by full team
/// name as the source spells it (marker removed).
#[derive(Clone, Debug)]
pub struct SeasonStats {
    pub season: i32,
    pub frame: Frame,
}

impl SeasonStats {
    /// The table's spelling of `full_name` if that team played this
    /// season. Matching ignores case.
    pub fn participated(&self, full_name: &str) -> Option<&str> {
        let key = full_name.trim().to_uppercase();
        self.frame.index().iter().find(|n| n.to_uppercase() == key).map(String::as_str)
    }
}

pub fn fetch(source: &dyn PageSource, season: i32) -> Result<SeasonStats> {
    let html_doc = source.get(&path(season))?;
    let t = std::time::Instant::now();
    let out = parse_doc(&html_doc, season);
    logd!("Season stats: parse {} in {:?}", path(season), t.elapsed());
    out
}

pub fn parse_doc(html_doc: &str, season: i32) -> Result<SeasonStats> {
    let tables = read_tables(html_doc);
    let (pos, totals) = tables
        .iter()
        .enumerate()
        .find(|(_, t)| is_totals_table(t))
        .ok_or(VizError::StatsTableNotFound { season })?;

    logf!(
        "Season {season}: totals table is #{pos} of {} (id {:?})",
        tables.len(),
        totals.id
    );

    let mut frame = Frame::from_raw(totals, TEAM_COL)
        .ok_or(VizError::StatsTableNotFound { season })?;
    frame.map_index(|name| s!(strip_marker(name)));

    Ok(SeasonStats { season, frame })
}

fn is_totals_table(t: &RawTable) -> bool {
    t.has_columns(&[TEAM_COL, POINTS_COL])
        && t
            .column_cells(POINTS_COL)
            .filter_map(parse_number)
            .any(|pts| pts > SEASON_TOTAL_POINTS_FLOOR)
}
