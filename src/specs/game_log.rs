//! Scraping *spec* for a team's season schedule & results page.
//!
//! Columns used: `G` (game number), `Tm` (team points), `Opp` (opponent
//! points). The table repeats its header row every twenty games; those rows
//! are dropped. Games without a numeric score (postponed, not yet played)
//! stay in the log with a missing margin.

use crate::core::net::PageSource;
use crate::error::{Result, VizError};
use crate::table::Frame;

use super::tables::{read_tables, RawTable};

pub const GAME_COL: &str = "G";
pub const TEAM_PTS_COL: &str = "Tm";
pub const OPP_PTS_COL: &str = "Opp";

pub fn path(code: &str, season: i32) -> String {
    format!("/teams/{code}/{season}_games.html")
}

/// Per-game point margins of one team in one season.
#[derive(Clone, Debug, PartialEq)]
pub struct GameLog {
    pub team: String,
    /// Game labels in page order ("1", "2", …).
    pub games: Vec<String>,
    /// `Tm - Opp` per game; `None` where either score is not a number.
    pub margins: Vec<Option<f64>>,
}

impl GameLog {
    /// Share of games with a usable margin; 0 for an empty log.
    pub fn coverage(&self) -> f64 {
        if self.margins.is_empty() {
            return 0.0;
        }
        self.margins.iter().filter(|m| m.is_some()).count() as f64 / self.margins.len() as f64
    }
}

pub fn fetch(source: &dyn PageSource, code: &str, season: i32) -> Result<GameLog> {
    let page = path(code, season);
    let html_doc = source.get(&page)?;
    parse_doc(&html_doc, code).ok_or_else(|| VizError::source_unavailable(&page, "no game results table"))
}

/// `None` if the page has no table with `G`, `Tm` and `Opp` columns.
pub fn parse_doc(html_doc: &str, code: &str) -> Option<GameLog> {
    let raw = read_tables(html_doc)
        .into_iter()
        .find(|t| t.has_columns(&[GAME_COL, TEAM_PTS_COL, OPP_PTS_COL]))?;

    let raw = drop_separator_rows(raw);
    let frame = Frame::from_raw(&raw, GAME_COL)?;

    let tm = frame.numeric(TEAM_PTS_COL)?;
    let opp = frame.numeric(OPP_PTS_COL)?;
    let margins = tm
        .iter()
        .zip(&opp)
        .map(|(t, o)| Some((*t)? - (*o)?))
        .collect();

    Some(GameLog { team: s!(code), games: frame.index().to_vec(), margins })
}

/// Repeated header rows and blank spacer rows.
fn drop_separator_rows(mut raw: RawTable) -> RawTable {
    let Some(g) = raw.col(GAME_COL) else { return raw };
    raw.rows.retain(|r| {
        let label = r.get(g).map(|c| c.trim()).unwrap_or("");
        !label.is_empty() && label != GAME_COL
    });
    raw
}
