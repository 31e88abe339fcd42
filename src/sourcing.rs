// src/sourcing.rs
//! Data Sourcing Pipeline: validated query in, cleaned dataset out.
//!
//! Two branches, picked by aspect:
//! - margins: one game log per team → `<CODE>_margin` / `<CODE>_smoothed`
//!   columns indexed by game number. Teams with fewer than 75% usable
//!   margins, or whose page cannot be read, are dropped.
//! - everything else: the season totals table, rows mapped to team codes,
//!   narrowed to the queried teams and the aspect's columns. Teams missing
//!   any of those values are dropped.
//!
//! Dropped teams are reported through `Progress`. The returned team list is
//! exactly the set of teams with data; an empty set is `NoDataAvailable`.

use std::collections::HashMap;

use crate::aspects::{Aspect, AspectCatalog};
use crate::config::consts::{MIN_MARGIN_COVERAGE, SMOOTHING_SIGMA, SMOOTHING_TRUNCATE};
use crate::core::net::PageSource;
use crate::error::{Result, VizError};
use crate::progress::Progress;
use crate::query::Query;
use crate::smooth::gaussian_filter1d;
use crate::specs::game_log::{self, GameLog};
use crate::specs::season_stats;
use crate::table::{Column, Frame};
use crate::teams::TeamDirectory;

pub const MARGIN_SUFFIX: &str = "_margin";
pub const SMOOTHED_SUFFIX: &str = "_smoothed";

pub fn margin_col(team: &str) -> String {
    join!(team, MARGIN_SUFFIX)
}

pub fn smoothed_col(team: &str) -> String {
    join!(team, SMOOTHED_SUFFIX)
}

/// Cleaned data, shaped for one of the chart families.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    /// Index: game number. Two columns per team.
    Margins(Frame),
    /// Index: team code, in query order. One column per aspect column.
    Season(Frame),
}

impl Dataset {
    pub fn frame(&self) -> &Frame {
        match self {
            Dataset::Margins(f) | Dataset::Season(f) => f,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Sourced {
    pub data: Dataset,
    /// Queried teams that made it through cleaning, in query order.
    pub teams: Vec<String>,
}

pub struct Sourcing<'a> {
    aspects: &'a AspectCatalog,
    directory: &'a TeamDirectory,
    source: &'a dyn PageSource,
}

impl<'a> Sourcing<'a> {
    pub fn new(aspects: &'a AspectCatalog, directory: &'a TeamDirectory, source: &'a dyn PageSource) -> Self {
        Self { aspects, directory, source }
    }

    /// Fetch and clean the data for `query`. Narrowing the query's team
    /// list to `Sourced::teams` is left to the caller.
    pub fn get_data(&self, query: &Query, progress: &mut dyn Progress) -> Result<Sourced> {
        let aspect = self.aspects.lookup(&query.aspect)?;

        let sourced = if aspect.is_margins() {
            self.margins(&query.teams, query.season, progress)?
        } else {
            self.season_totals(aspect, &query.teams, query.season, progress)?
        };

        if sourced.teams.is_empty() {
            loge!("No data left for {:?}", query);
            return Err(VizError::NoDataAvailable);
        }
        logf!("Sourced {} of {} teams: {:?}", sourced.teams.len(), query.teams.len(), sourced.teams);
        Ok(sourced)
    }

    fn display_name(&self, code: &str) -> String {
        match self.directory.name_for_code(code) {
            Some(name) => format!("{name} ({code})"),
            None => s!(code),
        }
    }

    /* ---------------- Margins ---------------- */

    fn margins(&self, teams: &[String], season: i32, progress: &mut dyn Progress) -> Result<Sourced> {
        progress.begin(teams.len());

        let mut logs: Vec<GameLog> = Vec::with_capacity(teams.len());
        for code in teams {
            match game_log::fetch(self.source, code, season) {
                Ok(log) => {
                    let coverage = log.coverage();
                    if coverage < MIN_MARGIN_COVERAGE {
                        let why = VizError::InsufficientData { team: self.display_name(code), ratio: coverage };
                        logw!("{why}");
                        progress.log(&format!("Dropping {code}: {why}"));
                    } else {
                        logs.push(log);
                    }
                }
                Err(e) => {
                    logw!("Game log for {code} unavailable: {e}");
                    progress.log(&format!(
                        "Data required for computing margins not available for {}",
                        self.display_name(code)
                    ));
                }
            }
            progress.item_done(code);
        }

        let kept = logs.iter().map(|l| l.team.clone()).collect();
        Ok(Sourced { data: Dataset::Margins(assemble_margins(&logs)), teams: kept })
    }

    /* ---------------- Season totals ---------------- */

    fn season_totals(
        &self,
        aspect: &Aspect,
        teams: &[String],
        season: i32,
        progress: &mut dyn Progress,
    ) -> Result<Sourced> {
        progress.begin(teams.len());

        let stats = season_stats::fetch(self.source, season)?;

        // full names → codes; rows the directory cannot map keep their uppercased name
        let mut frame = stats.frame;
        let mut names: HashMap<String, String> = HashMap::new();
        frame.map_index(|name| {
            let upper = name.to_uppercase();
            let key = match self.directory.code_for_name(&upper) {
                Ok(code) => s!(code),
                Err(_) => upper,
            };
            names.entry(key.clone()).or_insert_with(|| s!(name));
            key
        });

        let wanted: Vec<&str> = teams.iter().map(String::as_str).collect();
        let selected = frame.select(&aspect.columns).reorder(&wanted);

        let mut kept: Vec<String> = Vec::with_capacity(teams.len());
        for code in teams {
            let label = match names.get(code) {
                Some(name) => format!("{name} ({code})"),
                None => self.display_name(code),
            };
            match selected.position(code) {
                None => {
                    logw!("{code} has no row in the {season} totals table");
                    progress.log(&format!("No season totals found for {label}"));
                }
                Some(row) => match selected.missing_in_row(row).first() {
                    Some(column) => {
                        let why = VizError::MissingValue { team: label, column: s!(*column) };
                        logw!("{why}");
                        progress.log(&format!("Dropping {code}: {why}"));
                    }
                    None => kept.push(code.clone()),
                },
            }
            progress.item_done(code);
        }

        let keys: Vec<&str> = kept.iter().map(String::as_str).collect();
        Ok(Sourced { data: Dataset::Season(selected.reorder(&keys)), teams: kept })
    }
}

/// Side-by-side margin and smoothed-margin columns for every log, on the
/// union of game numbers. Smoothing runs over each team's usable margins in
/// game order; games without a margin have no smoothed value either.
pub fn assemble_margins(logs: &[GameLog]) -> Frame {
    let mut index: Vec<String> = Vec::new();
    for log in logs {
        for g in &log.games {
            if !index.contains(g) {
                index.push(g.clone());
            }
        }
    }
    let pos: HashMap<&str, usize> = index.iter().enumerate().map(|(i, g)| (g.as_str(), i)).collect();
    let n = index.len();

    let mut columns: Vec<(String, Column)> = Vec::with_capacity(logs.len() * 2);
    for log in logs {
        let present: Vec<(usize, f64)> = log
            .games
            .iter()
            .zip(&log.margins)
            .filter_map(|(g, m)| Some((pos[g.as_str()], (*m)?)))
            .collect();
        let values: Vec<f64> = present.iter().map(|(_, v)| *v).collect();
        let smoothed = gaussian_filter1d(&values, SMOOTHING_SIGMA, SMOOTHING_TRUNCATE);

        let mut margin = vec![None; n];
        let mut smooth = vec![None; n];
        for ((row, v), s) in present.iter().zip(smoothed) {
            margin[*row] = Some(*v);
            smooth[*row] = Some(s);
        }
        columns.push((margin_col(&log.team), Column::Numeric(margin)));
        columns.push((smoothed_col(&log.team), Column::Numeric(smooth)));
    }

    let mut frame = Frame::new(game_log::GAME_COL, index);
    for (name, col) in columns {
        frame.push_column(&name, col);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(team: &str, margins: &[Option<f64>]) -> GameLog {
        GameLog {
            team: s!(team),
            games: (1..=margins.len()).map(|g| g.to_string()).collect(),
            margins: margins.to_vec(),
        }
    }

    #[test]
    fn assembles_two_columns_per_team_on_game_union() {
        let a = log("MIA", &[Some(10.0), Some(-2.0), Some(4.0)]);
        let b = log("BOS", &[Some(1.0), None]);
        let f = assemble_margins(&[a, b]);
        assert_eq!(f.index(), &[s!("1"), s!("2"), s!("3")]);
        assert_eq!(
            f.names(),
            &[s!("MIA_margin"), s!("MIA_smoothed"), s!("BOS_margin"), s!("BOS_smoothed")]
        );
        assert_eq!(f.numeric("MIA_margin").unwrap(), vec![Some(10.0), Some(-2.0), Some(4.0)]);
        assert_eq!(f.numeric("BOS_margin").unwrap(), vec![Some(1.0), None, None]);
        // a single usable value smooths to itself
        let bos = f.numeric("BOS_smoothed").unwrap();
        assert!((bos[0].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(&bos[1..], &[None, None]);
        assert!(f.numeric("MIA_smoothed").unwrap().iter().all(Option::is_some));
    }
}
