// src/aspects.rs
//! Aspect Catalog: the fixed set of statistics a user can ask for.
//!
//! Built once at startup and handed to whoever needs it; nothing here
//! mutates after `AspectCatalog::new()`.

use crate::error::{Result, VizError};

/// Code of the one aspect that is sourced from game logs instead of season totals.
pub const MARGINS: &str = "mar";

#[derive(Clone, Debug, PartialEq)]
pub struct Aspect {
    pub code: &'static str,
    /// Shown in the option list, e.g. "Total points scored in the season".
    pub full: &'static str,
    /// `full` without the trailing " in the season".
    pub plot_title: String,
    /// Short human label, e.g. "offensive rebounds".
    pub short: &'static str,
    /// `short` with spaces and slashes replaced, safe for file names.
    pub file_label: String,
    /// Season-stats columns this aspect reads. Empty for margins.
    pub columns: Vec<&'static str>,
    /// First season (ending year) with data for this aspect.
    pub availability: i32,
}

impl Aspect {
    fn new(
        code: &'static str,
        full: &'static str,
        short: &'static str,
        columns: &[&'static str],
        availability: i32,
    ) -> Self {
        Self {
            code,
            full,
            plot_title: s!(full.strip_suffix(" in the season").unwrap_or(full)),
            short,
            file_label: short.replace([' ', '/'], "_"),
            columns: columns.to_vec(),
            availability,
        }
    }

    pub fn is_margins(&self) -> bool {
        self.code == MARGINS
    }
}

#[derive(Clone, Debug)]
pub struct AspectCatalog {
    aspects: Vec<Aspect>,
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AspectCatalog {
    pub fn new() -> Self {
        let aspects = vec![
            Aspect::new(MARGINS, "Winning / losing margins for all games in the season", "margins", &[], 1947),
            Aspect::new("pts", "Total points scored in the season", "points", &["PTS"], 1947),
            Aspect::new("orb", "Total number of offensive rebounds in the season", "offensive rebounds", &["ORB"], 1974),
            Aspect::new("drb", "Total number of defensive rebounds in the season", "defensive rebounds", &["DRB"], 1974),
            Aspect::new("acc", "Shooting accuracy in the season", "accuracy", &["3P%", "2P%", "FT%"], 1980),
            Aspect::new("a/t", "Total number of assists vs turnovers in the season", "assists/turnovers", &["AST", "TOV"], 1974),
        ];
        Self { aspects }
    }

    pub fn lookup(&self, code: &str) -> Result<&Aspect> {
        self.get(code).ok_or_else(|| VizError::UnknownAspect(s!(code)))
    }

    pub fn get(&self, code: &str) -> Option<&Aspect> {
        self.aspects.iter().find(|a| a.code == code)
    }

    /// (code, description) in presentation order.
    pub fn available(&self) -> Vec<(&'static str, &'static str)> {
        self.aspects.iter().map(|a| (a.code, a.full)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aspect> {
        self.aspects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::LATEST_SEASON;

    #[test]
    fn every_code_resolves_with_sane_availability() {
        let catalog = AspectCatalog::new();
        for (code, _) in catalog.available() {
            let a = catalog.lookup(code).unwrap();
            assert_eq!(a.code, code);
            assert!(a.availability <= LATEST_SEASON);
        }
        assert_eq!(catalog.available().len(), 6);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let catalog = AspectCatalog::new();
        assert!(matches!(catalog.lookup("reb"), Err(VizError::UnknownAspect(c)) if c == "reb"));
        // codes are matched exactly
        assert!(catalog.lookup("PTS").is_err());
    }

    #[test]
    fn derived_labels() {
        let catalog = AspectCatalog::new();
        let at = catalog.lookup("a/t").unwrap();
        assert_eq!(at.file_label, "assists_turnovers");
        assert_eq!(at.plot_title, "Total number of assists vs turnovers");
        assert_eq!(at.columns, vec!["AST", "TOV"]);

        let orb = catalog.lookup("orb").unwrap();
        assert_eq!(orb.file_label, "offensive_rebounds");

        let mar = catalog.lookup(MARGINS).unwrap();
        assert!(mar.is_margins());
        assert!(mar.columns.is_empty());
        assert_eq!(mar.plot_title, "Winning / losing margins for all games");
    }
}
