// src/query.rs
//! Query Collector: the three-stage terminal dialogue that yields a valid
//! (aspect, season, teams) query.
//!
//! Stages run strictly in order and each one repeats until its answer is
//! valid; an accepted stage is never revisited.
//!
//! The team stage is a worklist. Every identifier the user typed is queued;
//! one that cannot be resolved (unknown code, team absent from the season,
//! name without a known code) earns one follow-up prompt, and a non-empty
//! reply is queued behind the rest. The stage ends when the queue is empty
//! and restarts only if nothing at all was accepted.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::aspects::{Aspect, AspectCatalog};
use crate::config::consts::LATEST_SEASON;
use crate::config::options::QueryPreset;
use crate::console::Console;
use crate::core::net::PageSource;
use crate::error::Result;
use crate::specs::season_stats::{self, league, SeasonStats};
use crate::teams::TeamDirectory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub aspect: String,
    /// Team codes, unique, in the order the user named them.
    pub teams: Vec<String>,
    /// Ending year: 2022 is the 2021/22 season.
    pub season: i32,
}

impl Query {
    pub fn new(aspect: &str, teams: &[&str], season: i32) -> Self {
        Self {
            aspect: s!(aspect),
            teams: teams.iter().map(|t| s!(*t)).collect(),
            season,
        }
    }

    pub fn league(&self) -> &'static str {
        league(self.season)
    }

    /// e.g. "NBA season 2021/2022"
    pub fn season_phrase(&self) -> String {
        format!("{} season {}", self.league(), season_label!(self.season))
    }

    /// Narrow the team list to `kept`, preserving the current order.
    pub fn retain_teams(&mut self, kept: &[String]) {
        self.teams.retain(|t| kept.contains(t));
    }
}

/// Why a season answer was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeasonReject {
    NotAYear,
    OutOfRange { min: i32, max: i32 },
}

/// Why one team identifier was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamReject {
    UnknownCode(String),
    NotParticipating(String),
    NoCode(String),
}

impl TeamReject {
    fn message(&self, season: i32) -> String {
        match self {
            TeamReject::UnknownCode(code) => format!(
                "It seems that {code} is not used as an abbreviation for any team on basketball-reference."
            ),
            TeamReject::NotParticipating(name) => format!(
                "It seems that '{name}' did not participate in {} season {}.",
                league(season),
                season_label!(season)
            ),
            TeamReject::NoCode(name) => format!(
                "Sorry, we do not know the abbreviation basketball-reference uses for '{name}'."
            ),
        }
    }

    fn retry_prompt(&self) -> &'static str {
        match self {
            TeamReject::UnknownCode(_) => {
                "You can try the team's full name, specify another team, or just press enter: "
            }
            _ => "Specify another team, or just press enter: ",
        }
    }
}

/// A team that passed every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTeam {
    pub code: &'static str,
    /// Name as the season table spells it.
    pub name: String,
}

pub const ASPECT_PROMPT: &str = "Aspect: ";
pub const SEASON_PROMPT: &str = "Ending year of season: ";
pub const TEAMS_PROMPT: &str = "Team(s): ";

pub struct QueryCollector<'a> {
    aspects: &'a AspectCatalog,
    directory: &'a TeamDirectory,
    source: &'a dyn PageSource,
    preset: QueryPreset,
}

impl<'a> QueryCollector<'a> {
    pub fn new(aspects: &'a AspectCatalog, directory: &'a TeamDirectory, source: &'a dyn PageSource) -> Self {
        Self { aspects, directory, source, preset: QueryPreset::default() }
    }

    /// Answers to try first, one per stage. An invalid preset falls back to prompting.
    pub fn with_preset(mut self, preset: QueryPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn collect<R: BufRead, W: Write>(mut self, console: &mut Console<R, W>) -> Result<Query> {
        let aspect = self.aspect_stage(console)?;
        let season = self.season_stage(console, aspect)?;

        // Fresh per query; also the participation list for the team stage.
        let stats = season_stats::fetch(self.source, season)?;
        let teams = self.team_stage(console, &stats)?;

        let query = Query {
            aspect: s!(aspect.code),
            teams: teams.iter().map(|t| s!(t.code)).collect(),
            season,
        };
        logf!("Query accepted: {:?}", query);

        console.say(&format!(
            "\n\nVisualizing {} data of {} in {} ...\n",
            aspect.short,
            enumerate_teams(&teams),
            query.season_phrase()
        ))?;
        Ok(query)
    }

    /* ---------------- Aspect ---------------- */

    pub fn check_aspect(&self, input: &str) -> Option<&'a Aspect> {
        self.aspects.get(input)
    }

    fn aspect_stage<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<&'a Aspect> {
        console.say(
            "\nWhat aspect would you like to be visualized?\n\
             Choose one of the following options:\n\
             Type in:      Option:",
        )?;
        for (code, full) in self.aspects.available() {
            console.say(&format!("      {code:<8}{full}"))?;
        }
        console.say("")?;

        // matched exactly as typed, surrounding blanks included
        let mut preset = self.preset.aspect.take();
        loop {
            let inp = match preset.take() {
                Some(given) => {
                    console.echo(ASPECT_PROMPT, &given)?;
                    given
                }
                None => console.ask_line(ASPECT_PROMPT)?,
            };
            match self.check_aspect(&inp) {
                Some(aspect) => return Ok(aspect),
                None => console.say("Please choose one of the options given above.")?,
            }
        }
    }

    /* ---------------- Season ---------------- */

    pub fn check_season(input: &str, aspect: &Aspect) -> std::result::Result<i32, SeasonReject> {
        let year: i32 = input.trim().parse().map_err(|_| SeasonReject::NotAYear)?;
        if (aspect.availability..=LATEST_SEASON).contains(&year) {
            Ok(year)
        } else {
            Err(SeasonReject::OutOfRange { min: aspect.availability, max: LATEST_SEASON })
        }
    }

    fn season_stage<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>, aspect: &Aspect) -> Result<i32> {
        console.say(
            "\n\nFrom which season should the data be sourced?\n\
             Please type in the year in which the season ended.\n\
             For example, if you are interested in season 2021/22, type in:\n    2022\n",
        )?;

        let mut preset = self.preset.season.take();
        loop {
            let inp = answer(console, SEASON_PROMPT, &mut preset)?;
            match Self::check_season(&inp, aspect) {
                Ok(year) => return Ok(year),
                Err(SeasonReject::NotAYear) => {
                    console.say("Please make sure to type in the year in which the season ended.")?
                }
                Err(SeasonReject::OutOfRange { min, max }) => console.say(&format!(
                    "Data required for visualizing {} is available from the season ending in {min} on, \
                     until the season ending in {max}.",
                    aspect.short
                ))?,
            }
        }
    }

    /* ---------------- Teams ---------------- */

    /// Resolve one identifier (code or full name) against the directory and
    /// the season's participants.
    pub fn check_team(&self, ident: &str, stats: &SeasonStats) -> std::result::Result<ResolvedTeam, TeamReject> {
        let ident = ident.trim().to_uppercase();

        let name = if ident.chars().count() == 3 {
            match self.directory.name_for_code(&ident) {
                Some(name) => s!(name),
                None => return Err(TeamReject::UnknownCode(ident)),
            }
        } else {
            ident
        };

        let Some(spelled) = stats.participated(&name) else {
            return Err(TeamReject::NotParticipating(name));
        };

        match self.directory.code_for_name(&name) {
            Ok(code) => Ok(ResolvedTeam { code, name: s!(spelled) }),
            Err(_) => Err(TeamReject::NoCode(name)),
        }
    }

    fn team_stage<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        stats: &SeasonStats,
    ) -> Result<Vec<ResolvedTeam>> {
        console.say(
            "\n\nFrom which team(s) should the data be sourced?\n\
             Please type in for each team either the three-letter abbreviation or\n\
             the official name. If you are interested in multiple teams,\n\
             separate them by a comma. For example, if you are interested\n\
             in Miami Heat and Dallas Mavericks, you can type in:\n    MIA, Dallas Mavericks\n",
        )?;

        let season = stats.season;
        let mut preset = self.preset.teams.take();
        loop {
            let inp = answer(console, TEAMS_PROMPT, &mut preset)?;
            let mut queue: VecDeque<String> = split_teams(&inp).collect();
            let mut accepted: Vec<ResolvedTeam> = Vec::new();

            while let Some(ident) = queue.pop_front() {
                match self.check_team(&ident, stats) {
                    Ok(team) => {
                        if !accepted.iter().any(|t| t.code == team.code) {
                            accepted.push(team);
                        }
                    }
                    Err(reject) => {
                        logd!("Team '{ident}' rejected: {reject:?}");
                        console.say(&reject.message(season))?;
                        let other = console.ask(reject.retry_prompt())?;
                        if !other.is_empty() {
                            queue.push_back(other);
                        }
                    }
                }
            }

            if !accepted.is_empty() {
                return Ok(accepted);
            }
            console.say(&format!(
                "\nNone of the queried teams participated in season {}. Please choose a different set of teams.",
                season_label!(season)
            ))?;
        }
    }
}

/// Take the preset answer once, echoing it; afterwards prompt.
fn answer<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    preset: &mut Option<String>,
) -> Result<String> {
    match preset.take() {
        Some(given) => {
            console.echo(prompt, &given)?;
            Ok(s!(given.trim()))
        }
        None => console.ask(prompt),
    }
}

/// Comma-separated identifiers, trimmed, blanks skipped.
pub fn split_teams(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from)
}

/// "A (X)", "A (X) and B (Y)", "A (X), B (Y), and C (Z)"
pub fn enumerate_teams(teams: &[ResolvedTeam]) -> String {
    let parts: Vec<String> = teams.iter().map(|t| format!("{} ({})", t.name, t.code)).collect();
    match parts.as_slice() {
        [] => s!(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(code: &'static str, name: &str) -> ResolvedTeam {
        ResolvedTeam { code, name: s!(name) }
    }

    #[test]
    fn season_bounds_follow_aspect() {
        let catalog = AspectCatalog::new();
        let acc = catalog.lookup("acc").unwrap();
        assert_eq!(QueryCollector::check_season("1980", acc), Ok(1980));
        assert_eq!(QueryCollector::check_season(" 2022 ", acc), Ok(2022));
        assert_eq!(
            QueryCollector::check_season("1979", acc),
            Err(SeasonReject::OutOfRange { min: 1980, max: LATEST_SEASON })
        );
        assert_eq!(
            QueryCollector::check_season("2023", acc),
            Err(SeasonReject::OutOfRange { min: 1980, max: LATEST_SEASON })
        );
        assert_eq!(QueryCollector::check_season("2021/22", acc), Err(SeasonReject::NotAYear));
    }

    #[test]
    fn below_minimum_is_rejected_for_every_aspect() {
        let catalog = AspectCatalog::new();
        for a in catalog.iter() {
            assert!(QueryCollector::check_season(&a.availability.to_string(), a).is_ok());
            assert!(QueryCollector::check_season(&(a.availability - 1).to_string(), a).is_err());
        }
    }

    #[test]
    fn team_resolution_is_idempotent() {
        let (aspects, dir, source) = (AspectCatalog::new(), TeamDirectory::new(), crate::core::StaticSource::new());
        let collector = QueryCollector::new(&aspects, &dir, &source);

        // a season in which every directory name took part
        let names: Vec<String> = dir.entries().map(|(_, name)| s!(name)).collect();
        let stats = SeasonStats { season: 2022, frame: crate::table::Frame::new(season_stats::TEAM_COL, names) };

        for (code, name) in dir.entries() {
            let once = collector.check_team(name, &stats).unwrap();
            assert_eq!(once.code, dir.code_for_name(name).unwrap());
            assert_eq!(collector.check_team(once.code, &stats).unwrap().code, once.code, "{code}");

            let by_code = collector.check_team(code, &stats).unwrap();
            assert_eq!(collector.check_team(by_code.code, &stats).unwrap().code, by_code.code);
        }
    }

    #[test]
    fn team_enumeration() {
        assert_eq!(enumerate_teams(&[team("MIA", "Miami Heat")]), "Miami Heat (MIA)");
        assert_eq!(
            enumerate_teams(&[team("MIA", "Miami Heat"), team("BOS", "Boston Celtics")]),
            "Miami Heat (MIA) and Boston Celtics (BOS)"
        );
        assert_eq!(
            enumerate_teams(&[team("MIA", "A"), team("BOS", "B"), team("DAL", "C")]),
            "A (MIA), B (BOS), and C (DAL)"
        );
    }

    #[test]
    fn splitting_and_narrowing() {
        let parts: Vec<String> = split_teams(" MIA,Dallas Mavericks , ,bos").collect();
        assert_eq!(parts, vec!["MIA", "Dallas Mavericks", "bos"]);

        let mut q = Query::new("pts", &["MIA", "BOS", "DAL"], 2022);
        q.retain_teams(&[s!("DAL"), s!("MIA")]);
        assert_eq!(q.teams, vec!["MIA", "DAL"]);
        assert_eq!(q.season_phrase(), "NBA season 2021/2022");
    }
}
