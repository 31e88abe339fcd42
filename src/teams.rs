// src/teams.rs
//! Team Directory: franchise names (current and historical) ↔ the
//! three-letter codes basketball-reference uses in its URLs.
//!
//! The list is curated by hand and knowingly incomplete. Several names share
//! one code (relocations, renames), and the reverse lookup keeps the *last*
//! name listed for a code, so `name_for_code(code_for_name(n))` may return a
//! different alias than `n`. Validation against the live season table is what
//! actually decides whether a team is accepted.

use std::collections::HashMap;

use crate::error::{Result, VizError};

/// (canonical uppercase name, code), in curation order.
const DIRECTORY: &[(&str, &str)] = &[
    ("ATLANTA HAWKS", "ATL"),
    ("ST. LOUIS HAWKS", "SLH"),
    ("MILWAUKEE HAWKS", "MIL"),
    ("TRI-CITIES BLACKHAWKS", "TRI"),
    ("BOSTON CELTICS", "BOS"),
    ("BROOKLYN NETS", "BRK"),
    ("NEW JERSEY NETS", "NJN"),
    ("CHICAGO BULLS", "CHI"),
    ("CHARLOTTE HORNETS", "CHO"),
    ("CHARLOTTE BOBCATS", "CHA"),
    ("CLEVELAND CAVALIERS", "CLE"),
    ("DALLAS MAVERICKS", "DAL"),
    ("DENVER NUGGETS", "DEN"),
    ("DETROIT PISTONS", "DET"),
    ("FORT WAYNE PISTONS", "FWP"),
    ("GOLDEN STATE WARRIORS", "GSW"),
    ("SAN FRANCISCO WARRIORS", "SFW"),
    ("PHILADELPHIA WARRIORS", "PHW"),
    ("HOUSTON ROCKETS", "HOU"),
    ("INDIANA PACERS", "IND"),
    ("LOS ANGELES CLIPPERS", "LAC"),
    ("SAN DIEGO CLIPPERS", "SDC"),
    ("BUFFALO BRAVES", "BUF"),
    ("LOS ANGELES LAKERS", "LAL"),
    ("MINNEAPOLIS LAKERS", "MIN"),
    ("MEMPHIS GRIZZLIES", "MEM"),
    ("VANCOUVER GRIZZLIES", "VAN"),
    ("MIAMI HEAT", "MIA"),
    ("MILWAUKEE BUCKS", "MIL"),
    ("MINNESOTA TIMBERWOLVES", "MIN"),
    ("NEW ORLEANS PELICANS", "NOP"),
    ("NEW ORLEANS/OKLAHOMA CITY HORNETS", "NOK"),
    ("NEW ORLEANS HORNETS", "NOH"),
    ("NEW YORK KNICKS", "NYK"),
    ("OKLAHOMA CITY THUNDER", "OKC"),
    ("SEATTLE SUPERSONICS", "SEA"),
    ("ORLANDO MAGIC", "ORL"),
    ("PHILADELPHIA 76ERS", "PHI"),
    ("SYRACUSE NATIONALS", "SYR"),
    ("PHOENIX SUNS", "PHO"),
    ("PORTLAND TRAIL BLAZERS", "POR"),
    ("SACRAMENTO KINGS", "SAC"),
    ("KANSAS CITY KINGS", "KCK"),
    ("KANSAS CITY-OMAHA KINGS", "KCK"),
    ("CINCINNATI ROYALS", "CIN"),
    ("ROCHESTER ROYALS", "ROR"),
    ("SAN ANTONIO SPURS", "SAS"),
    ("TORONTO RAPTORS", "TOR"),
    ("UTAH JAZZ", "UTA"),
    ("NEW ORLEANS JAZZ", "NOJ"),
    ("WASHINGTON WIZARDS", "WAS"),
    ("WASHINGTON BULLETS", "WAS"),
    ("CAPITAL BULLETS", "CAP"),
    ("BALTIMORE BULLETS", "BAL"),
    ("CHICAGO ZEPHYRS", "CHI"),
    ("CHICAGO PACKERS", "CHI"),
    ("ANDERSON PACKERS", "AND"),
    ("CHICAGO STAGS", "CHS"),
    ("INDIANAPOLIS OLYMPIANS", "IND"),
    ("SHEBOYGAN RED SKINS", "SRS"),
    ("ST. LOUIS BOMBERS", "STB"),
    ("WASHINGTON CAPITOLS", "WAS"),
    ("WATERLOO HAWKS", "WAT"),
];

#[derive(Clone, Debug)]
pub struct TeamDirectory {
    by_name: HashMap<&'static str, &'static str>,
    by_code: HashMap<&'static str, &'static str>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamDirectory {
    pub fn new() -> Self {
        let mut by_name = HashMap::with_capacity(DIRECTORY.len());
        let mut by_code = HashMap::new();
        for &(name, code) in DIRECTORY {
            by_name.insert(name, code);
            // later aliases overwrite earlier ones
            by_code.insert(code, name);
        }
        Self { by_name, by_code }
    }

    /// Case-insensitive exact match against the canonical uppercase names.
    pub fn code_for_name(&self, name: &str) -> Result<&'static str> {
        let key = name.trim().to_uppercase();
        self.by_name
            .get(key.as_str())
            .copied()
            .ok_or_else(|| VizError::UnknownTeamName(s!(name.trim())))
    }

    /// Reverse lookup. Codes are matched case-insensitively.
    pub fn name_for_code(&self, code: &str) -> Option<&'static str> {
        let key = code.trim().to_uppercase();
        self.by_code.get(key.as_str()).copied()
    }

    /// (code, name) pairs in curation order, every alias included.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        DIRECTORY.iter().map(|&(name, code)| (code, name))
    }
}
