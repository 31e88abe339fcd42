// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use nba_viz::console::Console;
use nba_viz::core::{PageSource, StaticSource};
use nba_viz::error::Result;

/// Season 2021/22 totals. Dallas has no DRB value; Phoenix is in the table
/// under a name the directory does not know.
pub const SEASON_2022: &str = r#"
<html><body>
<table id="per_game-team">
  <thead><tr><th>Rk</th><th>Team</th><th>G</th><th>PTS</th></tr></thead>
  <tbody>
    <tr><th>1</th><td>Miami Heat*</td><td>82</td><td>110.0</td></tr>
  </tbody>
</table>
<!--
<table id="totals-team">
  <thead>
    <tr><th></th><th colspan="3">Totals</th></tr>
    <tr><th>Rk</th><th>Team</th><th>G</th><th>ORB</th><th>DRB</th><th>AST</th><th>TOV</th><th>3P%</th><th>2P%</th><th>FT%</th><th>PTS</th></tr>
  </thead>
  <tbody>
    <tr><th>1</th><td><a href="/teams/MIA/2022.html">Miami Heat</a>*</td><td>82</td><td>848</td><td>2772</td><td>2093</td><td>1215</td><td>.377</td><td>.537</td><td>.808</td><td>9025</td></tr>
    <tr><th>2</th><td><a href="/teams/BOS/2022.html">Boston Celtics</a>*</td><td>82</td><td>886</td><td>3006</td><td>2007</td><td>1149</td><td>.356</td><td>.525</td><td>.802</td><td>9057</td></tr>
    <tr><th>3</th><td><a href="/teams/DAL/2022.html">Dallas Mavericks</a>*</td><td>82</td><td>772</td><td></td><td>1958</td><td>1035</td><td>.353</td><td>.530</td><td>.775</td><td>8628</td></tr>
    <tr><th>4</th><td>Phoenix Nebulas</td><td>82</td><td>800</td><td>2900</td><td>2200</td><td>1100</td><td>.364</td><td>.542</td><td>.834</td><td>9306</td></tr>
    <tr><th></th><td>League Average</td><td>82</td><td>840</td><td>2870</td><td>1994</td><td>1128</td><td>.354</td><td>.530</td><td>.780</td><td>9062</td></tr>
  </tbody>
</table>
-->
</body></html>
"#;

/// `(game, team points, opponent points)`; blank scores are unplayed games.
pub fn games_page(rows: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (i, (g, tm, opp)) in rows.iter().enumerate() {
        if i == 2 {
            body.push_str("<tr class=\"thead\"><th>G</th><th>Date</th><th>Tm</th><th>Opp</th></tr>\n");
        }
        body.push_str(&format!(
            "<tr><th scope=\"row\">{g}</th><td>Tue, Oct 19, 2021</td><td>{tm}</td><td>{opp}</td></tr>\n"
        ));
    }
    format!(
        "<table id=\"games\"><thead><tr><th>G</th><th>Date</th><th>Tm</th><th>Opp</th></tr></thead>\
         <tbody>\n{body}</tbody></table>"
    )
}

pub fn fixture_source() -> StaticSource {
    StaticSource::new()
        .with_page("/leagues/NBA_2022.html", SEASON_2022)
        // every game scored
        .with_page(
            "/teams/MIA/2022_games.html",
            games_page(&[("1", "111", "104"), ("2", "95", "104"), ("3", "118", "99"), ("4", "107", "90")]),
        )
        // 3 of 4 scored: exactly at the threshold
        .with_page(
            "/teams/BOS/2022_games.html",
            games_page(&[("1", "98", "101"), ("2", "115", "91"), ("3", "", ""), ("4", "88", "104")]),
        )
        // 2 of 4 scored: below the threshold
        .with_page(
            "/teams/DAL/2022_games.html",
            games_page(&[("1", "104", "113"), ("2", "", ""), ("3", "99", "82"), ("4", "", "")]),
        )
}

/// Records every path asked for, then delegates.
pub struct CountingSource<S> {
    pub inner: S,
    pub requests: RefCell<Vec<String>>,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, requests: RefCell::new(Vec::new()) }
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl<S: PageSource> PageSource for CountingSource<S> {
    fn get(&self, path: &str) -> Result<String> {
        self.requests.borrow_mut().push(path.to_string());
        self.inner.get(path)
    }
}

pub fn scripted(lines: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(lines.as_bytes().to_vec()), Vec::new())
}

pub fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).unwrap()
}

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("nba_viz_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}
