// src/runner.rs
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::{
    aspects::AspectCatalog,
    chart,
    config::options::AppOptions,
    console::Console,
    core::net::PageSource,
    error::Result,
    file,
    progress::Progress,
    query::QueryCollector,
    sourcing::Sourcing,
    teams::TeamDirectory,
};

/// Top-level runner: ask, source, draw, save.
/// Returns the path of the written image.
pub fn run<R: BufRead, W: Write>(
    opts: &AppOptions,
    source: &dyn PageSource,
    console: &mut Console<R, W>,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let aspects = AspectCatalog::new();
    let directory = TeamDirectory::new();

    let mut query = QueryCollector::new(&aspects, &directory, source)
        .with_preset(opts.preset.clone())
        .collect(console)?;

    let sourced = Sourcing::new(&aspects, &directory, source).get_data(&query, progress);
    progress.finish();
    let sourced = sourced?;

    // Only teams with data reach the chart and the file name.
    query.retain_teams(&sourced.teams);
    logf!("Query after cleaning: {:?}", query);

    let aspect = aspects.lookup(&query.aspect)?;
    let figure = chart::render(aspect, &sourced.data, &query)?;
    let path = file::export(&figure, &query, &aspects, &opts.export)?;

    console.say(&file::location_message(&path))?;
    Ok(path)
}

pub fn list_aspects() -> Vec<(String, String, i32)> {
    AspectCatalog::new()
        .iter()
        .map(|a| (s!(a.code), s!(a.full), a.availability))
        .collect()
}

pub fn list_teams() -> Vec<(&'static str, &'static str)> {
    TeamDirectory::new().entries().collect()
}
