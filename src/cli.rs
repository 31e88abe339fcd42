// src/cli.rs
use std::path::PathBuf;

use crate::config::options::AppOptions;
use crate::console::Console;
use crate::core::net::HttpSource;
use crate::error::{Result, VizError};
use crate::progress::PrintProgress;

pub const HELP: &str = include_str!("cli_help.txt");

/// What the command line asks for.
#[derive(Debug, PartialEq)]
pub enum Mode {
    Run(AppOptions),
    ListAspects,
    ListTeams,
    Help,
}

pub fn run() -> Result<()> {
    match parse_cli(std::env::args().skip(1))? {
        Mode::Help => println!("{HELP}"),
        Mode::ListAspects => {
            for (code, full, since) in crate::runner::list_aspects() {
                println!("{code:<6}{full} (from {since})");
            }
        }
        Mode::ListTeams => {
            for (code, name) in crate::runner::list_teams() {
                println!("{code},{name}");
            }
        }
        Mode::Run(opts) => {
            let source = HttpSource::new(&opts.fetch)?;
            let mut console = Console::stdio();
            let mut progress = PrintProgress::default();
            crate::runner::run(&opts, &source, &mut console, &mut progress)?;
        }
    }
    Ok(())
}

pub fn parse_cli<I: IntoIterator<Item = String>>(args: I) -> Result<Mode> {
    let mut opts = AppOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--aspect" => opts.preset.aspect = Some(value(&mut args, &a)?),
            "--season" => opts.preset.season = Some(value(&mut args, &a)?),
            "--teams" => opts.preset.teams = Some(value(&mut args, &a)?),
            "-o" | "--out-dir" => opts.export.out_dir = PathBuf::from(value(&mut args, &a)?),
            "--base-url" => {
                let v = value(&mut args, &a)?;
                opts.fetch.base_url = s!(v.trim_end_matches('/'));
            }
            "--list-aspects" => return Ok(Mode::ListAspects),
            "--list-teams" => return Ok(Mode::ListTeams),
            "-h" | "--help" => return Ok(Mode::Help),
            _ => return Err(VizError::Usage(format!("Unknown arg: {a}"))),
        }
    }

    Ok(Mode::Run(opts))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| VizError::Usage(format!("Missing value for {flag}")))
}
