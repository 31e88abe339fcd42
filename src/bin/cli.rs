// src/bin/cli.rs
use nba_viz::{cli, error::VizError, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    match cli::run() {
        Ok(()) => Ok(()),
        Err(e @ (VizError::NoDataAvailable | VizError::Usage(_))) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
