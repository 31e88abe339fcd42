// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("unknown aspect '{0}'")]
    UnknownAspect(String),

    #[error("no team code known for '{0}'")]
    UnknownTeamName(String),

    #[error("could not load {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("no season totals table found for season ending in {season}")]
    StatsTableNotFound { season: i32 },

    /// Reported for a dropped team; not propagated.
    #[error("only {:.0}% of the games of {team} have a usable score", .ratio * 100.0)]
    InsufficientData { team: String, ratio: f64 },

    /// Reported for a dropped team; not propagated.
    #[error("{team} is missing a value for {column}")]
    MissingValue { team: String, column: String },

    #[error("No data available for visualization. Terminating program.")]
    NoDataAvailable,

    #[error("input closed before the query was complete")]
    InputClosed,

    #[error("{0}")]
    Usage(String),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VizError {
    pub(crate) fn source_unavailable(url: &str, reason: impl ToString) -> Self {
        VizError::SourceUnavailable { url: s!(url), reason: reason.to_string() }
    }

    /// Errors the caller cannot recover from by narrowing the team set or re-prompting.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            VizError::UnknownAspect(_)
                | VizError::UnknownTeamName(_)
                | VizError::InsufficientData { .. }
                | VizError::MissingValue { .. }
        )
    }
}
