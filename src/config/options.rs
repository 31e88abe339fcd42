// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::aspects::AspectCatalog;
use crate::query::Query;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub export: ExportOptions,
    pub preset: QueryPreset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

impl ExportOptions {
    /// `plot-<aspect file label>-<CODE_CODE…>-<season-1>_<season>.png`
    pub fn file_name(catalog: &AspectCatalog, query: &Query) -> String {
        let label = catalog
            .get(&query.aspect)
            .map(|a| a.file_label.as_str())
            .unwrap_or(query.aspect.as_str());
        format!(
            "plot-{}-{}-{}_{}.png",
            label,
            query.teams.join("_"),
            query.season - 1,
            query.season
        )
    }

    pub fn out_path(&self, catalog: &AspectCatalog, query: &Query) -> PathBuf {
        self.out_dir.join(Self::file_name(catalog, query))
    }
}

/// Answers given up front on the command line. Each one still goes through
/// the same validation as a typed answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPreset {
    pub aspect: Option<String>,
    pub season: Option<String>,
    pub teams: Option<String>,
}
