// src/core/net.rs
// One blocking GET per page, no retries.

use std::collections::HashMap;
use std::time::Instant;

use reqwest::blocking::Client;

use crate::config::options::FetchOptions;
use crate::error::{Result, VizError};

/// Anything that can hand back the HTML of a site-relative path.
pub trait PageSource {
    fn get(&self, path: &str) -> Result<String>;
}

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .build()
            .map_err(|e| VizError::source_unavailable(&opts.base_url, e))?;
        Ok(Self { client, base_url: s!(opts.base_url.trim_end_matches('/')) })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            join!(&self.base_url, path)
        } else {
            join!(&self.base_url, "/", path)
        }
    }
}

impl PageSource for HttpSource {
    fn get(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        let t = Instant::now();

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| VizError::source_unavailable(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            loge!("GET {url} -> {status}");
            return Err(VizError::source_unavailable(&url, format!("HTTP {status}")));
        }

        let body = resp.text().map_err(|e| VizError::source_unavailable(&url, e))?;
        logd!("GET {url} -> {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}

/// In-memory pages keyed by path. Used for offline runs and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(s!(path), html.into());
        self
    }
}

impl PageSource for StaticSource {
    fn get(&self, path: &str) -> Result<String> {
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| VizError::source_unavailable(path, "HTTP 404 Not Found"))
    }
}
