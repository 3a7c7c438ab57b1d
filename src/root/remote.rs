//! URL backend
//!
//! One best-effort GET per `open`: no caching, no retries. `file://` URLs
//! are served from the local filesystem, `http://` and `https://` through a
//! blocking reqwest client.

use std::fs::File;

use reqwest::StatusCode;
use url::Url;

use crate::config::Settings;
use crate::error::{Result, invalid_address, not_found, transport_failed, unsupported};

use super::{OpenMode, Stream, bundle_relative, finish, io_failure};

/// A bundle rooted at a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRoot {
    base_url: String,
    user_agent: String,
}

impl UrlRoot {
    /// Root a bundle at `base_url`, which must parse as an absolute URL
    pub fn new(base_url: impl Into<String>, settings: &Settings) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|_| invalid_address(&base_url))?;
        Ok(Self {
            base_url,
            user_agent: settings.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `sub_path` below the base URL
    pub fn join(&self, sub_path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            sub_path.trim_start_matches('/')
        )
    }

    pub fn open(&self, sub_path: &str, mode: OpenMode) -> Result<Stream> {
        let target = self.join(bundle_relative(sub_path)?);
        let url = Url::parse(&target).map_err(|_| invalid_address(&target))?;

        tracing::trace!(url = %url, mode = %mode, "Opening remote path");

        match url.scheme() {
            "file" => open_file_url(&url, mode),
            "http" | "https" => self.fetch(url, mode),
            scheme => Err(unsupported(
                target.as_str(),
                format!("no {scheme} transport available"),
            )),
        }
    }

    fn fetch(&self, url: Url, mode: OpenMode) -> Result<Stream> {
        let display = url.to_string();
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| transport_failed(&display, e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| transport_failed(&display, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(not_found(display));
        }
        if !status.is_success() {
            return Err(transport_failed(&display, format!("HTTP {status}")));
        }

        finish(response, mode, &display)
    }
}

fn open_file_url(url: &Url, mode: OpenMode) -> Result<Stream> {
    let path = url
        .to_file_path()
        .map_err(|()| invalid_address(url.as_str()))?;
    let file = File::open(&path).map_err(|e| io_failure(url.as_str(), e))?;
    finish(file, mode, url.as_str())
}
