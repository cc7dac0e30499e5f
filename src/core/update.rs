//! Release feed version check
//!
//! Runs alongside the main lookup and never delays it. The check is bounded
//! by a short timeout; if it has not finished by the time the result has been
//! printed it is aborted. It only reads from the network and never writes.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Default GitHub "latest release" endpoint.
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/arcdex/arcdex/releases/latest";

/// Default bound on the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1500);

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Release check timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),
}

pub type UpdateResult<T> = Result<T, UpdateError>;

// ============================================================================
// Types
// ============================================================================

/// The subset of the release feed document we read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    #[serde(default)]
    pub html_url: String,
}

/// A newer release than the running binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub current: String,
    pub latest: String,
    pub url: String,
}

// ============================================================================
// Checker
// ============================================================================

#[derive(Debug, Clone)]
pub struct UpdateChecker {
    client: reqwest::Client,
    release_url: String,
    timeout: Duration,
}

impl UpdateChecker {
    pub fn new(release_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            release_url: release_url.into(),
            timeout,
        }
    }

    /// Fetch the latest release, bounded by the configured timeout.
    pub async fn latest_release(&self) -> UpdateResult<ReleaseInfo> {
        let fetch = async {
            let release = self
                .client
                .get(&self.release_url)
                .header(USER_AGENT, format!("{}/{}", crate::NAME, crate::VERSION))
                .header(ACCEPT, "application/vnd.github+json")
                .send()
                .await?
                .error_for_status()?
                .json::<ReleaseInfo>()
                .await?;
            Ok::<_, UpdateError>(release)
        };

        tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| UpdateError::Timeout(self.timeout))?
    }

    /// `Some` when the feed advertises a version newer than `current`.
    pub async fn check(&self, current: &str) -> UpdateResult<Option<UpdateNotice>> {
        let release = self.latest_release().await?;
        if !is_newer(&release.tag_name, current)? {
            return Ok(None);
        }
        Ok(Some(UpdateNotice {
            current: current.to_string(),
            latest: release.tag_name.trim_start_matches('v').to_string(),
            url: release.html_url,
        }))
    }
}

// ============================================================================
// Background Task
// ============================================================================

/// A version check running on the tokio runtime.
#[derive(Debug)]
pub struct PendingCheck {
    handle: JoinHandle<Option<UpdateNotice>>,
}

impl PendingCheck {
    /// Returns the notice if the check already finished; otherwise aborts it.
    pub async fn take_if_ready(self) -> Option<UpdateNotice> {
        if self.handle.is_finished() {
            self.handle.await.ok().flatten()
        } else {
            log::debug!("Version check still running, abandoning it");
            self.handle.abort();
            None
        }
    }
}

/// Start a fire-and-forget version check. Failures are logged at debug level
/// and yield no notice.
pub fn spawn_version_check(checker: UpdateChecker, current: impl Into<String>) -> PendingCheck {
    let current = current.into();
    let handle = tokio::spawn(async move {
        match checker.check(&current).await {
            Ok(notice) => notice,
            Err(e) => {
                log::debug!("Version check failed: {e}");
                None
            }
        }
    });
    PendingCheck { handle }
}

// ============================================================================
// Version Comparison
// ============================================================================

/// Numeric components of `"v1.2.3"` / `"1.2.3-beta"`.
fn parse_version(version: &str) -> UpdateResult<Vec<u64>> {
    let core = version
        .trim()
        .trim_start_matches('v')
        .split(['-', '+'])
        .next()
        .unwrap_or_default();

    core.split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| UpdateError::InvalidVersion(version.to_string()))
        })
        .collect()
}

/// True when `latest` is strictly greater than `current`. Missing trailing
/// components count as zero.
pub fn is_newer(latest: &str, current: &str) -> UpdateResult<bool> {
    let mut latest = parse_version(latest)?;
    let mut current = parse_version(current)?;
    let len = latest.len().max(current.len());
    latest.resize(len, 0);
    current.resize(len, 0);
    Ok(latest > current)
}
