//! The external reputation check WebFetch consults before allowing a URL
//! through (§4.6, §5). The check itself is a third-party network call, so
//! it sits behind a small trait the same way the teacher isolates other
//! pluggable, swap-in-a-test-double strategies (cf. `PathExtractor` in
//! `exec/shell/src/path_extractor.rs`): a dyn-compatible trait plus a
//! no-op default, with the real HTTP client kept separate.

use std::time::Duration;

use cc_allow_error::ReputationError;

const SAFE_BROWSING_TIMEOUT: Duration = Duration::from_secs(5);
const SAFE_BROWSING_ENDPOINT: &str =
    "https://safebrowsing.googleapis.com/v4/threatMatches:find";

/// The outcome of a reputation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationVerdict {
    Clean,
    Threat,
}

/// A pluggable URL-reputation check. The decision path only ever sees
/// this trait; the real network client and any test double implement it
/// identically.
pub trait ReputationChecker: Send + Sync {
    fn check(&self, url: &str) -> Result<ReputationVerdict, ReputationError>;
}

/// A `ReputationChecker` that never flags anything, used when
/// `safe_browsing.enabled` is false or no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpChecker;

impl ReputationChecker for NoOpChecker {
    fn check(&self, _url: &str) -> Result<ReputationVerdict, ReputationError> {
        Ok(ReputationVerdict::Clean)
    }
}

/// Consults the Google Safe Browsing `threatMatches:find` endpoint via a
/// blocking `reqwest` client. §5 mandates the decision path stay
/// synchronous and future-free, so this is the one place this repo
/// reaches for `reqwest::blocking` instead of the teacher's pervasive
/// async client.
pub struct SafeBrowsingClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl SafeBrowsingClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ReputationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SAFE_BROWSING_TIMEOUT)
            .build()
            .map_err(|e| ReputationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }
}

impl ReputationChecker for SafeBrowsingClient {
    fn check(&self, url: &str) -> Result<ReputationVerdict, ReputationError> {
        let body = serde_json::json!({
            "client": {"clientId": "cc-allow", "clientVersion": env!("CARGO_PKG_VERSION")},
            "threatInfo": {
                "threatTypes": ["MALWARE", "SOCIAL_ENGINEERING", "UNWANTED_SOFTWARE"],
                "platformTypes": ["ANY_PLATFORM"],
                "threatEntryTypes": ["URL"],
                "threatEntries": [{"url": url}],
            },
        });

        let response = self
            .http
            .post(SAFE_BROWSING_ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| ReputationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ReputationError::NonSuccessStatus(response.status().as_u16()));
        }

        let parsed: serde_json::Value = response
            .json()
            .map_err(|e| ReputationError::Transport(e.to_string()))?;

        let matches_found = parsed
            .get("matches")
            .and_then(|v| v.as_array())
            .is_some_and(|arr| !arr.is_empty());

        Ok(if matches_found {
            ReputationVerdict::Threat
        } else {
            ReputationVerdict::Clean
        })
    }
}

#[cfg(test)]
#[path = "reputation.test.rs"]
mod tests;
