//! Capability registry client.
//!
//! One fetch per session. Failure is a silent degrade to an empty capability
//! set: the UI simply shows no cards, it never propagates the error.

use crate::models::Capability;
use reqwest::Client;
use std::time::Duration;

/// How long the discovery call may take. Unlike a conversion this should be
/// instant, so it gets an ordinary timeout.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RegistryClient {
    api_root: String,
    capabilities: Vec<Capability>,
}

impl RegistryClient {
    /// Fetch the capability listing from `<api_root>/`.
    ///
    /// On any failure (connect error, non-2xx, malformed payload) the client
    /// holds an empty set.
    pub async fn fetch(api_root: &str) -> Self {
        let api_root = api_root.trim_end_matches('/').to_string();
        let capabilities = match try_fetch(&api_root).await {
            Ok(capabilities) => capabilities,
            Err(err) => {
                log::warn!("capability discovery failed: {}", err);
                Vec::new()
            }
        };
        Self {
            api_root,
            capabilities,
        }
    }

    /// Construct directly from a known listing (tests, offline rendering).
    pub fn from_capabilities(api_root: &str, capabilities: Vec<Capability>) -> Self {
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            capabilities,
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Capabilities in the order the server delivered them.
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Look a capability up by its endpoint, or failing that by
    /// case-insensitive name.
    pub fn find(&self, key: &str) -> Option<&Capability> {
        self.capabilities
            .iter()
            .find(|c| c.endpoint == key)
            .or_else(|| {
                self.capabilities
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(key))
            })
    }
}

async fn try_fetch(api_root: &str) -> Result<Vec<Capability>, reqwest::Error> {
    let client = Client::builder().timeout(DISCOVERY_TIMEOUT).build()?;
    client
        .get(format!("{}/", api_root))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
