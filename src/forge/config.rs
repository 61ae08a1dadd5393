//! Configuration for the GitHub connection.
use secrecy::{ExposeSecret, SecretString};

/// Default page size for paginated pull request searches.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository coordinates and the token used to query it.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication. Empty when none was found.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            scheme: "https".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

impl RemoteConfig {
    /// REST API root for the configured host.
    pub fn api_base_uri(&self) -> String {
        if self.host == "github.com" {
            return format!("{}://api.github.com", self.scheme);
        }

        // GitHub Enterprise serves the API under /api/v3
        format!("{}://{}/api/v3", self.scheme, self.host)
    }

    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().is_empty()
    }
}
