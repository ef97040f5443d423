use serde::{Deserialize, Serialize};
use url::Url;

/// On-disk configuration, all optional. Resolution into a usable
/// [`ResolvedConfig`] happens once at startup; business logic only ever
/// sees the resolved form.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Named region mapped to a hosted API URL ("global", "saudi").
    #[serde(default)]
    pub region: Option<String>,
    /// Explicit API host URL. Takes precedence over `region`.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub insecure: bool,
}

/// Command-line overrides layered on top of the file values.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub access_token: Option<String>,
    pub region: Option<String>,
    pub host: Option<String>,
    pub insecure: bool,
}

impl Config {
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(token) = overrides.access_token {
            self.access_token = Some(token);
        }
        if let Some(region) = overrides.region {
            self.region = Some(region);
        }
        if let Some(host) = overrides.host {
            self.host = Some(host);
        }
        if overrides.insecure {
            self.insecure = true;
        }
    }
}

/// Everything the API client needs, validated. Constructed once and
/// passed by reference; there are no global lookups past this point.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub access_token: String,
    pub base_url: Url,
    pub proxy: Option<Url>,
    pub insecure: bool,
}
