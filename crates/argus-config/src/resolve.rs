use crate::config::{Config, ResolvedConfig};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("access token missing: pass --access-token, set ARGUS_ACCESS_TOKEN, or add access_token to the config file")]
    MissingAccessToken,

    #[error("invalid host URL: {0}")]
    InvalidHost(String),

    #[error("invalid region name: {region}. Available regions: {available}")]
    InvalidRegion { region: String, available: String },

    #[error("invalid proxy URL: {0}")]
    InvalidProxy(String),
}

/// Region names to hosted API base URLs.
pub fn host_mappings() -> &'static [(&'static str, &'static str)] {
    &[
        ("global", "https://api.argussec.io/"),
        ("saudi", "https://sa.secure.argussec.io/"),
    ]
}

fn resolve_base_url(host: Option<&str>, region: Option<&str>) -> Result<Url, ConfigError> {
    // An explicit host always wins over a region.
    if let Some(host) = host {
        if region.is_some() {
            tracing::warn!(host, "both region and host provided, using host and ignoring region");
        }
        let mut url =
            Url::parse(host).map_err(|_| ConfigError::InvalidHost(host.to_string()))?;
        // A trailing slash keeps relative endpoint joins from eating the
        // last path segment.
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        return Ok(url);
    }

    let region = region.unwrap_or("global");
    let mapped = host_mappings()
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, url)| *url);
    match mapped {
        Some(url) => Ok(Url::parse(url).expect("region mapping URLs are valid")),
        None => Err(ConfigError::InvalidRegion {
            region: region.to_string(),
            available: host_mappings()
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

impl Config {
    /// Validate and collapse into the form handed to the client
    /// constructor. Fails before any network call is made.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let access_token = self
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingAccessToken)?
            .to_string();

        let base_url = resolve_base_url(self.host.as_deref(), self.region.as_deref())?;

        let proxy = match self.proxy.as_deref().filter(|p| !p.is_empty()) {
            Some(proxy) => Some(
                Url::parse(proxy).map_err(|_| ConfigError::InvalidProxy(proxy.to_string()))?,
            ),
            None => None,
        };

        Ok(ResolvedConfig {
            access_token,
            base_url,
            proxy,
            insecure: self.insecure,
        })
    }
}
