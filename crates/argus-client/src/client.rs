//! Blocking HTTP implementation of the service API.
//!
//! One request, one response; there is no client-side retry. A transient
//! failure is fatal to the running command, which matches how the CLI is
//! used in CI: the pipeline re-runs the whole step.

use argus_config::ResolvedConfig;
use argus_core::api::{ApiError, AppApi};
use argus_core::model::{Analysis, DynamicScan, FileRecord, Paged, Vulnerability};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

pub struct ApiClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl ApiClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!("argus/", env!("CARGO_PKG_VERSION")));
        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let mut request = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", self.access_token));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        response
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AppApi for ApiClient {
    fn file(&self, file_id: u64) -> Result<FileRecord, ApiError> {
        let path = format!("api/v2/files/{}", file_id);
        match self.get_json::<FileRecord>(&path, &[]) {
            Err(ApiError::UnexpectedStatus { status: 404, .. }) => {
                Err(ApiError::FileNotFound { file_id })
            }
            other => other,
        }
    }

    fn latest_dynamic_scan(&self, file_id: u64) -> Result<Option<DynamicScan>, ApiError> {
        let path = format!("api/v2/files/{}/dynamicscans", file_id);
        let page: Paged<DynamicScan> = self.get_json(&path, &[])?;
        // Results are ordered most-recent-first; only the head matters.
        Ok(page.results.into_iter().next())
    }

    fn analyses(
        &self,
        file_id: u64,
        vulnerability_type: Option<u8>,
    ) -> Result<Vec<Analysis>, ApiError> {
        let path = format!("api/v2/files/{}/analyses", file_id);
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(vulnerability_type) = vulnerability_type {
            query.push(("vulnerability_type", vulnerability_type.to_string()));
        }

        // First round trip discovers the total count, the second fetches
        // everything with limit=count so the default page size never
        // truncates the result set.
        let first: Paged<Analysis> = self.get_json(&path, &query)?;
        if first.count == 0 {
            return Ok(Vec::new());
        }

        query.push(("limit", first.count.to_string()));
        let full: Paged<Analysis> = self.get_json(&path, &query)?;
        Ok(full.results)
    }

    fn vulnerability(&self, id: u64) -> Result<Vulnerability, ApiError> {
        self.get_json(&format!("api/v2/vulnerabilities/{}", id), &[])
    }

    fn schedule_dast_automation(&self, file_id: u64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/dynamicscan/{}/schedule_automation", file_id))?;
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Token {}", self.access_token))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::BAD_REQUEST => Err(ApiError::AutomationNotEnabled),
            StatusCode::FORBIDDEN => Err(ApiError::AutomationInProgress),
            status => Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }
}
