use crate::config::IgdbConfig;
use async_trait::async_trait;
use igdb_core::{CatalogError, GameQuery, GameRecord, GameSource, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::debug;

/// HTTP client for the IGDB v4 API.
///
/// Built once at startup and shared; holds no per-request state.
pub struct IgdbClient {
    http: reqwest::Client,
    base_url: String,
}

impl IgdbClient {
    pub fn new(config: &IgdbConfig) -> anyhow::Result<Self> {
        let client_id = config
            .client_id
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("IGDB client id is not configured"))?;
        let token = config
            .access_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("IGDB access token is not configured"))?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("client-id"), HeaderValue::from_str(client_id)?);
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .user_agent(concat!("igdb-addon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

#[async_trait]
impl GameSource for IgdbClient {
    fn name(&self) -> &str {
        "igdb"
    }

    async fn games(&self, query: &GameQuery) -> Result<Vec<GameRecord>> {
        let body = query.to_body();
        debug!("IGDB games query: {}", body);

        let resp = self
            .http
            .post(self.endpoint("games"))
            .body(body)
            .send()
            .await
            .map_err(|e| CatalogError::Upstream(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CatalogError::Upstream(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized(excerpt(&text)));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                message: excerpt(&text),
            });
        }

        let records: Vec<GameRecord> = serde_json::from_str(&text)?;
        debug!("IGDB returned {} records", records.len());
        Ok(records)
    }
}

/// First 200 characters of an error body.
fn excerpt(text: &str) -> String {
    text.chars().take(200).collect()
}
