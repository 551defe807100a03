use crate::core::error::AgentError;
use reqwest::{Client, Response};
use serde::Serialize;

/// Thin JSON-over-HTTP client shared by every provider.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth_header: Option<(String, String)>,
}

impl HttpClient {
    pub fn new(base_url: String, auth_header: Option<(String, String)>) -> Result<Self, AgentError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON payload; non-success statuses are turned into `AgentError::Api`.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, AgentError> {
        let url = self.url_for(path);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some((name, value)) = &self.auth_header {
            request = request.header(name, value);
        }

        tracing::debug!(%url, "sending backend request");
        let response = request.json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!("{}: {}", status, body.trim())));
        }

        Ok(response)
    }
}
