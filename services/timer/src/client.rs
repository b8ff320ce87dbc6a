//! HTTP client for the session registry

use common::{NewSession, SessionId, SessionRecord};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Errors raised while talking to the registry
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the response could not be decoded
    #[error("Registry request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry answered with an unexpected status
    #[error("Registry returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;

/// Session registry client
#[derive(Debug, Clone)]
pub struct SessionClient {
    http: Client,
    base_url: String,
}

impl SessionClient {
    /// Create a client for the registry at `base_url`, e.g. `http://127.0.0.1:3001`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions", self.base_url)
    }

    /// Record a new session and return what the registry stored
    pub async fn create_session(&self, session: &NewSession) -> ClientResult<SessionRecord> {
        debug!("POST {} {:?}", self.sessions_url(), session);

        let response = self
            .http
            .post(self.sessions_url())
            .json(session)
            .send()
            .await?;

        let response = expect_status(response, StatusCode::CREATED).await?;
        Ok(response.json().await?)
    }

    /// Every session the registry holds, oldest first
    pub async fn list_sessions(&self) -> ClientResult<Vec<SessionRecord>> {
        let response = self.http.get(self.sessions_url()).send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    /// Delete a session. Succeeds whether or not the id existed.
    pub async fn delete_session(&self, id: SessionId) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.sessions_url())
            .query(&[("id", id)])
            .send()
            .await?;

        expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = SessionClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.sessions_url(), "http://localhost:3001/sessions");
    }
}
