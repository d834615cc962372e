//! REST gateway for the feedreader backend.
//!
//! One typed method per API operation over a shared transport. The base URL
//! is fixed at construction, the session's current auth header is attached
//! to every request, and every call is a single attempt that fails fast.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use url::Url;

use super::wire::*;
use crate::config::AppConfig;
use crate::models::{Entry, Feed, ReadStatus};
use crate::session::AuthToken;
use crate::{Error, Result};

pub struct ApiGateway {
    http: Client,
    base_url: String,
    auth: AuthToken,
}

impl ApiGateway {
    pub fn new(config: &AppConfig, auth: AuthToken) -> Result<Self> {
        let base_url = config.server.base_url.trim_end_matches('/').to_string();
        // Catch a malformed base URL at startup, not on the first request
        Url::parse(&base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return information about the current user
    pub async fn current_user(&self) -> Result<UserInfo> {
        Ok(self
            .send(self.request(Method::GET, "users"))
            .await?
            .json()
            .await?)
    }

    /// Probe the user endpoint with an explicit header (login check)
    pub(crate) async fn login_probe(&self, header: &str) -> Result<UserInfo> {
        let req = self
            .http
            .get(self.endpoint("users"))
            .header(AUTHORIZATION, header);
        Ok(self.send(req).await?.json().await?)
    }

    /// Create a new account. Issued without an auth header.
    pub(crate) async fn create_user(&self, username: &str, password: &str) -> Result<()> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send(self.http.post(self.endpoint("users")).json(&body))
            .await?;
        Ok(())
    }

    /// List the user's subscribed feeds with unread counts
    pub async fn feeds(&self) -> Result<Vec<Feed>> {
        let body: FeedsResponse = self
            .send(self.request(Method::GET, "feeds"))
            .await?
            .json()
            .await?;
        Ok(body.feeds)
    }

    /// Metadata for one subscribed feed
    pub async fn feed(&self, id: i64) -> Result<Feed> {
        Ok(self
            .send(self.request(Method::GET, &format!("feeds/{}", id)))
            .await?
            .json()
            .await?)
    }

    /// Subscribe to the feed at `url`
    pub async fn subscribe(&self, url: &str) -> Result<()> {
        let body = SubscribeRequest {
            url: url.to_string(),
        };
        self.send(self.request(Method::POST, "feeds").json(&body))
            .await?;
        Ok(())
    }

    /// Unsubscribe from a feed
    pub async fn unsubscribe(&self, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("feeds/{}", id)))
            .await?;
        Ok(())
    }

    /// Entry IDs for a feed, optionally filtered by read status
    pub async fn feed_entry_ids(
        &self,
        feed_id: i64,
        filter: Option<ReadStatus>,
    ) -> Result<Vec<i64>> {
        let mut req = self.request(Method::GET, &format!("feeds/{}/entries", feed_id));
        if let Some(filter) = filter {
            req = req.query(&[("filter", filter.to_string())]);
        }
        let body: EntryIdsResponse = self.send(req).await?.json().await?;
        Ok(body.entries)
    }

    /// Fetch entry bodies by ID, with content truncated to `truncate`
    /// characters when given
    pub async fn entries(&self, ids: &[i64], truncate: Option<u32>) -> Result<Vec<Entry>> {
        if ids.is_empty() {
            return Err(Error::Validation("no entry ids requested".to_string()));
        }

        let mut req = self.request(Method::GET, &format!("entries/{}", id_csv(ids)));
        if let Some(n) = truncate {
            req = req.query(&[("truncate", n)]);
        }
        let body: EntriesResponse = self.send(req).await?.json().await?;
        Ok(body.entries)
    }

    /// Fetch a single entry with full content
    pub async fn entry(&self, id: i64) -> Result<Entry> {
        let mut entries = self.entries(&[id], None).await?;
        entries
            .pop()
            .ok_or_else(|| Error::NotFound(format!("entry {} does not exist", id)))
    }

    /// Mutate read status server-side for the given entries
    pub async fn set_read(&self, ids: &[i64], read: bool) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::Validation("no entry ids given".to_string()));
        }

        let req = self
            .request(Method::PATCH, &format!("entries/{}", id_csv(ids)))
            .json(&ReadPatch { read });
        self.send(req).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.endpoint(path));
        if let Some(header) = self.auth.header() {
            req = req.header(AUTHORIZATION, header);
        }
        req
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;
        Self::check(resp).await
    }

    /// Map a non-success response to an error, pulling the message out of
    /// the backend's `{"error": {"code", "message"}}` body when present
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = match resp.json::<ApiErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        tracing::debug!(status = status.as_u16(), %message, "API request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => Error::Auth(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

fn id_csv(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_csv() {
        assert_eq!(id_csv(&[42]), "42");
        assert_eq!(id_csv(&[1, 2, 30]), "1,2,30");
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "http://localhost:8080/api/".to_string();

        let gateway = ApiGateway::new(&config, AuthToken::default()).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080/api");
        assert_eq!(gateway.endpoint("feeds"), "http://localhost:8080/api/feeds");
    }

    #[test]
    fn test_rejects_malformed_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "not a url".to_string();

        assert!(ApiGateway::new(&config, AuthToken::default()).is_err());
    }
}
