use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client as ReqwestClient, StatusCode};

use crate::{error::Error, result::Result};

/// The byte-level HTTP capability the [`Client`](crate::Client) sends requests through.
///
/// Implementations only move bytes. Rate limiting, decoding and error
/// classification happen in the client, so a scripted implementation is
/// enough to drive the whole crate in tests.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Performs a GET request and returns the raw response body.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;

    /// Performs a form-encoded POST request and returns the raw response body.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>>;

    /// Forgets any session state (cookies) held by the transport.
    fn reset_session(&self) {}
}

/// [`Transport`] backed by `reqwest` with a cookie store.
#[derive(Debug)]
pub struct HttpTransport {
    http: RwLock<ReqwestClient>,
    user_agent: String,
}

impl HttpTransport {
    /// Creates a transport sending `user_agent` with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(user_agent: &str) -> Result<Self> {
        Ok(Self {
            http: RwLock::new(build_http()?),
            user_agent: user_agent.to_string(),
        })
    }

    fn http(&self) -> ReqwestClient {
        match self.http.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
        log::info!("response status: {}", response.status());
        match response.status() {
            // 404 bodies carry `{"error": 404}`, which callers inspect themselves.
            code if code.is_success() || code == StatusCode::NOT_FOUND => {
                Ok(response.bytes().await?.to_vec())
            }
            code => Err(Error::UnexpectedStatus(code)),
        }
    }
}

fn build_http() -> Result<ReqwestClient> {
    ReqwestClient::builder()
        .cookie_store(true)
        .build()
        .map_err(Into::into)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        log::info!("request for {} dispatched", url);
        let response = self
            .http()
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>> {
        log::info!("form post to {} dispatched", url);
        let response = self
            .http()
            .post(url)
            .header(USER_AGENT, &self.user_agent)
            .form(form)
            .send()
            .await?;
        Self::read_body(response).await
    }

    fn reset_session(&self) {
        let fresh = match build_http() {
            Ok(http) => http,
            Err(e) => {
                log::debug!("could not rebuild http client, keeping cookies: {e}");
                return;
            }
        };
        match self.http.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        log::debug!("cleared session cookies");
    }
}
