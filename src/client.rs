use std::time::Duration;

use serde_json::Value;
use tokio::{
    sync::Mutex,
    time::{sleep, Instant},
};

use crate::{
    error::Error,
    listing::{parse, Parsed},
    result::Result,
};

pub use crate::transport::{HttpTransport, Transport};

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_USER_AGENT: &str = "redownr/0.1 (user history ripper)";
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Client for the listing API.
///
/// Every outbound request goes through the client's rate limiter, and the
/// login state (modhash, own user id) lives here for the lifetime of the client.
#[derive(Debug)]
pub struct Client {
    transport: Box<dyn Transport>,
    limiter: RateLimit,
    base_url: String,
    session: Mutex<Session>,
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) modhash: Option<String>,
    pub(crate) user_id: Option<String>,
}

/// Keeps outbound requests at least `min_interval` apart.
#[derive(Debug)]
pub(crate) struct RateLimit {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimit {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Sleeps until `min_interval` has passed since the previous call returned.
    ///
    /// The lock is held while sleeping, so concurrent callers queue up behind each other.
    pub(crate) async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                log::debug!("requesting too often! rate-limiting for {remaining:?}");
                sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Configures a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    min_interval: Duration,
    transport: Option<Box<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_interval: DEFAULT_MIN_INTERVAL,
            transport: None,
        }
    }
}

impl ClientBuilder {
    /// Sets the scheme and host every endpoint is resolved against.
    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the `User-Agent` of the default HTTP transport.
    #[must_use]
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Sets the minimum spacing between two requests (2 seconds by default).
    #[must_use]
    pub fn min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sends requests through `transport` instead of the default HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created.
    pub fn build(self) -> Result<Client> {
        let transport: Box<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&self.user_agent)?),
        };

        Ok(Client {
            transport,
            limiter: RateLimit::new(self.min_interval),
            base_url: self.base_url,
            session: Mutex::new(Session::default()),
        })
    }
}

impl Client {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not start up.
    pub fn new() -> Result<Client> {
        ClientBuilder::default().build()
    }

    /// Returns a [`ClientBuilder`] for custom configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Fetches `url` and parses it as either a thread or a listing.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the body is not JSON, or the JSON has an
    /// unrecognized shape.
    pub async fn get(&self, url: &str) -> Result<Parsed> {
        log::debug!("loading {url}");
        let json = self.fetch_json(url).await?;
        parse(&json).inspect_err(|e| log::debug!("exception: {e}"))
    }

    /// Returns the modhash obtained by the last successful login, if any.
    pub async fn modhash(&self) -> Option<String> {
        self.session.lock().await.modhash.clone()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn session(&self) -> &Mutex<Session> {
        &self.session
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Rate-limited GET returning the raw body.
    pub(crate) async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.limiter.wait().await;
        self.transport
            .get(url)
            .await
            .inspect_err(|e| log::debug!("exception: {e}"))
    }

    /// Rate-limited GET returning the body as text.
    pub(crate) async fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.fetch_bytes(url).await?;
        String::from_utf8(body).map_err(Into::into)
    }

    /// Rate-limited GET decoded as JSON.
    pub(crate) async fn fetch_json(&self, url: &str) -> Result<Value> {
        let text = self.fetch_text(url).await?;
        decode(&text)
    }

    /// Rate-limited form POST returning the body as text.
    pub(crate) async fn post_text(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.limiter.wait().await;
        let body = self
            .transport
            .post_form(url, form)
            .await
            .inspect_err(|e| log::debug!("exception: {e}"))?;
        String::from_utf8(body).map_err(Into::into)
    }
}

pub(crate) fn decode(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| {
        log::debug!("failed to load JSON: {e}\n{text}");
        Error::from(e)
    })
}
