use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while talking to the listing API.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client failed to send the request or read the body.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// A custom [`Transport`](crate::client::Transport) failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a status the client does not handle.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// The response body was not valid JSON (or did not fit the expected fields).
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The response body was not valid UTF-8.
    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The JSON decoded, but is neither a thread nor a listing.
    #[error("unable to parse: {0}")]
    UnrecognizedShape(String),

    /// The user listing came back empty.
    #[error("user {0} is deleted")]
    UserDeleted(String),

    /// The API reported `error: 404` for the user.
    #[error("account {0} is deleted (404)")]
    UserNotFound(String),

    /// Login was refused because of a wrong password.
    #[error("login: invalid password")]
    InvalidCredentials,

    /// Login was refused because of the API rate limit.
    #[error("login: rate limit")]
    RateLimited,

    /// The API answered, but not with what the operation expects.
    #[error("unexpected response: {0}")]
    UnexpectedApiResponse(String),

    /// The operation needs a modhash from [`Client::login`](crate::Client::login).
    #[error("not logged in")]
    NotLoggedIn,
}
