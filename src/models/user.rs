use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Error::{UnexpectedApiResponse, UserNotFound},
    models::{de_count, de_timestamp},
    result::Result,
    Client,
};

/// Public account information, from `/user/<name>/about.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's name.
    name: String,

    /// UNIX timestamp of account creation.
    #[serde(deserialize_with = "de_timestamp")]
    created_utc: i64,

    /// Karma earned from comments.
    #[serde(default, deserialize_with = "de_count")]
    comment_karma: i64,

    /// Karma earned from submissions.
    #[serde(default, deserialize_with = "de_count")]
    link_karma: i64,
}

impl User {
    /// Looks up `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UserNotFound`] if the API reports a 404, and
    /// [`UnexpectedApiResponse`] if the response has no `data` object.
    pub async fn new(client: &Client, name: &str) -> Result<Self> {
        let json = client.fetch_json(&about_url(client, name)).await?;
        let data = about_data(&json, name)?;
        User::deserialize(data).map_err(Into::into)
    }

    /// Returns the user's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the UNIX timestamp of account creation.
    pub fn created_utc(&self) -> i64 {
        self.created_utc
    }

    /// Returns the comment karma.
    pub fn comment_karma(&self) -> i64 {
        self.comment_karma
    }

    /// Returns the link karma.
    pub fn link_karma(&self) -> i64 {
        self.link_karma
    }
}

pub(crate) fn about_url(client: &Client, name: &str) -> String {
    client.endpoint(&format!("/user/{name}/about.json"))
}

/// Extracts `data` from an about.json response.
pub(crate) fn about_data<'a>(json: &'a Value, name: &str) -> Result<&'a Value> {
    if json.get("error").and_then(Value::as_i64) == Some(404) {
        log::debug!("user /u/{name} is not found (404)");
        return Err(UserNotFound(name.to_string()));
    }
    json.get("data").ok_or_else(|| {
        log::debug!("data not found for /u/{name}, got: {json}");
        UnexpectedApiResponse(format!("data not found for /u/{name}"))
    })
}
