//! Session-bound operations: login, user ids and the friend list.

use serde_json::Value;

use crate::{
    client::decode,
    error::Error::{InvalidCredentials, NotLoggedIn, RateLimited, UnexpectedApiResponse},
    result::Result,
    user::{about_data, about_url},
    Client,
};

impl Client {
    /// Logs in as `user`, replacing any previous session.
    ///
    /// On success the modhash needed by [`add_friend`](Client::add_friend)
    /// and [`remove_friend`](Client::remove_friend) is kept on the client.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCredentials`] or [`RateLimited`] when the API refuses
    /// the login, and [`UnexpectedApiResponse`] for any other unusable answer.
    pub async fn login(&self, user: &str, password: &str) -> Result<()> {
        self.transport().reset_session();
        {
            let mut session = self.session().lock().await;
            session.modhash = None;
            session.user_id = None;
        }

        let url = self.endpoint(&format!("/api/login/{user}"));
        let form = [("user", user), ("passwd", password), ("api_type", "json")];
        let body = self.post_text(&url, &form).await?;

        if body.contains("WRONG_PASSWORD") {
            log::debug!("login: invalid password for {user}");
            return Err(InvalidCredentials);
        }
        if body.contains("RATELIMIT") {
            log::debug!("login: rate limited");
            return Err(RateLimited);
        }

        let json = decode(&body).map_err(|_| {
            UnexpectedApiResponse(format!("login: failed to parse response: {body}"))
        })?;
        let Some(data) = json.get("json").and_then(|j| j.get("data")) else {
            log::debug!("login: failed: {body}");
            return Err(UnexpectedApiResponse(format!("login: failed: {body}")));
        };

        if let Some(modhash) = data.get("modhash").and_then(Value::as_str) {
            self.session().lock().await.modhash = Some(modhash.to_string());
        }
        log::debug!("logged in");
        Ok(())
    }

    /// Returns the id of `user`, or the fullname (`t2_...`) of the logged-in
    /// user when `user` is `None`.
    ///
    /// The logged-in user's id is fetched once and cached for the session.
    ///
    /// # Errors
    ///
    /// Returns [`UserNotFound`](crate::error::Error::UserNotFound) for unknown
    /// users and [`UnexpectedApiResponse`] if the response carries no id.
    pub async fn user_id(&self, user: Option<&str>) -> Result<String> {
        match user {
            Some(name) => {
                let json = self.fetch_json(&about_url(self, name)).await?;
                id_of(about_data(&json, name)?).ok_or_else(|| {
                    UnexpectedApiResponse(format!("could not find user id for {name}: {json}"))
                })
            }
            None => {
                if let Some(id) = self.session().lock().await.user_id.clone() {
                    return Ok(id);
                }
                let json = self.fetch_json(&self.endpoint("/api/me.json")).await?;
                let Some(id) = json.get("data").and_then(id_of) else {
                    log::debug!("failed to get logged-in user's id from /api/me.json: {json}");
                    return Err(UnexpectedApiResponse(format!(
                        "failed to get logged-in user's id: {json}"
                    )));
                };
                let id = format!("t2_{id}");
                self.session().lock().await.user_id = Some(id.clone());
                Ok(id)
            }
        }
    }

    /// Returns the names on the logged-in user's friend list.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedApiResponse`] if the response holds no friend listing.
    pub async fn friends(&self) -> Result<Vec<String>> {
        let json = self.fetch_json(&self.endpoint("/prefs/friends.json")).await?;
        // the first listing is the friend list
        let children = json
            .as_array()
            .and_then(|lists| lists.first())
            .and_then(|list| list.get("data"))
            .and_then(|data| data.get("children"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                UnexpectedApiResponse(format!("no friends list found at /prefs/friends.json: {json}"))
            })?;

        Ok(children
            .iter()
            .filter_map(|friend| friend.get("name").and_then(Value::as_str))
            .map(ToString::to_string)
            .collect())
    }

    /// Adds `user` to the logged-in user's friend list.
    ///
    /// # Errors
    ///
    /// Returns [`NotLoggedIn`] without a session and [`UnexpectedApiResponse`]
    /// if `user` does not exist.
    pub async fn add_friend(&self, user: &str) -> Result<()> {
        let modhash = self.modhash().await.ok_or(NotLoggedIn)?;
        let container = self.user_id(None).await?;
        let form = [
            ("action", "add"),
            ("type", "friend"),
            ("name", user),
            ("container", container.as_str()),
            ("uh", modhash.as_str()),
            ("id", "#friend"),
            ("renderstyle", "html"),
        ];

        let body = self.post_text(&self.endpoint("/api/friend"), &form).await?;
        if body.contains("USER_DOESNT_EXIST") {
            log::debug!("USER_DOESNT_EXIST error while friending /u/{user}");
            return Err(UnexpectedApiResponse(String::from("USER_DOESNT_EXIST")));
        }
        Ok(())
    }

    /// Removes `user` from the logged-in user's friend list.
    ///
    /// # Errors
    ///
    /// Returns [`NotLoggedIn`] without a session and [`UnexpectedApiResponse`]
    /// if the API answers with anything but an empty object.
    pub async fn remove_friend(&self, user: &str) -> Result<()> {
        let modhash = self.modhash().await.ok_or(NotLoggedIn)?;
        let container = self.user_id(None).await?;
        let friend_id = self.user_id(Some(user)).await?;
        let form = [
            ("executed", "removed"),
            ("type", "friend"),
            ("name", user),
            ("container", container.as_str()),
            ("uh", modhash.as_str()),
            ("id", friend_id.as_str()),
            ("renderstyle", "html"),
        ];

        let body = self.post_text(&self.endpoint("/api/unfriend"), &form).await?;
        if body.trim() != "{}" {
            log::debug!("did not receive expected response while unfriending /u/{user}: {body}");
            return Err(UnexpectedApiResponse(format!(
                "unexpected response while unfriending /u/{user}: {body}"
            )));
        }
        Ok(())
    }
}

fn id_of(data: &Value) -> Option<String> {
    data.get("id").and_then(Value::as_str).map(ToString::to_string)
}
