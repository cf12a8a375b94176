use std::ops::Deref;

use serde_json::Value;

use crate::{
    client::decode,
    entity::Entity,
    error::Error::{UserDeleted, UserNotFound},
    listing::parse_page,
    models::pad_id,
    result::Result,
    Client,
};

/// A user's posts and comments, newest first, gathered across listing pages.
#[derive(Debug, Clone)]
pub struct History {
    entities: Vec<Entity>,
    pages: u32,
}

impl Deref for History {
    type Target = Vec<Entity>;

    fn deref(&self) -> &Self::Target {
        &self.entities
    }
}

impl History {
    /// Walks a user's listing page by page, following the `after` cursor.
    ///
    /// Stops at the end of the history, after `max_pages` pages, or when it
    /// reaches the entity with id `since` (which is not included). Passing the
    /// newest id from a previous run therefore fetches only what is new.
    ///
    /// # Errors
    ///
    /// Fails with [`UserDeleted`] if the first page is empty, [`UserNotFound`]
    /// if the API reports a 404, and with a decode error if the first page is
    /// not JSON. A later page that is not UTF-8 or not JSON ends the walk early instead,
    /// keeping what was gathered so far.
    pub async fn new(
        client: &Client,
        user: &str,
        since: Option<&str>,
        max_pages: Option<u32>,
    ) -> Result<Self> {
        let since = since.map(pad_id);
        let url = client.endpoint(&format!("/user/{user}.json"));
        log::debug!("loading {url}");
        let mut body = client.fetch_text(&url).await?;
        if body.trim().is_empty() {
            log::debug!("empty listing for /u/{user}");
            return Err(UserDeleted(user.to_string()));
        }

        let mut entities = Vec::new();
        let mut pages = 1;
        loop {
            let json = match decode(&body) {
                Ok(json) => json,
                Err(e) if pages == 1 => return Err(e),
                Err(_) => {
                    log::debug!("page {pages} is not JSON, keeping {} entities", entities.len());
                    break;
                }
            };
            if json.get("error").and_then(Value::as_i64) == Some(404) {
                log::debug!("/u/{user} is not found (404)");
                return Err(UserNotFound(user.to_string()));
            }

            let page = parse_page(&json)?;
            for entity in page.entities {
                if since.as_deref() == Some(entity.id()) {
                    log::debug!("reached {} on page {pages}", entity.id());
                    return Ok(Self { entities, pages });
                }
                entities.push(entity);
            }

            let Some(after) = page.after else {
                log::debug!("hit end of posts/comments");
                break;
            };
            if max_pages.is_some_and(|max| pages >= max) {
                log::debug!("stopping after {pages} pages");
                break;
            }

            let next = format!("{url}?after={after}");
            log::debug!("loading {next}");
            let bytes = client.fetch_bytes(&next).await?;
            pages += 1;
            body = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    log::debug!("page {pages} is not UTF-8 ({e}), keeping {} entities", entities.len());
                    break;
                }
            };
        }

        Ok(Self { entities, pages })
    }

    /// Returns how many pages were fetched.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Consumes the history, returning the gathered entities.
    pub fn into_inner(self) -> Vec<Entity> {
        self.entities
    }
}
