use std::ops::Deref;

use crate::{
    entity::{Entity, Post},
    result::Result,
    Client,
};

/// A post together with its comment tree, as shown on the post's own page.
#[derive(Debug, Clone)]
pub struct Thread {
    post: Post,
    url: String,
}

impl Thread {
    /// Fetches the thread at `url`.
    ///
    /// `url` may be a permalink (`https://www.reddit.com/r/rust/comments/abc123/title/`)
    /// or already point at the `.json` view.
    ///
    /// # Errors
    ///
    /// This function will return an error if the client fails to fetch the data,
    /// if the response is not JSON, or if it is not a thread view.
    pub async fn new(client: &Client, url: &str) -> Result<Self> {
        let url = json_url(url);
        let post = Post::try_from(client.get(&url).await?)?;
        Ok(Self { post, url })
    }

    /// Refetches the thread, replacing the post and all of its comments.
    ///
    /// # Errors
    ///
    /// This function will return an error if the client fails to fetch
    /// the updated data.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        self.post = Post::try_from(client.get(&self.url).await?)?;
        Ok(())
    }

    /// Returns the top-level comments.
    pub fn comments(&self) -> &[Entity] {
        self.post.children()
    }

    /// Consumes the thread, returning its post.
    pub fn into_post(self) -> Post {
        self.post
    }
}

impl Deref for Thread {
    type Target = Post;

    fn deref(&self) -> &Self::Target {
        &self.post
    }
}

fn json_url(url: &str) -> String {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };
    let path = path.trim_end_matches('/');
    let mut json = if path.ends_with(".json") {
        path.to_string()
    } else {
        format!("{path}.json")
    };
    if let Some(query) = query {
        json.push('?');
        json.push_str(query);
    }
    json
}
