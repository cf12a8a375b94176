use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    listing::parse_listing,
    models::{de_ascii, de_count, de_timestamp, macros::str_opt_ref, pad_id},
    result::Result,
};

/// A post or a comment.
///
/// Both variants share the fields in [`Common`], reachable through
/// [`Entity::common`] or by dereferencing the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// A link or self-post (`t3`).
    Post(Post),
    /// A comment (`t1`).
    Comment(Comment),
}

impl Entity {
    /// Returns the fields shared by posts and comments.
    pub fn common(&self) -> &Common {
        match self {
            Entity::Post(p) => &p.common,
            Entity::Comment(c) => &c.common,
        }
    }

    /// Returns the zero-padded id.
    pub fn id(&self) -> &str {
        self.common().id()
    }

    /// Returns the nested replies.
    pub fn children(&self) -> &[Entity] {
        self.common().children()
    }

    /// Returns the post, if this is one.
    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Entity::Post(p) => Some(p),
            Entity::Comment(_) => None,
        }
    }

    /// Returns the comment, if this is one.
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Entity::Comment(c) => Some(c),
            Entity::Post(_) => None,
        }
    }

    /// Returns a link to the entity on the site.
    pub fn permalink(&self) -> String {
        match self {
            Entity::Post(p) => p.permalink(),
            Entity::Comment(c) => c.permalink(),
        }
    }
}

/// Fields shared by [`Post`] and [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Common {
    id: String,
    subreddit: String,
    created_utc: i64,
    author: String,
    ups: i64,
    downs: i64,
    children: Vec<Entity>,
}

impl Common {
    /// Returns the id, left-padded with `'0'` to six characters.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the subreddit name. Empty when there is no subreddit context.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// Returns the creation time in seconds since the epoch.
    pub fn created_utc(&self) -> i64 {
        self.created_utc
    }

    /// Returns the creation time, or `None` if it is out of range.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc, 0)
    }

    /// Returns the author's name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the upvote count.
    pub fn ups(&self) -> i64 {
        self.ups
    }

    /// Returns the downvote count.
    pub fn downs(&self) -> i64 {
        self.downs
    }

    /// Returns the nested replies, in the order the API listed them.
    pub fn children(&self) -> &[Entity] {
        &self.children
    }
}

/// A submission: either a link or a self-post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    common: Common,
    over_18: bool,
    url: String,
    selftext: Option<String>,
    title: String,
}

impl Deref for Post {
    type Target = Common;

    fn deref(&self) -> &Self::Target {
        &self.common
    }
}

impl Post {
    /// Returns whether the post is marked NSFW.
    pub fn over_18(&self) -> bool {
        self.over_18
    }

    /// Returns the link target (for self-posts, the post itself).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the body of a self-post, or `None` for link posts.
    pub fn selftext(&self) -> Option<&str> {
        str_opt_ref!(self.selftext)
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns a link to the post.
    pub fn permalink(&self) -> String {
        if self.subreddit().is_empty() {
            format!("https://reddit.com/comments/{}", self.id())
        } else {
            format!(
                "https://reddit.com/r/{}/comments/{}",
                self.subreddit(),
                self.id()
            )
        }
    }

    pub(crate) fn set_children(&mut self, children: Vec<Entity>) {
        self.common.children = children;
    }

    pub(crate) fn from_value(data: &Value) -> Result<Self> {
        let raw = RawPost::deserialize(data)?;
        Ok(Self {
            common: raw.common.into_common()?,
            over_18: raw.over_18,
            url: raw.url,
            selftext: raw.is_self.then_some(raw.selftext),
            title: raw.title,
        })
    }
}

/// A comment on a post or on another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    common: Common,
    body: String,
    link_id: String,
}

impl Deref for Comment {
    type Target = Common;

    fn deref(&self) -> &Self::Target {
        &self.common
    }
}

impl Comment {
    /// Returns the comment text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the fullname of the post this comment belongs to (e.g. `t3_abc123`).
    pub fn link_id(&self) -> &str {
        &self.link_id
    }

    /// Returns a link to the comment.
    pub fn permalink(&self) -> String {
        let post = self.link_id.trim_start_matches("t3_");
        if self.subreddit().is_empty() {
            format!("https://reddit.com/comments/{post}/_/{}", self.id())
        } else {
            format!(
                "https://reddit.com/r/{}/comments/{post}/_/{}",
                self.subreddit(),
                self.id()
            )
        }
    }

    pub(crate) fn from_value(data: &Value) -> Result<Self> {
        let raw = RawComment::deserialize(data)?;
        Ok(Self {
            common: raw.common.into_common()?,
            body: raw.body,
            link_id: raw.link_id,
        })
    }
}

#[derive(Deserialize)]
struct RawCommon {
    id: String,
    #[serde(default)]
    subreddit: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    created_utc: i64,
    #[serde(default)]
    author: String,
    #[serde(default, deserialize_with = "de_count")]
    ups: i64,
    #[serde(default, deserialize_with = "de_count")]
    downs: i64,
    /// A listing object, or `""` when there are no replies.
    #[serde(default)]
    replies: Value,
}

impl RawCommon {
    fn into_common(self) -> Result<Common> {
        let children = if self.replies.is_object() {
            parse_listing(&self.replies)?
        } else {
            Vec::new()
        };
        Ok(Common {
            id: pad_id(&self.id),
            subreddit: self.subreddit.unwrap_or_default(),
            created_utc: self.created_utc,
            author: self.author,
            ups: self.ups,
            downs: self.downs,
            children,
        })
    }
}

#[derive(Deserialize)]
struct RawPost {
    #[serde(flatten)]
    common: RawCommon,
    #[serde(default)]
    over_18: bool,
    #[serde(default, deserialize_with = "de_ascii")]
    url: String,
    #[serde(default, deserialize_with = "de_ascii")]
    selftext: String,
    #[serde(default)]
    is_self: bool,
    #[serde(default, deserialize_with = "de_ascii")]
    title: String,
}

#[derive(Deserialize)]
struct RawComment {
    #[serde(flatten)]
    common: RawCommon,
    #[serde(default, deserialize_with = "de_ascii")]
    body: String,
    #[serde(default)]
    link_id: String,
}
