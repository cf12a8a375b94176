//! Turns raw API JSON into [`Entity`] trees.
//!
//! Two response shapes exist:
//! - a thread view, a JSON array whose first listing holds the post and
//!   whose remaining listings hold its comments;
//! - a flat listing object (`{kind, data: {children, after, before}}`), as
//!   returned by user pages and nested `replies`.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    entity::{Comment, Entity, Post},
    error::Error::{self, UnrecognizedShape},
    result::Result,
};

/// The result of parsing a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// A thread view: the post, with its comments as children.
    Thread(Post),
    /// A flat listing of posts and comments, in listing order.
    Listing(Vec<Entity>),
}

impl Parsed {
    /// Returns the entities of a listing, or the thread's post as a single entity.
    pub fn into_entities(self) -> Vec<Entity> {
        match self {
            Parsed::Thread(post) => vec![Entity::Post(post)],
            Parsed::Listing(entities) => entities,
        }
    }
}

/// Parses a decoded response into a thread or a listing.
///
/// # Errors
///
/// Returns [`UnrecognizedShape`] if `json` is neither an array nor a listing
/// object, and a decode error if a post or comment lacks required fields.
pub fn parse(json: &Value) -> Result<Parsed> {
    match json {
        Value::Array(items) => parse_thread(items).map(Parsed::Thread),
        Value::Object(_) => parse_listing(json).map(Parsed::Listing),
        other => Err(UnrecognizedShape(other.to_string())),
    }
}

/// Decodes `text` as JSON and [`parse`]s it.
///
/// # Errors
///
/// See [`parse`]; additionally fails if `text` is not JSON.
pub fn parse_str(text: &str) -> Result<Parsed> {
    let json: Value = serde_json::from_str(text)?;
    parse(&json)
}

/// One page of a listing.
#[derive(Debug)]
pub(crate) struct Page {
    pub(crate) entities: Vec<Entity>,
    pub(crate) after: Option<String>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Thing>,
    #[serde(default)]
    after: Option<String>,
}

/// A listing child, tagged with its kind (`t1`, `t3`, `more`, ...).
#[derive(Deserialize)]
struct Thing {
    kind: String,
    #[serde(default)]
    data: Value,
}

impl Thing {
    fn into_entity(self) -> Result<Option<Entity>> {
        match self.kind.as_str() {
            "t3" => Post::from_value(&self.data).map(|p| Some(Entity::Post(p))),
            "t1" => Comment::from_value(&self.data).map(|c| Some(Entity::Comment(c))),
            kind => {
                log::trace!("skipping listing child of kind {kind}");
                Ok(None)
            }
        }
    }
}

fn envelope(json: &Value) -> Result<ListingData> {
    Listing::deserialize(json)
        .map(|l| l.data)
        .map_err(|e| UnrecognizedShape(format!("{e}: {json}")))
}

pub(crate) fn parse_page(json: &Value) -> Result<Page> {
    let data = envelope(json)?;
    let mut entities = Vec::with_capacity(data.children.len());
    for thing in data.children {
        if let Some(entity) = thing.into_entity()? {
            entities.push(entity);
        }
    }
    Ok(Page {
        entities,
        after: data.after,
    })
}

pub(crate) fn parse_listing(json: &Value) -> Result<Vec<Entity>> {
    parse_page(json).map(|page| page.entities)
}

fn parse_thread(items: &[Value]) -> Result<Post> {
    let (first, rest) = items
        .split_first()
        .ok_or_else(|| UnrecognizedShape(String::from("empty thread response")))?;

    let root = envelope(first)?
        .children
        .into_iter()
        .next()
        .ok_or_else(|| UnrecognizedShape(format!("thread without a post: {first}")))?;
    let mut post = Post::from_value(&root.data)?;

    let mut comments = Vec::new();
    for listing in rest {
        comments.extend(parse_listing(listing)?);
    }
    post.set_children(comments);
    Ok(post)
}

impl From<Parsed> for Vec<Entity> {
    fn from(parsed: Parsed) -> Self {
        parsed.into_entities()
    }
}

impl TryFrom<Parsed> for Post {
    type Error = Error;

    fn try_from(parsed: Parsed) -> Result<Self> {
        match parsed {
            Parsed::Thread(post) => Ok(post),
            Parsed::Listing(_) => Err(UnrecognizedShape(String::from(
                "expected a thread, got a listing",
            ))),
        }
    }
}
