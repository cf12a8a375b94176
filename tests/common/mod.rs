#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use redownr::{client::Transport, error::Error, Client};
use serde_json::{json, Value};

pub const BASE: &str = "http://api.test";

/// A request the client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub method: &'static str,
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl Sent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<Vec<u8>, String>>,
    sent: Vec<Sent>,
    resets: usize,
}

/// Answers requests from a queue of canned bodies.
#[derive(Debug, Clone, Default)]
pub struct Scripted(Arc<Mutex<Script>>);

impl Scripted {
    pub fn reply(&self, body: impl Into<String>) -> &Self {
        let body = body.into().into_bytes();
        self.0.lock().unwrap().replies.push_back(Ok(body));
        self
    }

    pub fn reply_bytes(&self, body: &[u8]) -> &Self {
        self.0.lock().unwrap().replies.push_back(Ok(body.to_vec()));
        self
    }

    pub fn reply_json(&self, json: &Value) -> &Self {
        self.reply(json.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.0
            .lock()
            .unwrap()
            .replies
            .push_back(Err(message.to_string()));
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.0.lock().unwrap().sent.clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.url).collect()
    }

    pub fn resets(&self) -> usize {
        self.0.lock().unwrap().resets
    }

    fn answer(&self, sent: Sent) -> Result<Vec<u8>, Error> {
        let mut script = self.0.lock().unwrap();
        script.sent.push(sent);
        match script.replies.pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport(String::from("no scripted reply left"))),
        }
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn get(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.answer(Sent {
            method: "GET",
            url: url.to_string(),
            form: Vec::new(),
        })
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
        self.answer(Sent {
            method: "POST",
            url: url.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    fn reset_session(&self) {
        self.0.lock().unwrap().resets += 1;
    }
}

pub fn init_logger() {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init();
}

/// A client with no request spacing, for tests that do not measure time.
pub fn client(script: &Scripted) -> Client {
    client_with_interval(script, Duration::ZERO)
}

pub fn client_with_interval(script: &Scripted, interval: Duration) -> Client {
    init_logger();
    Client::builder()
        .base_url(BASE)
        .min_interval(interval)
        .transport(script.clone())
        .build()
        .unwrap()
}

pub fn post(id: &str) -> Value {
    json!({"kind": "t3", "data": {
        "id": id,
        "subreddit": "pics",
        "created_utc": 1_400_000_000.0,
        "author": "op",
        "ups": 10,
        "downs": 1,
        "over_18": false,
        "url": "http://i.imgur.com/abc.jpg",
        "selftext": "",
        "is_self": false,
        "title": "a picture",
    }})
}

pub fn comment(id: &str) -> Value {
    comment_with_replies(id, json!(""))
}

pub fn comment_with_replies(id: &str, replies: Value) -> Value {
    json!({"kind": "t1", "data": {
        "id": id,
        "subreddit": "pics",
        "created_utc": 1_400_000_100,
        "author": "someone",
        "ups": 2,
        "downs": 0,
        "body": "look http://a.com/x",
        "link_id": "t3_p00001",
        "replies": replies,
    }})
}

pub fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
    json!({"kind": "Listing", "data": {
        "children": children,
        "after": after,
        "before": null,
    }})
}
