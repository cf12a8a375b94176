#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # redownr
//!
//! redownr is a client for a link aggregator's JSON listing API.
//!
//! This library can fetch:
//! - a user's full [`History`] of posts and comments, page by page
//! - a [`Thread`] with its comment tree
//! - [`User`] account information
//!
//! and, after [`Client::login`], manage the friend list.
//!
//! While respecting:
//! - 2 seconds between any two requests.
//!
//! Responses come back in two shapes, thread views and flat listings; both
//! are normalized into [`Entity`] values (a [`Post`] or a [`Comment`]) whose
//! text is reduced to ASCII and whose ids are zero-padded to a fixed width.
//!
//! ## Example: Fetching what a user posted since the last run.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use redownr::history::History;
//! use redownr::links::extract_links;
//! use redownr::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new()?;
//!     let history = History::new(&client, "spez", Some("2st9x1"), Some(5)).await?;
//!
//!     for entity in history.iter() {
//!         if let Some(text) = entity.as_comment().map(|c| c.body()) {
//!             println!("{}: {:?}", entity.permalink(), extract_links(text));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`History`]: crate::models::history::History
//! [`Thread`]:  crate::models::thread::Thread
//! [`User`]:    crate::models::user::User
//! [`Entity`]:  crate::models::entity::Entity
//! [`Post`]:    crate::models::entity::Post
//! [`Comment`]: crate::models::entity::Comment

/// Client module contains [`Client`] for sending rate-limited requests.
pub mod client;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub(crate) mod models;

pub(crate) mod result;

pub(crate) mod transport;

pub use client::Client;
pub use models::*;
