//! Example demonstrating an incremental fetch of a user's history
//!
//! This example shows:
//! - Creating a redownr client
//! - Walking a user's listing pages until a previously seen id
//! - Pulling the links out of comments and self-posts

use redownr::entity::Entity;
use redownr::history::History;
use redownr::links::extract_links;
use redownr::Client;

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // This is just for seeing the logs.
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let mut args = std::env::args().skip(1);
    let user = args.next().unwrap_or_else(|| String::from("spez"));
    let since = args.next();

    let client = Client::new()?;

    // At most 3 pages, stopping early at `since` if it was given
    let history = History::new(&client, &user, since.as_deref(), Some(3)).await?;
    println!("{} entities over {} pages", history.len(), history.pages());

    for entity in history.iter() {
        let text = match entity {
            Entity::Post(post) => post.selftext().unwrap_or_else(|| post.url()),
            Entity::Comment(comment) => comment.body(),
        };
        println!("{} ({})", entity.permalink(), entity.common().created_utc());
        for link in extract_links(text) {
            println!("    {link}");
        }
    }

    Ok(())
}
