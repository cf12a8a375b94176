//! Example demonstrating how to fetch a thread and print its comment tree
//!
//! Run with `cargo run --example thread --features display -- <permalink>`

use redownr::thread::Thread;
use redownr::tree::CommentTree;
use redownr::Client;

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("https://www.reddit.com/r/rust/comments/2st9x1/"));

    let client = Client::new()?;
    let thread = Thread::new(&client, &url).await?;

    println!("{} -/u/{}", thread.title(), thread.author());
    match thread.selftext() {
        Some(text) => println!("{text}"),
        None => println!("{}", thread.url()),
    }
    print!("{}", CommentTree(thread.comments()));

    Ok(())
}
