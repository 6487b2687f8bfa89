//! Puzzle input download for Advent of Code
//!
//! A small blocking client that knows two endpoints of the puzzle site:
//!
//! - `GET /{year}/day/{day}/input` for a user's personal puzzle input
//! - `GET /settings` to check that a session cookie is still valid and to
//!   learn which user it belongs to (inputs differ per user, so callers key
//!   their caches by that id)
//!
//! TLS goes through rustls and redirects are never followed.
//!
//! # Example
//!
//! ```no_run
//! use aoc_fetch::PuzzleClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PuzzleClient::new()?;
//! let session = std::env::var("AOC_SESSION")?;
//!
//! if let Some(user_id) = client.verify_session(&session)?.user_id {
//!     println!("Logged in as user #{user_id}");
//! }
//!
//! let input = client.fetch_input(2020, 1, &session)?;
//! println!("{} lines", input.lines().count());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{PuzzleClient, PuzzleClientBuilder, SessionInfo};
pub use error::FetchError;
