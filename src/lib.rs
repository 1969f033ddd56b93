//! Client for a REST bulletin board: thread listing with in-memory search,
//! filtering and paging, and page-by-page post feeds with submission.

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod feed;
pub mod threads;
pub mod utils;
pub mod validate;

pub use api::{BoardApi, BoardClient};
pub use error::{BoardError, ValidationError};
pub use feed::PostFeed;
pub use threads::ThreadCollection;
