pub mod locale;

use std::collections::BTreeSet;

use clap::{arg, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;

use crate::threads::{
    filter::{CategoryFilter, SortOrder, ThreadQuery},
    pagination::DEFAULT_PAGE_SIZE,
};
use locale::Locale;

pub const DEFAULT_BASE_URL: &str = "https://railway.bulletinboard.techtrain.dev";

#[derive(Debug, Clone, Parser)]
#[command(name = "bulletin-board", about = "Browse and post to a REST bulletin board")]
pub struct Config {
    /// Base URL of the board API
    #[arg(long, env = "BOARD_URL", default_value = DEFAULT_BASE_URL)]
    url: String,
    /// Language of error messages
    #[arg(long, env = "BOARD_LANG", default_value = "ja")]
    lang: Locale,
    /// Retry transient failures this many times
    #[arg(long, default_value = "0")]
    retries: u32,
    #[command(subcommand)]
    pub command: Command,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List threads
    List {
        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        query: String,
        /// Category name, or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// Only threads carrying one of these tags
        #[arg(short, long = "tag", num_args = 0..)]
        tags: Vec<String>,
        /// Sort order
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,
        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Threads per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Create a thread
    New {
        title: String,
    },
    /// Show the posts of a thread
    Show {
        thread_id: String,
        /// Number of pages of posts to load
        #[arg(long, default_value = "1")]
        pages: usize,
    },
    /// Submit a post to a thread
    Post {
        thread_id: String,
        text: String,
    },
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
    pub const fn locale(&self) -> Locale {
        self.lang
    }
    pub const fn retries(&self) -> u32 {
        self.retries
    }
}

impl Command {
    /// Build the thread query a `list` invocation asks for.
    pub fn thread_query(&self) -> Option<ThreadQuery> {
        match self {
            Self::List {
                query,
                category,
                tags,
                sort,
                ..
            } => Some(ThreadQuery {
                query: query.clone(),
                category: category.clone(),
                tags: tags.iter().cloned().collect::<BTreeSet<_>>(),
                sort: *sort,
            }),
            _ => None,
        }
    }
}
