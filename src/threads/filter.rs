use std::{cmp::Reverse, collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::Thread;

/// Category selection; `all` disables the filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn accepts(&self, thread: &Thread) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => thread.category.as_deref() == Some(category.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::ALL {
            Self::All
        } else {
            Self::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", Self::ALL),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Likes,
    Comments,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
            Self::Likes => write!(f, "likes"),
            Self::Comments => write!(f, "comments"),
        }
    }
}

/// Everything the thread list can be narrowed and ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreadQuery {
    /// Case-insensitive title substring. Empty matches everything.
    pub query: String,
    pub category: CategoryFilter,
    /// A thread matches when it carries at least one of these.
    pub tags: BTreeSet<String>,
    pub sort: SortOrder,
}

impl ThreadQuery {
    pub fn matches(&self, thread: &Thread) -> bool {
        let mut accept = true;

        accept &= self.query.is_empty()
            || thread
                .title
                .to_lowercase()
                .contains(&self.query.to_lowercase());
        accept &= self.category.accepts(thread);
        accept &= self.tags.is_empty() || self.tags.iter().any(|tag| thread.has_tag(tag));

        accept
    }
}

/// Filter then sort `threads`. Equal sort keys keep their input order.
pub fn apply_filters<'a>(threads: &'a [Thread], query: &ThreadQuery) -> Vec<&'a Thread> {
    let mut list: Vec<&Thread> = threads.iter().filter(|t| query.matches(t)).collect();

    // `sort_by_key` is stable
    match query.sort {
        SortOrder::Newest => list.sort_by_key(|t| Reverse(t.created())),
        SortOrder::Oldest => list.sort_by_key(|t| t.created()),
        SortOrder::Likes => list.sort_by_key(|t| Reverse(t.likes())),
        SortOrder::Comments => list.sort_by_key(|t| Reverse(t.comment_count())),
    }

    list
}
