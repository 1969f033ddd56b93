use log::debug;

use crate::{
    board::{ErrorResponse, Post},
    error::BoardError,
};

/// Posts requested per page.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    LoadingMore,
    /// Sticks until the thread changes or the feed is refreshed.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// A page request handed out by [`FeedState`]. Its result is only applied
/// while the ticket's generation is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    thread_id: String,
    offset: usize,
    mode: FetchMode,
}

impl FetchTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
    pub const fn offset(&self) -> usize {
        self.offset
    }
    pub const fn mode(&self) -> FetchMode {
        self.mode
    }
}

/// Posts of one thread accumulated page by page.
#[derive(Debug, Clone)]
pub struct FeedState {
    thread_id: Option<String>,
    posts: Vec<Post>,
    offset: usize,
    has_more: bool,
    phase: FeedPhase,
    error: Option<ErrorResponse>,
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            thread_id: None,
            posts: vec![],
            offset: 0,
            has_more: true,
            phase: FeedPhase::Idle,
            error: None,
            generation: 0,
        }
    }
}

impl FeedState {
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
    pub const fn offset(&self) -> usize {
        self.offset
    }
    pub const fn has_more(&self) -> bool {
        self.has_more
    }
    pub const fn phase(&self) -> FeedPhase {
        self.phase
    }
    pub fn error(&self) -> Option<&ErrorResponse> {
        self.error.as_ref()
    }
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::Loading | FeedPhase::LoadingMore)
    }

    fn ticket(&mut self, thread_id: String, offset: usize, mode: FetchMode) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            thread_id,
            offset,
            mode,
        }
    }

    /// Switch to `thread_id` and start over from its first page.
    pub fn begin_initialize(&mut self, thread_id: &str) -> FetchTicket {
        debug!("feed: initialize {}", thread_id);
        self.thread_id = Some(thread_id.to_string());
        self.posts.clear();
        self.offset = 0;
        self.has_more = true;
        self.error = None;
        self.phase = FeedPhase::Loading;
        self.ticket(thread_id.to_string(), 0, FetchMode::Replace)
    }

    /// Next page, or `None` while loading, after the last page, or in the
    /// error state.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.phase != FeedPhase::Ready || !self.has_more {
            return None;
        }
        let thread_id = self.thread_id.clone()?;
        let offset = self.offset + PAGE_SIZE;
        debug!("feed: load more {} at {}", thread_id, offset);
        self.phase = FeedPhase::LoadingMore;
        Some(self.ticket(thread_id, offset, FetchMode::Append))
    }

    /// First page again; the current posts stay until it arrives.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        let thread_id = self.thread_id.clone()?;
        debug!("feed: refresh {}", thread_id);
        self.error = None;
        self.phase = FeedPhase::Loading;
        Some(self.ticket(thread_id, 0, FetchMode::Replace))
    }

    /// Apply the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the result dropped.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Vec<Post>, BoardError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "feed: dropping stale page for {} (generation {} != {})",
                ticket.thread_id, ticket.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.has_more = page.len() == PAGE_SIZE;
                match ticket.mode {
                    FetchMode::Replace => self.posts = page,
                    FetchMode::Append => self.posts.extend(page),
                }
                self.offset = ticket.offset;
                self.error = None;
                self.phase = FeedPhase::Ready;
            }
            Err(e) => {
                self.error = Some(e.to_response());
                self.phase = FeedPhase::Error;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(prefix: &str, count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| Post {
                id: format!("{}{}", prefix, i),
                post: format!("post {}", i),
            })
            .collect()
    }

    #[test]
    fn starts_idle_with_nothing_to_load() {
        let mut state = FeedState::default();
        assert_eq!(state.phase(), FeedPhase::Idle);
        assert!(state.has_more());
        assert!(state.begin_load_more().is_none());
        assert!(state.begin_refresh().is_none());
    }

    #[test]
    fn short_page_ends_the_feed() {
        let mut state = FeedState::default();
        let ticket = state.begin_initialize("t");
        assert!(state.is_loading());
        assert!(state.complete(&ticket, Ok(page("a", 10))));
        assert!(state.has_more());

        let ticket = state.begin_load_more().unwrap();
        assert_eq!(ticket.offset(), 10);
        assert_eq!(ticket.mode(), FetchMode::Append);
        assert_eq!(state.phase(), FeedPhase::LoadingMore);
        // no overlapping page requests
        assert!(state.begin_load_more().is_none());

        assert!(state.complete(&ticket, Ok(page("b", 3))));
        assert!(!state.has_more());
        assert_eq!(state.posts().len(), 13);
        assert_eq!(state.posts()[10].id, "b0");
        assert_eq!(state.offset(), 10);
        assert!(state.begin_load_more().is_none());
    }

    #[test]
    fn late_response_for_previous_thread_is_dropped() {
        let mut state = FeedState::default();
        let for_a = state.begin_initialize("A");
        let for_b = state.begin_initialize("B");

        assert!(!state.complete(&for_a, Ok(page("a", 10))));
        assert!(state.posts().is_empty());
        assert!(state.is_loading());

        assert!(state.complete(&for_b, Ok(page("b", 4))));
        assert_eq!(state.thread_id(), Some("B"));
        assert!(state.posts().iter().all(|p| p.id.starts_with('b')));
    }

    #[test]
    fn load_more_superseded_by_thread_switch() {
        let mut state = FeedState::default();
        let first = state.begin_initialize("A");
        state.complete(&first, Ok(page("a", 10)));
        let more = state.begin_load_more().unwrap();

        let switched = state.begin_initialize("B");
        assert!(!state.complete(&more, Ok(page("a", 10))));
        assert!(state.complete(&switched, Ok(page("b", 2))));
        assert_eq!(state.posts().len(), 2);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn failure_is_terminal_until_refresh() {
        let mut state = FeedState::default();
        let ticket = state.begin_initialize("t");
        state.complete(&ticket, Err(BoardError::Network("reset".to_string())));

        assert_eq!(state.phase(), FeedPhase::Error);
        assert_eq!(state.error(), Some(&ErrorResponse::unexpected()));
        assert!(state.begin_load_more().is_none());

        let ticket = state.begin_refresh().unwrap();
        assert!(state.error().is_none());
        assert!(state.complete(&ticket, Ok(page("a", 10))));
        assert_eq!(state.phase(), FeedPhase::Ready);
    }

    #[test]
    fn failed_load_more_keeps_offset() {
        let mut state = FeedState::default();
        let ticket = state.begin_initialize("t");
        state.complete(&ticket, Ok(page("a", 10)));
        let ticket = state.begin_load_more().unwrap();
        state.complete(&ticket, Err(BoardError::Decode("eof".to_string())));

        assert_eq!(state.offset(), 0);
        assert_eq!(state.posts().len(), 10);
        assert_eq!(state.phase(), FeedPhase::Error);
    }
}
