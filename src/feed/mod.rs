pub mod state;

use log::{debug, info, warn};

use crate::{
    api::BoardApi,
    board::{ErrorResponse, Post},
    config::locale::Locale,
    error::{BoardError, ValidationError},
    validate::validate_content,
};
use state::{FeedPhase, FeedState, FetchTicket};

const SUBMIT_FAILED: (&str, &str) = ("投稿に失敗しました", "Failed to submit post");

/// Paged posts of one thread, with post submission.
#[derive(Debug)]
pub struct PostFeed<A> {
    api: A,
    state: FeedState,
    locale: Locale,
    submitting: bool,
    submit_error: Option<String>,
}

impl<A: BoardApi> PostFeed<A> {
    pub fn new(api: A, locale: Locale) -> Self {
        Self {
            api,
            state: FeedState::default(),
            locale,
            submitting: false,
            submit_error: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.state.posts()
    }
    pub const fn offset(&self) -> usize {
        self.state.offset()
    }
    pub const fn has_more(&self) -> bool {
        self.state.has_more()
    }
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }
    pub const fn phase(&self) -> FeedPhase {
        self.state.phase()
    }
    pub fn error(&self) -> Option<&ErrorResponse> {
        self.state.error()
    }
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    async fn fetch(&mut self, ticket: FetchTicket) -> Result<(), ErrorResponse> {
        let result = self
            .api
            .list_posts(ticket.thread_id(), ticket.offset())
            .await
            .map(|page| page.posts);
        let failure = result.as_ref().err().map(BoardError::to_response);
        if let Err(e) = &result {
            warn!("failed to load posts of {}: {}", ticket.thread_id(), e);
        }

        self.state.complete(&ticket, result);
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Show `thread_id` from its first page.
    pub async fn initialize(&mut self, thread_id: &str) -> Result<(), ErrorResponse> {
        self.submit_error = None;
        let ticket = self.state.begin_initialize(thread_id);
        self.fetch(ticket).await
    }

    /// Append the next page. `Ok(false)` means nothing was requested.
    pub async fn load_more(&mut self) -> Result<bool, ErrorResponse> {
        let Some(ticket) = self.state.begin_load_more() else {
            debug!("feed: load more skipped ({:?})", self.state.phase());
            return Ok(false);
        };
        self.fetch(ticket).await.map(|_| true)
    }

    /// Reload the first page, replacing everything loaded so far.
    pub async fn refresh(&mut self) -> Result<bool, ErrorResponse> {
        let Some(ticket) = self.state.begin_refresh() else {
            return Ok(false);
        };
        self.fetch(ticket).await.map(|_| true)
    }

    /// Post `text` to the current thread and refresh on success. On failure
    /// the reason is kept in [`Self::submit_error`].
    pub async fn submit(&mut self, text: &str) -> Result<Post, BoardError> {
        self.submit_error = None;

        let thread_id = match validate_content(text) {
            Ok(()) => self.state.thread_id().map(str::to_string),
            Err(e) => return Err(self.reject(e.into())),
        };
        let Some(thread_id) = thread_id else {
            return Err(self.reject(ValidationError::NoThread.into()));
        };

        self.submitting = true;
        let result = self.api.create_post(&thread_id, text).await;
        self.submitting = false;

        match result {
            Ok(post) => {
                info!("posted {} to {}", post.id, thread_id);
                if let Err(e) = self.refresh().await {
                    warn!("refresh after posting failed ({})", e.code);
                }
                Ok(post)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    fn reject(&mut self, error: BoardError) -> BoardError {
        let message = error.localized(self.locale, SUBMIT_FAILED);
        warn!("submission rejected: {}", error);
        self.submit_error = Some(message);
        error
    }
}
