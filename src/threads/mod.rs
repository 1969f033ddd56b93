pub mod filter;
pub mod pagination;

use log::{debug, info, warn};

use crate::{
    api::BoardApi,
    board::Thread,
    error::BoardError,
    validate::validate_content,
};
use filter::{apply_filters, ThreadQuery};
use pagination::{PageMarker, PaginationWindow, DEFAULT_PAGE_SIZE};

/// All threads of the board, fetched once, then searched, sorted and paged
/// in memory.
#[derive(Debug, Clone)]
pub struct ThreadCollection {
    threads: Vec<Thread>,
    loading: bool,
    error: Option<BoardError>,
    query: ThreadQuery,
    page: usize,
    page_size: usize,
}

impl Default for ThreadCollection {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ThreadCollection {
    pub fn new(page_size: usize) -> Self {
        Self {
            threads: vec![],
            loading: false,
            error: None,
            query: ThreadQuery::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Fetch the thread list, replacing whatever was loaded before.
    pub async fn load(&mut self, api: &impl BoardApi) -> Result<usize, BoardError> {
        self.loading = true;
        self.error = None;

        let result = api.list_threads().await;
        self.loading = false;

        match result {
            Ok(threads) => {
                debug!("loaded {} threads", threads.len());
                self.threads = threads;
                self.page = 1;
                Ok(self.threads.len())
            }
            Err(e) => {
                warn!("failed to load threads: {}", e);
                self.threads.clear();
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
    pub fn error(&self) -> Option<&BoardError> {
        self.error.as_ref()
    }
    /// Replace the search/filter/sort inputs. Going back to page 1 happens
    /// only when something actually changed.
    pub fn set_query(&mut self, query: ThreadQuery) {
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Jump to `page`. Pages outside the current window are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if !self.window().contains(page) {
            debug!("ignoring out of range page {}", page);
            return false;
        }
        self.page = page;
        true
    }

    /// Threads matching the current query, in display order.
    pub fn filtered(&self) -> Vec<&Thread> {
        apply_filters(&self.threads, &self.query)
    }

    fn window_of(&self, count: usize) -> PaginationWindow {
        PaginationWindow::new(count, self.page_size, self.page)
    }

    pub fn window(&self) -> PaginationWindow {
        self.window_of(self.filtered().len())
    }

    /// The current page of [`Self::filtered`] with its window, filtered once.
    pub fn current_page(&self) -> ThreadPage<'_> {
        let filtered = self.filtered();
        let matching = filtered.len();
        let window = self.window_of(matching);
        let threads = filtered[window.range(matching)].to_vec();
        ThreadPage {
            threads,
            window,
            matching,
        }
    }

    pub fn visible(&self) -> Vec<&Thread> {
        self.current_page().threads
    }
}

/// One rendered page of the thread list.
#[derive(Debug, Clone)]
pub struct ThreadPage<'a> {
    pub threads: Vec<&'a Thread>,
    pub window: PaginationWindow,
    /// Threads matching the query across all pages.
    pub matching: usize,
}

/// Create a thread after checking its title locally.
pub async fn create_thread(api: &impl BoardApi, title: &str) -> Result<Thread, BoardError> {
    validate_content(title)?;
    let thread = api.create_thread(title).await?;
    debug!("created thread {}", thread.id);
    Ok(thread)
}

/// Log the visible page of `threads` as a table.
pub fn display_threads(threads: &ThreadCollection) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }

    let page = threads.current_page();
    info!("{} threads, {} matching", threads.threads().len(), page.matching);

    let visible = &page.threads;
    if visible.is_empty() {
        info!("No threads");
        return;
    }

    let mut id_width = 4_usize;
    for thread in visible.iter() {
        id_width = thread.id.len().max(id_width);
    }

    info!("+-{:-<id_width$}-+-{}------- - -", " Id ", " Title ");
    for thread in visible.iter() {
        info!("| {:id_width$} | {}", thread.id, thread.title);
    }
    info!("+-{}-+------------ - -", "-".repeat(id_width));

    let window = page.window;
    let markers: Vec<String> = window
        .markers()
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if page == window.current_page => format!("[{}]", page),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect();
    info!("{}  ({} / {})", markers.join(" "), window.current_page, window.last_page());
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::{filter::SortOrder, *};
    use crate::board::{ErrorResponse, Post, ThreadPosts};

    struct FakeBoard {
        threads: Mutex<Result<Vec<Thread>, BoardError>>,
        created: AtomicUsize,
    }

    impl FakeBoard {
        fn with(result: Result<Vec<Thread>, BoardError>) -> Self {
            Self {
                threads: Mutex::new(result),
                created: AtomicUsize::new(0),
            }
        }
    }

    impl BoardApi for FakeBoard {
        async fn list_threads(&self) -> Result<Vec<Thread>, BoardError> {
            self.threads.lock().unwrap().clone()
        }
        async fn create_thread(&self, title: &str) -> Result<Thread, BoardError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Thread::new("new", title))
        }
        async fn list_posts(&self, thread_id: &str, _: usize) -> Result<ThreadPosts, BoardError> {
            Ok(ThreadPosts {
                thread_id: thread_id.to_string(),
                posts: vec![],
            })
        }
        async fn create_post(&self, _: &str, text: &str) -> Result<Post, BoardError> {
            Ok(Post {
                id: "p".to_string(),
                post: text.to_string(),
            })
        }
    }

    fn numbered(count: usize) -> Vec<Thread> {
        (0..count)
            .map(|i| {
                let mut thread = Thread::new(format!("t{}", i), format!("Thread {}", i));
                thread.likes = Some(i as u32);
                thread
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_board_is_not_an_error() {
        let api = FakeBoard::with(Ok(vec![]));
        let mut threads = ThreadCollection::default();

        assert_eq!(threads.load(&api).await, Ok(0));
        assert!(threads.error().is_none());
        assert!(!threads.is_loading());
        assert!(threads.visible().is_empty());
        assert_eq!(threads.window().current_page, 1);
    }

    #[tokio::test]
    async fn failed_load_keeps_structured_error() {
        let server_error = ErrorResponse {
            code: 500,
            message_jp: "サーバーエラー".to_string(),
            message_en: "Server error".to_string(),
        };
        let api = FakeBoard::with(Err(BoardError::Api(server_error.clone())));
        let mut threads = ThreadCollection::default();

        assert!(threads.load(&api).await.is_err());
        assert!(!threads.is_loading());
        assert!(threads.threads().is_empty());
        assert_eq!(threads.error(), Some(&BoardError::Api(server_error)));
        assert_eq!(threads.error().unwrap().to_string(), "サーバーエラー (500)");
    }

    #[tokio::test]
    async fn pages_slice_filtered_list() {
        let api = FakeBoard::with(Ok(numbered(12)));
        let mut threads = ThreadCollection::new(5);
        threads.load(&api).await.unwrap();

        assert_eq!(threads.window().total_pages, 3);
        assert!(threads.set_page(3));
        let page = threads.current_page();
        assert_eq!(page.threads.len(), 2);
        assert_eq!(page.matching, 12);
        assert_eq!(page.window, threads.window());
        assert_eq!(threads.visible().len(), 2);

        assert!(!threads.set_page(0));
        assert!(!threads.set_page(4));
        assert_eq!(threads.window().current_page, 3);
    }

    #[tokio::test]
    async fn changing_query_resets_page() {
        let api = FakeBoard::with(Ok(numbered(12)));
        let mut threads = ThreadCollection::new(5);
        threads.load(&api).await.unwrap();
        threads.set_page(2);

        // same inputs leave the page alone
        threads.set_query(ThreadQuery::default());
        assert_eq!(threads.window().current_page, 2);

        threads.set_query(ThreadQuery {
            sort: SortOrder::Likes,
            ..Default::default()
        });
        assert_eq!(threads.window().current_page, 1);
        assert_eq!(threads.visible()[0].id, "t11");
    }

    #[tokio::test]
    async fn blank_title_never_reaches_board() {
        let api = FakeBoard::with(Ok(vec![]));

        let result = create_thread(&api, "  ").await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert_eq!(api.created.load(Ordering::SeqCst), 0);

        let thread = create_thread(&api, "Hello").await.unwrap();
        assert_eq!(thread.title, "Hello");
        assert_eq!(api.created.load(Ordering::SeqCst), 1);
    }
}
