use serde_json::json;

use crate::{
    board::{Post, Thread, ThreadPosts},
    config::Config,
    error::BoardError,
};

use super::{BoardApi, HttpClient};

/// [`BoardApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct BoardClient {
    inner: HttpClient,
    base_url: String,
}

impl BoardClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.base_url(), config.retries())
    }

    pub fn with_base_url(base_url: &str, retries: u32) -> Self {
        Self {
            inner: HttpClient::new(retries),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn threads_url(&self) -> String {
        format!("{}/threads", self.base_url)
    }

    fn posts_url(&self, thread_id: &str) -> String {
        format!(
            "{}/threads/{}/posts",
            self.base_url,
            urlencoding::encode(thread_id)
        )
    }

    /// Posts URL for a page; `offset` is left out entirely when zero.
    pub fn posts_page_url(&self, thread_id: &str, offset: usize) -> String {
        let url = self.posts_url(thread_id);
        if offset > 0 {
            format!("{}?offset={}", url, offset)
        } else {
            url
        }
    }
}

impl BoardApi for BoardClient {
    async fn list_threads(&self) -> Result<Vec<Thread>, BoardError> {
        let url = self.threads_url();
        let label = format!("GET {}", url);
        self.inner.send_json(&label, self.inner.get(&url)).await
    }

    async fn create_thread(&self, title: &str) -> Result<Thread, BoardError> {
        let url = self.threads_url();
        let label = format!("POST {}", url);
        let request = self.inner.post(&url).json(&json!({ "title": title }));
        self.inner.send_json(&label, request).await
    }

    async fn list_posts(&self, thread_id: &str, offset: usize) -> Result<ThreadPosts, BoardError> {
        let url = self.posts_page_url(thread_id, offset);
        let label = format!("GET {}", url);
        self.inner.send_json(&label, self.inner.get(&url)).await
    }

    async fn create_post(&self, thread_id: &str, text: &str) -> Result<Post, BoardError> {
        let url = self.posts_url(thread_id);
        let label = format!("POST {}", url);
        let request = self.inner.post(&url).json(&json!({ "post": text }));
        self.inner.send_json(&label, request).await
    }
}
