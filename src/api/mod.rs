pub mod board;

use std::future::Future;

use log::{debug, log_enabled, trace};
use reqwest::{header, Client};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    board::{ErrorResponse, Post, Thread, ThreadPosts},
    error::BoardError,
};

pub use board::BoardClient;

/// Operations the board exposes. Components only talk to the board through
/// this trait.
pub trait BoardApi {
    fn list_threads(&self) -> impl Future<Output = Result<Vec<Thread>, BoardError>> + Send;

    fn create_thread(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Thread, BoardError>> + Send;

    /// One page of posts starting at `offset`.
    fn list_posts(
        &self,
        thread_id: &str,
        offset: usize,
    ) -> impl Future<Output = Result<ThreadPosts, BoardError>> + Send;

    fn create_post(
        &self,
        thread_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<Post, BoardError>> + Send;
}

impl<T: BoardApi> BoardApi for &T {
    fn list_threads(&self) -> impl Future<Output = Result<Vec<Thread>, BoardError>> + Send {
        (**self).list_threads()
    }

    fn create_thread(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Thread, BoardError>> + Send {
        (**self).create_thread(title)
    }

    fn list_posts(
        &self,
        thread_id: &str,
        offset: usize,
    ) -> impl Future<Output = Result<ThreadPosts, BoardError>> + Send {
        (**self).list_posts(thread_id, offset)
    }

    fn create_post(
        &self,
        thread_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<Post, BoardError>> + Send {
        (**self).create_post(thread_id, text)
    }
}

/// Shared HTTP plumbing: the middleware client and response decoding.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

impl HttpClient {
    pub fn new(retries: u32) -> Self {
        let mut builder = ClientBuilder::new(Client::new());
        if retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        Self {
            client: builder.build(),
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        Self::wrap_request(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        Self::wrap_request(self.client.post(url))
    }

    fn wrap_request(builder: RequestBuilder) -> RequestBuilder {
        const USER_AGENT: &str = concat!("bulletin-board/", env!("CARGO_PKG_VERSION"));
        builder
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
    }

    /// Send `request` and decode a JSON body, turning non-success statuses
    /// into [`BoardError`].
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<T, BoardError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!("{} -> {}", label, status);
        if log_enabled!(log::Level::Trace) {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => trace!(
                    "{}",
                    serde_json::to_string_pretty(&value).unwrap_or_default()
                ),
                Err(_) => trace!("{}", String::from_utf8_lossy(&bytes)),
            }
        }

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(error) => BoardError::Api(error),
                Err(_) => BoardError::Unexpected {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                },
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| BoardError::Decode(e.to_string()))
    }
}
