use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One message within a thread.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Post {
    pub id: String,
    pub post: String,
}

/// Body of `GET /threads/{threadId}/posts`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPosts {
    pub thread_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,
}
