pub mod comment;
pub mod post;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::locale::Locale;

pub use comment::Comment;
pub use post::{Post, ThreadPosts};

/// One discussion topic as returned by `GET /threads`.
///
/// Only `id` and `title` are guaranteed; the remaining fields are present
/// when the server supplies them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Thread {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            tags: vec![],
            created_at: None,
            likes: None,
            comments: vec![],
            image_url: None,
        }
    }

    /// Creation time, epoch zero when missing or unparseable.
    pub fn created(&self) -> DateTime<Utc> {
        parse_timestamp(self.created_at.as_deref())
    }
    pub fn likes(&self) -> u32 {
        self.likes.unwrap_or_default()
    }
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Error body the board returns alongside a non-success status.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorResponse {
    #[serde(rename = "ErrorCode")]
    pub code: u16,
    #[serde(rename = "ErrorMessageJP")]
    pub message_jp: String,
    #[serde(rename = "ErrorMessageEN")]
    pub message_en: String,
}

impl ErrorResponse {
    pub const FALLBACK_CODE: u16 = 500;

    /// Stand-in used whenever a failure carries no structured body.
    pub fn unexpected() -> Self {
        Self {
            code: Self::FALLBACK_CODE,
            message_jp: "予期せぬエラーが発生しました。".to_string(),
            message_en: "Unexpected error occurred.".to_string(),
        }
    }

    pub fn message(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ja => &self.message_jp,
            Locale::En => &self.message_en,
        }
    }
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_timestamp(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.to_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_thread_deserializes() {
        let thread: Thread =
            serde_json::from_str(r#"{"id":"a1","title":"Hello"}"#).unwrap();
        assert_eq!(thread, Thread::new("a1", "Hello"));
        assert_eq!(thread.likes(), 0);
        assert_eq!(thread.comment_count(), 0);
        assert_eq!(thread.created(), DateTime::<Utc>::default());
    }

    #[test]
    fn null_lists_count_as_empty() {
        let thread: Thread = serde_json::from_str(
            r#"{"id":"a","title":"t","tags":null,"comments":null,"likes":null}"#,
        )
        .unwrap();
        assert_eq!(thread, Thread::new("a", "t"));

        let page: ThreadPosts =
            serde_json::from_str(r#"{"threadId":"a","posts":null}"#).unwrap();
        assert!(page.posts.is_empty());
    }

    #[test]
    fn enriched_thread_deserializes() {
        let thread: Thread = serde_json::from_str(
            r#"{
                "id": "a2",
                "title": "Rust",
                "category": "programming",
                "tags": ["React", "TypeScript"],
                "createdAt": "2024-05-01T12:00:00Z",
                "likes": 7,
                "comments": [{"id": "c1", "content": "nice", "createdAt": "2024-05-02T00:00:00Z", "likes": 1}],
                "imageUrl": "https://example.com/a.png"
            }"#,
        )
        .unwrap();

        assert_eq!(thread.category.as_deref(), Some("programming"));
        assert!(thread.has_tag("React"));
        assert!(!thread.has_tag("Go"));
        assert_eq!(thread.likes(), 7);
        assert_eq!(thread.comment_count(), 1);
        assert_eq!(thread.created().to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn garbage_timestamp_is_epoch() {
        let mut thread = Thread::new("a3", "x");
        thread.created_at = Some("yesterday".to_string());
        assert_eq!(thread.created(), DateTime::<Utc>::default());
    }

    #[test]
    fn error_response_uses_wire_names() {
        let error: ErrorResponse = serde_json::from_str(
            r#"{"ErrorCode":404,"ErrorMessageJP":"見つかりません","ErrorMessageEN":"Not found"}"#,
        )
        .unwrap();
        assert_eq!(error.code, 404);
        assert_eq!(error.message(Locale::Ja), "見つかりません");
        assert_eq!(error.message(Locale::En), "Not found");
    }
}
