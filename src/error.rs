use thiserror::Error;

use crate::{board::ErrorResponse, config::locale::Locale};

/// Anything that can go wrong talking to the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No response reached us.
    #[error("network: {0}")]
    Network(String),

    /// The board answered with its structured error body.
    #[error("{} ({})", .0.message_jp, .0.code)]
    Api(ErrorResponse),

    /// Non-success status without a recognizable error body.
    #[error("HTTP {status}: {body}")]
    Unexpected { status: u16, body: String },

    #[error("decode: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl BoardError {
    /// The structured error if there is one, otherwise the generic 500.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::Api(response) => response.clone(),
            _ => ErrorResponse::unexpected(),
        }
    }

    /// Message to show the user in `locale`, or `fallback` when the board
    /// gave no structured reason.
    pub fn localized(&self, locale: Locale, fallback: (&str, &str)) -> String {
        match self {
            Self::Api(response) => response.message(locale).to_string(),
            Self::Validation(error) => error.localized(locale),
            _ => locale.pick(fallback.0, fallback.1).to_string(),
        }
    }

    /// Short line for the user. Raw bodies and transport details stay out.
    pub fn summary(&self, locale: Locale) -> String {
        match self {
            Self::Api(response) => format!("{} ({})", response.message(locale), response.code),
            _ => self.localized(locale, GENERIC_ERROR),
        }
    }
}

const GENERIC_ERROR: (&str, &str) = ("エラーが発生しました", "An error occurred");

impl From<reqwest_middleware::Error> for BoardError {
    fn from(error: reqwest_middleware::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<reqwest::Error> for BoardError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

/// Client-side rejection of user text, raised before any request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is empty")]
    Empty,
    #[error("text contains forbidden word `{0}`")]
    Forbidden(String),
    #[error("no thread selected")]
    NoThread,
}

impl ValidationError {
    pub fn localized(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Empty, Locale::Ja) => "テキストを入力してください".to_string(),
            (Self::Empty, Locale::En) => "Please enter some text".to_string(),
            (Self::Forbidden(word), Locale::Ja) => {
                format!("テキストに禁止ワード「{}」が含まれています", word)
            }
            (Self::Forbidden(word), Locale::En) => {
                format!("Text contains the forbidden word \"{}\"", word)
            }
            (Self::NoThread, Locale::Ja) => "スレッドが選択されていません".to_string(),
            (Self::NoThread, Locale::En) => "No thread selected".to_string(),
        }
    }
}
