use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("archive error: {0}")]
    Archive(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A source of full-work text, keyed by the catalog URL.
///
/// Implementations own the transport details (network, archive format,
/// character encoding). Callers get back decoded, raw text: header, footer
/// and markup still present. Cleaning is a separate, pure step.
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Success body for `GET /api/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageBody {
    pub text: String,
}

/// Error body for `GET /api/text` with an unknown catalog key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn unknown_book(key: &str) -> Self {
        Self {
            error: format!("Book with key '{key}' not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_book_body_matches_api_contract() {
        let body = ErrorBody::unknown_book("unknown");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Book with key 'unknown' not found"}"#);
    }

    #[test]
    fn passage_body_serializes_under_text_key() {
        let body = PassageBody {
            text: "吾輩は猫である。".to_string(),
        };
        let v: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(v.get("text").and_then(|t| t.as_str()), Some("吾輩は猫である。"));
    }
}
