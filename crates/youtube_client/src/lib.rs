//! YouTube Data API v3 client for listing comment threads.
//!
//! With an API key configured the fetcher issues a single
//! `commentThreads.list` request; without one it serves a fixed
//! placeholder comment so the rest of the stack keeps working.

use chrono::{SecondsFormat, TimeZone, Utc};
use domain::Comment;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// YouTube Data API v3 base URL
const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Upstream page-size limit for `commentThreads.list`.
const MAX_PAGE_SIZE: u32 = 100;

/// Failure while listing comments. Every upstream problem (transport
/// error, rejected video ID, quota, undecodable body) collapses into this
/// one condition carrying the upstream text.
#[derive(Error, Debug)]
#[error("Error fetching comments: {0}")]
pub struct FetchError(pub String);

/// `commentThreads.list` response body.
#[derive(Debug, Deserialize)]
struct CommentThreadListResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    error: Option<ApiError>,
}

/// Error object embedded in an API response body
#[derive(Debug, Deserialize)]
struct ApiError {
    code: u16,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

/// Thread-level snippet: the top-level comment plus aggregate metadata
/// about its replies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
    total_reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: String,
    text_display: String,
    like_count: u64,
    published_at: String,
}

/// Comment fetcher over the YouTube Data API v3.
pub struct CommentFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl CommentFetcher {
    /// Create a fetcher. `None` selects the placeholder mode.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Whether a real API key is configured.
    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch one page of comment threads for `video_id`, ordered by
    /// relevance. The page size is capped at the upstream limit of 100;
    /// no further pages are requested even when more comments exist.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<Comment>, FetchError> {
        let max_results = max_results.min(MAX_PAGE_SIZE);

        let Some(key) = &self.api_key else {
            debug!("no API key configured, serving placeholder comment");
            return Ok(vec![placeholder_comment()]);
        };

        debug!(video_id, max_results, "requesting comment threads");

        let page_size = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/commentThreads", YOUTUBE_API_BASE))
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", page_size.as_str()),
                ("order", "relevance"),
                ("textFormat", "plainText"),
                ("key", key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError(e.to_string()))?;

        let status = response.status();
        let body: CommentThreadListResponse = response
            .json()
            .await
            .map_err(|e| FetchError(e.to_string()))?;

        if let Some(error) = body.error {
            warn!(code = error.code, "comment listing rejected upstream");
            return Err(FetchError(error.message));
        }
        if !status.is_success() {
            return Err(FetchError(format!("API returned status {}", status)));
        }

        Ok(comments_from_threads(body.items))
    }
}

/// Flatten thread items into the output shape. The reply count lives on
/// the thread snippet, not on the top-level comment snippet.
fn comments_from_threads(items: Vec<CommentThread>) -> Vec<Comment> {
    items
        .into_iter()
        .map(|item| {
            let comment = item.snippet.top_level_comment.snippet;
            Comment {
                author: comment.author_display_name,
                text: comment.text_display,
                likes: comment.like_count,
                published_at: comment.published_at,
                reply_count: item.snippet.total_reply_count,
            }
        })
        .collect()
}

/// The fixed comment served when no API key is configured.
fn placeholder_comment() -> Comment {
    let fixed_time = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("Fixed datetime should be valid");

    Comment {
        author: "Demo User".to_string(),
        text: "This is a demo comment. Set YOUTUBE_API_KEY environment variable to fetch real comments."
            .to_string(),
        likes: 0,
        published_at: fixed_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        reply_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_placeholder_without_api_key() {
        let fetcher = CommentFetcher::new(None);
        let comments = fetcher.fetch_comments("dQw4w9WgXcQ", 50).await.unwrap();

        assert_eq!(comments.len(), 1);
        let comment = &comments[0];
        assert_eq!(comment.author, "Demo User");
        assert_eq!(comment.likes, 0);
        assert_eq!(comment.reply_count, 0);
        assert_eq!(comment.published_at, "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn placeholder_ignores_requested_page_size() {
        let fetcher = CommentFetcher::new(None);

        let one = fetcher.fetch_comments("dQw4w9WgXcQ", 1).await.unwrap();
        let over_the_cap = fetcher.fetch_comments("dQw4w9WgXcQ", 250).await.unwrap();

        assert_eq!(one.len(), 1);
        assert_eq!(over_the_cap.len(), 1);
    }

    #[test]
    fn reports_whether_a_key_is_configured() {
        assert!(!CommentFetcher::new(None).api_key_configured());
        assert!(CommentFetcher::new(Some("AIzaSyTest123".to_string())).api_key_configured());
    }

    #[test]
    fn maps_reply_count_from_the_thread_snippet() {
        let body: CommentThreadListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#commentThreadListResponse",
                "items": [
                    {
                        "id": "thread-1",
                        "snippet": {
                            "topLevelComment": {
                                "snippet": {
                                    "authorDisplayName": "Alice",
                                    "textDisplay": "Great video!",
                                    "likeCount": 7,
                                    "publishedAt": "2023-05-01T12:00:00Z"
                                }
                            },
                            "totalReplyCount": 3
                        }
                    },
                    {
                        "id": "thread-2",
                        "snippet": {
                            "topLevelComment": {
                                "snippet": {
                                    "authorDisplayName": "Bob",
                                    "textDisplay": "First!",
                                    "likeCount": 0,
                                    "publishedAt": "2023-05-01T11:00:00Z"
                                }
                            },
                            "totalReplyCount": 0
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert!(body.error.is_none());
        let comments = comments_from_threads(body.items);

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author, "Alice");
        assert_eq!(comments[0].text, "Great video!");
        assert_eq!(comments[0].likes, 7);
        assert_eq!(comments[0].published_at, "2023-05-01T12:00:00Z");
        assert_eq!(comments[0].reply_count, 3);
        assert_eq!(comments[1].reply_count, 0);
    }

    #[test]
    fn decodes_an_error_body() {
        let body: CommentThreadListResponse = serde_json::from_str(
            r#"{
                "error": {
                    "code": 403,
                    "message": "The request cannot be completed because you have exceeded your quota."
                }
            }"#,
        )
        .unwrap();

        assert!(body.items.is_empty());
        let error = body.error.unwrap();
        assert_eq!(error.code, 403);
        assert!(error.message.contains("quota"));
    }
}
