use serde::{Deserialize, Serialize};

/// Length of a YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// A normalized comment. Author, text and the like counter come from the
/// thread's top-level comment; `reply_count` is the thread-wide total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub likes: u64,
    pub published_at: String,
    pub reply_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_documented_field_names() {
        let comment = Comment {
            author: "Alice".to_string(),
            text: "Great video!".to_string(),
            likes: 7,
            published_at: "2023-05-01T12:00:00Z".to_string(),
            reply_count: 3,
        };

        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "author": "Alice",
                "text": "Great video!",
                "likes": 7,
                "published_at": "2023-05-01T12:00:00Z",
                "reply_count": 3,
            })
        );
    }
}
