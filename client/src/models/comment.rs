use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment under a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, alias = "Id", alias = "_id")]
    pub id: Option<String>,
    #[serde(default, alias = "Post_id")]
    pub post_id: String,
    #[serde(default, alias = "Text")]
    pub text: String,
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Up_votes")]
    pub up_votes: i64,
    #[serde(default, alias = "Down_votes")]
    pub down_votes: i64,
    #[serde(default, alias = "Edited")]
    pub edited: bool,
    #[serde(default, alias = "Creation_date")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn score(&self) -> i64 {
        self.up_votes - self.down_votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_backend_field_names() {
        let comment: Comment = serde_json::from_value(json!({
            "Id": "c1",
            "Post_id": "p1",
            "Text": "Nice",
            "Username": "bob",
            "Up_votes": 1,
            "Edited": true
        }))
        .expect("valid comment");

        assert_eq!(comment.id.as_deref(), Some("c1"));
        assert_eq!(comment.post_id, "p1");
        assert_eq!(comment.score(), 1);
        assert!(comment.edited);
    }
}
