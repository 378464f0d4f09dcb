use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as read back from the backend.
///
/// The backend serialises its records with capitalised field names, so each
/// field also accepts that spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, alias = "Post_id", alias = "_id")]
    pub post_id: Option<String>,
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Text", alias = "text")]
    pub body: String,
    #[serde(default, alias = "Community")]
    pub community: String,
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Up_votes")]
    pub up_votes: i64,
    #[serde(default, alias = "Down_votes")]
    pub down_votes: i64,
    #[serde(default, alias = "Comments_count")]
    pub comments_count: i64,
    #[serde(default, alias = "Creation_date")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl Post {
    pub fn score(&self) -> i64 {
        self.up_votes - self.down_votes
    }
}
