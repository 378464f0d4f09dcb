use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community ("subreddit"). The name doubles as its route segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "Creator_name")]
    pub creator_name: String,
    #[serde(default, alias = "Members_count")]
    pub members_count: i64,
    #[serde(default, alias = "Posts_count")]
    pub posts_count: i64,
    #[serde(default, alias = "Creation_date")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl Community {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            creator_name: String::new(),
            members_count: 0,
            posts_count: 0,
            creation_date: None,
        }
    }
}
