//! Wire type for one row of the remote `links` table.

use serde::{Deserialize, Deserializer, Serialize};

/// A saved link. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    #[serde(rename = "notion_timestamp")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl LinkRecord {
    pub fn new(
        url: impl Into<String>,
        timestamp: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            timestamp: timestamp.into(),
            title: title.into(),
        }
    }
}
