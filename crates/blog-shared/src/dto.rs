//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// Omitted fields arrive as empty strings, and on update an empty field
/// leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPayload {
    pub id: String,
    pub title: String,
    #[serde(alias = "date")]
    pub timestamp: String,
    pub link: String,
    pub comment: String,
}

/// A stored post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub link: String,
    pub comment: String,
}

/// Outcome of a write that has nothing else to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}
