use serde::{Deserialize, Serialize};

/// Post entity - a single stored link with a title and a free-text comment.
///
/// Every field is a plain string. The id is assigned by the caller and the
/// timestamp is kept in its formatted `YYYY-MM-DD HH:MM:SS` form. An empty
/// string in an update payload means "leave this field alone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub link: String,
    pub comment: String,
}

impl Post {
    /// Create a post with the given id and title; other fields start empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let post: Post = serde_json::from_str(r#"{"id":"1","title":"A"}"#).unwrap();
        assert_eq!(post, Post::new("1", "A"));
        assert!(post.link.is_empty());
        assert!(post.timestamp.is_empty());
    }
}
