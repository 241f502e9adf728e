//! Sparse field assignment for partial updates.
//!
//! An update payload has the same shape as a stored [`Post`], but only its
//! non-empty fields are written. Everything else on the stored post is left
//! as it was.

use std::fmt;

use crate::domain::Post;

/// A writable field of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Id,
    Title,
    Timestamp,
    Link,
    Comment,
}

impl PostField {
    /// All fields, in assignment order.
    pub const ALL: [PostField; 5] = [
        PostField::Id,
        PostField::Title,
        PostField::Timestamp,
        PostField::Link,
        PostField::Comment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PostField::Id => "id",
            PostField::Title => "title",
            PostField::Timestamp => "timestamp",
            PostField::Link => "link",
            PostField::Comment => "comment",
        }
    }

    pub fn get(self, post: &Post) -> &str {
        match self {
            PostField::Id => &post.id,
            PostField::Title => &post.title,
            PostField::Timestamp => &post.timestamp,
            PostField::Link => &post.link,
            PostField::Comment => &post.comment,
        }
    }

    fn slot(self, post: &mut Post) -> &mut String {
        match self {
            PostField::Id => &mut post.id,
            PostField::Title => &mut post.title,
            PostField::Timestamp => &mut post.timestamp,
            PostField::Link => &mut post.link,
            PostField::Comment => &mut post.comment,
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered field → value pairs to write onto a stored post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAssignment {
    fields: Vec<(PostField, String)>,
}

impl FieldAssignment {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn get(&self, field: PostField) -> Option<&str> {
        self.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: PostField) -> bool {
        self.get(field).is_some()
    }

    /// Overwrite the assigned fields of `post`; the rest stay untouched.
    pub fn apply_to(&self, post: &mut Post) {
        for (field, value) in &self.fields {
            field.slot(post).clone_from(value);
        }
    }
}

/// Compute the sparse update set for an already-validated payload.
///
/// A field is included only when the payload's value is non-empty. The
/// payload is expected to have gone through
/// [`validate_at`](crate::domain::validate_at) first, so the timestamp is
/// always present and every update refreshes it.
pub fn compute_update_set(payload: &Post) -> FieldAssignment {
    let fields = PostField::ALL
        .iter()
        .filter_map(|&field| {
            let value = field.get(payload);
            (!value.is_empty()).then(|| (field, value.to_owned()))
        })
        .collect();

    FieldAssignment { fields }
}
