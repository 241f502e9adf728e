//! Content rules and defaulting applied before anything reaches a backend.

use chrono::{Local, NaiveDateTime};

use crate::domain::Post;
use crate::error::DomainError;

/// Format of a stored timestamp: 24-hour, zero-padded, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Validate a post against the current clock. See [`validate_at`].
pub fn validate_for_create(post: &Post) -> Result<Post, DomainError> {
    validate_at(post, Local::now().naive_local())
}

/// Validate a post and fill in defaults, as of `now`.
///
/// Returns a new post; `post` itself is never modified. An empty timestamp
/// is replaced by `now`, then an empty title is rejected. Id, link and
/// comment pass through untouched, empty or not.
///
/// Creation and update share this rule, so a stored post never has an empty
/// title or timestamp.
pub fn validate_at(post: &Post, now: NaiveDateTime) -> Result<Post, DomainError> {
    let mut prepared = post.clone();

    if prepared.timestamp.is_empty() {
        prepared.timestamp = format_timestamp(now);
    }

    if prepared.title.is_empty() {
        return Err(DomainError::Validation("title required".to_string()));
    }

    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 7, 22)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    #[test]
    fn test_empty_title_rejected() {
        let post = Post::new("1", "")
            .with_timestamp("2020-07-17 21:49:00")
            .with_link("https://example.com");

        let err = validate_at(&post, fixed_now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation failed: title required");
    }

    #[test]
    fn test_empty_timestamp_defaulted_zero_padded() {
        let post = Post::new("1", "T");

        let prepared = validate_at(&post, fixed_now()).unwrap();
        assert_eq!(prepared.timestamp, "2020-07-22 09:05:03");
        // The caller's value is left alone.
        assert!(post.timestamp.is_empty());
    }

    #[test]
    fn test_supplied_timestamp_kept() {
        let post = Post::new("1", "T").with_timestamp("test date");

        let prepared = validate_at(&post, fixed_now()).unwrap();
        assert_eq!(prepared.timestamp, "test date");
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let post = Post::new("", "T").with_comment("c");

        let prepared = validate_at(&post, fixed_now()).unwrap();
        assert_eq!(prepared.id, "");
        assert_eq!(prepared.link, "");
        assert_eq!(prepared.comment, "c");
    }

    #[test]
    fn test_now_timestamp_parses_back() {
        let now = now_timestamp();
        assert_eq!(now.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&now, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_validate_for_create_uses_clock() {
        let prepared = validate_for_create(&Post::new("1", "T")).unwrap();
        assert!(NaiveDateTime::parse_from_str(&prepared.timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}
