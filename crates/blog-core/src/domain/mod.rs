//! Domain entities and the pure rules that govern them.

mod merge;
mod post;
mod validation;

pub use merge::{FieldAssignment, PostField, compute_update_set};
pub use post::Post;
pub use validation::{
    TIMESTAMP_FORMAT, format_timestamp, now_timestamp, validate_at, validate_for_create,
};
