//! Row shape of a post collection for SeaORM.
//!
//! The table name here is only the default; queries are built against the
//! collection name the backend was constructed with.

use sea_orm::entity::prelude::*;

use blog_core::domain::PostField;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub date: String,
    pub link: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Stored column for each post field, in select/insert order.
pub const COLUMNS: [&str; 5] = ["id", "title", "date", "link", "comment"];

/// Column holding `field`. The timestamp lives in `date`.
pub fn column_name(field: PostField) -> &'static str {
    match field {
        PostField::Id => "id",
        PostField::Title => "title",
        PostField::Timestamp => "date",
        PostField::Link => "link",
        PostField::Comment => "comment",
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for blog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            timestamp: model.date,
            link: model.link,
            comment: model.comment,
        }
    }
}

/// Conversion from Domain Post to SeaORM Model.
impl From<blog_core::domain::Post> for Model {
    fn from(post: blog_core::domain::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            date: post.timestamp,
            link: post.link,
            comment: post.comment,
        }
    }
}
