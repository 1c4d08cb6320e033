//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel, for updates.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

/// Conversion from an unsaved post; the database assigns the id.
impl From<quill_core::domain::NewPost> for ActiveModel {
    fn from(post: quill_core::domain::NewPost) -> Self {
        let now: DateTimeWithTimeZone = post.created_at().into();
        Self {
            id: NotSet,
            title: Set(post.title().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
