//! 学习资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub unit_id: Option<i64>,
    pub title: String,
    pub kind: String,
    pub file_path: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::units::Entity",
        from = "Column::UnitId",
        to = "super::units::Column::Id"
    )]
    Unit,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_resource(self) -> crate::models::courses::entities::Resource {
        use crate::models::courses::entities::{Resource, ResourceKind};
        use chrono::{DateTime, Utc};

        Resource {
            id: self.id,
            course_id: self.course_id,
            unit_id: self.unit_id,
            title: self.title,
            kind: self.kind.parse::<ResourceKind>().unwrap_or(ResourceKind::Note),
            file_url: self
                .file_path
                .map(crate::utils::media_url),
            url: self.url,
            content: self.content,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
