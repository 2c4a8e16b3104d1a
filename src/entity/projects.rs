//! 项目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub student_id: i64,
    pub course_id: i64,
    pub status: String,
    pub deadline: String,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::project_milestones::Entity")]
    Milestones,
    #[sea_orm(has_many = "super::project_files::Entity")]
    Files,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::project_milestones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl Related<super::project_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_project(self) -> crate::models::projects::entities::Project {
        use chrono::{DateTime, Utc};

        crate::models::projects::entities::Project {
            id: self.id,
            title: self.title,
            description: self.description,
            student_id: self.student_id,
            course_id: self.course_id,
            status: self.status,
            deadline: self.deadline,
            grade: self.grade,
            feedback: self.feedback,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            student_name: None,
            course_title: None,
            milestones: Vec::new(),
            files: Vec::new(),
        }
    }
}
