//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcements;
pub mod assignments;
pub mod choices;
pub mod course_students;
pub mod courses;
pub mod discussion_messages;
pub mod exam_submissions;
pub mod exams;
pub mod messages;
pub mod project_files;
pub mod project_milestones;
pub mod projects;
pub mod questions;
pub mod resources;
pub mod submissions;
pub mod units;
pub mod users;
