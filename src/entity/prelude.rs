pub use super::announcements::Entity as Announcements;
pub use super::assignments::Entity as Assignments;
pub use super::choices::Entity as Choices;
pub use super::course_students::Entity as CourseStudents;
pub use super::courses::Entity as Courses;
pub use super::discussion_messages::Entity as DiscussionMessages;
pub use super::exam_submissions::Entity as ExamSubmissions;
pub use super::exams::Entity as Exams;
pub use super::messages::Entity as Messages;
pub use super::project_files::Entity as ProjectFiles;
pub use super::project_milestones::Entity as ProjectMilestones;
pub use super::projects::Entity as Projects;
pub use super::questions::Entity as Questions;
pub use super::resources::Entity as Resources;
pub use super::submissions::Entity as Submissions;
pub use super::units::Entity as Units;
pub use super::users::Entity as Users;
