pub mod admin;
pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod discussions;
pub mod exam_submissions;
pub mod exams;
pub mod messages;
pub mod milestones;
pub mod project_files;
pub mod projects;
pub mod resources;
pub mod submissions;
pub mod units;
pub mod users;

pub use admin::configure_admin_routes;
pub use announcements::configure_announcement_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use discussions::configure_discussion_routes;
pub use exam_submissions::configure_exam_submission_routes;
pub use exams::configure_exam_routes;
pub use messages::configure_message_routes;
pub use milestones::configure_milestone_routes;
pub use project_files::configure_project_file_routes;
pub use projects::configure_project_routes;
pub use resources::configure_resource_routes;
pub use submissions::configure_submission_routes;
pub use units::configure_unit_routes;
pub use users::configure_user_routes;
