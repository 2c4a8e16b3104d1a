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

pub use admin::AdminService;
pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use discussions::DiscussionService;
pub use exam_submissions::ExamSubmissionService;
pub use exams::ExamService;
pub use messages::MessageService;
pub use milestones::MilestoneService;
pub use project_files::ProjectFileService;
pub use projects::ProjectService;
pub use resources::ResourceService;
pub use submissions::SubmissionService;
pub use units::UnitService;
pub use users::UserService;
