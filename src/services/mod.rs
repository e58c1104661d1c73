pub mod academy;
pub mod attendance;
pub mod auth;
pub mod billing;
pub mod classes;
pub mod common;
pub mod counseling;
pub mod dashboard;
pub mod features;
pub mod homeworks;
pub mod notices;
pub mod staff;
pub mod student_auth;
pub mod students;
pub mod system;

pub use academy::AcademyService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use classes::ClassService;
pub use counseling::CounselingService;
pub use dashboard::DashboardService;
pub use features::FeatureService;
pub use homeworks::HomeworkService;
pub use notices::NoticeService;
pub use staff::StaffService;
pub use student_auth::StudentAuthService;
pub use students::StudentService;
pub use system::SystemService;
