pub mod academy;
pub mod attendance;
pub mod auth;
pub mod billing;
pub mod classes;
pub mod counseling;
pub mod dashboard;
pub mod features;
pub mod frontend;
pub mod homeworks;
pub mod notices;
pub mod staff;
pub mod student_auth;
pub mod students;
pub mod system;

pub use academy::configure_academy_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use billing::configure_billing_routes;
pub use classes::configure_classes_routes;
pub use counseling::configure_counseling_routes;
pub use dashboard::configure_dashboard_routes;
pub use features::configure_features_routes;
pub use frontend::configure_frontend_routes;
pub use homeworks::{configure_homeworks_routes, configure_upload_routes};
pub use notices::configure_notices_routes;
pub use staff::configure_staff_routes;
pub use student_auth::configure_student_auth_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
