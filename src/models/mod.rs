pub mod academies;
pub mod attendance;
pub mod auth;
pub mod billing;
pub mod classes;
pub mod common;
pub mod counseling;
pub mod dashboard;
pub mod features;
pub mod files;
pub mod homeworks;
pub mod notices;
pub mod students;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1999,

    // 认证
    AuthFailed = 2000,
    TokenInvalid = 2001,
    AccountInactive = 2002,

    // 学生与邀请
    StudentNotFound = 3000,
    InviteNotFound = 3001,
    InviteExpired = 3002,
    InviteUsed = 3003,
    OAuthStateInvalid = 3004,
    OAuthExchangeFailed = 3005,
    AccountNotRegistered = 3006,
    StudentNotLinked = 3007,

    // 班级
    ClassNotFound = 4000,
    ClassMemberNotFound = 4001,

    // 出勤
    AttendanceNotFound = 5000,
    QrCodeInvalid = 5001,
    CheckInRequired = 5002,

    // 收费
    BillingNotFound = 6000,
    InvalidAmount = 6001,

    // 作业
    HomeworkNotFound = 7000,
    NotHomeworkTarget = 7001,
    SubmissionNotFound = 7002,
    FileTypeNotAllowed = 7003,
    FileTooLarge = 7004,
    FileNotFound = 7005,
    FileUploadFailed = 7006,
    FileAlreadyExists = 7007,

    // 公告
    NoticeNotFound = 8000,

    // 咨询
    CounselingNotFound = 9000,

    // 学院与功能
    AcademyNotFound = 9500,
    FeatureNotFound = 9501,
}
