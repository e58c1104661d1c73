//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod academies;
pub mod academy_features;
pub mod attendance;
pub mod billings;
pub mod class_members;
pub mod classes;
pub mod counseling_notes;
pub mod homework_submissions;
pub mod homework_targets;
pub mod homeworks;
pub mod notice_attachments;
pub mod notice_targets;
pub mod notices;
pub mod payments;
pub mod qr_codes;
pub mod student_invites;
pub mod student_links;
pub mod students;
pub mod submission_files;
pub mod user_accounts;
pub mod users;

use chrono::{DateTime, Utc};

/// 数据库中的 Unix 秒转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
