//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academies;
mod attendance;
mod billing;
mod classes;
mod counseling;
mod homeworks;
mod notices;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{AcademyError, Result};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

use crate::models::{
    academies::{Academy, CreateAcademy, UpdateAcademyRequest},
    attendance::{
        entities::{Attendance, QrCode},
        requests::{UpdateAttendanceRequest, UpsertAttendance},
        responses::AttendanceRecord,
    },
    billing::{
        entities::{Billing, Payment},
        requests::{BillingListQuery, CreateBillingRequest, CreatePaymentRequest, UpdateBillingRequest},
        responses::{BillingListResponse, BillingStats, PaymentRecord},
    },
    classes::{
        entities::{Class, ClassMember},
        requests::{CreateClassRequest, UpdateClassRequest},
        responses::ClassSummary,
    },
    counseling::{
        CounselingListQuery, CounselingListResponse, CounselingNote, CounselingRecord,
        CreateCounselingRequest, UpdateCounselingRequest,
    },
    features::AcademyFeature,
    homeworks::{
        entities::{Homework, Submission},
        requests::{CreateHomeworkRequest, GradeSubmissionRequest, SubmitHomeworkRequest, UpdateHomeworkRequest},
        responses::{HomeworkSummary, StudentHomework, TargetSubmission},
    },
    notices::{
        entities::Notice,
        requests::{CreateNoticeRequest, UpdateNoticeRequest},
        responses::{NoticeDetailResponse, NoticeSummary},
    },
    students::{
        entities::{ProviderProfile, Student, StudentInvite, UserAccount},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{entities::User, requests::CreateUser},
};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, config.database.pool_size).await
    }

    /// 连接指定数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, config.database.timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, config.database.timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学院模块
    async fn create_academy(&self, academy: CreateAcademy) -> Result<Academy> {
        self.create_academy_impl(academy).await
    }

    async fn get_academy_by_id(&self, id: i64) -> Result<Option<Academy>> {
        self.get_academy_by_id_impl(id).await
    }

    async fn get_academy_by_code(&self, code: &str) -> Result<Option<Academy>> {
        self.get_academy_by_code_impl(code).await
    }

    async fn update_academy(
        &self,
        id: i64,
        update: UpdateAcademyRequest,
    ) -> Result<Option<Academy>> {
        self.update_academy_impl(id, update).await
    }

    async fn list_academy_features(&self, academy_id: i64) -> Result<Vec<AcademyFeature>> {
        self.list_academy_features_impl(academy_id).await
    }

    async fn upsert_academy_feature(
        &self,
        academy_id: i64,
        feature_code: &str,
        enabled: bool,
        settings: Option<serde_json::Value>,
    ) -> Result<AcademyFeature> {
        self.upsert_academy_feature_impl(academy_id, feature_code, enabled, settings)
            .await
    }

    // 教职工模块
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_staff(&self, academy_id: i64) -> Result<Vec<User>> {
        self.list_staff_impl(academy_id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        academy_id: i64,
        student: CreateStudentRequest,
    ) -> Result<Student> {
        self.create_student_impl(academy_id, student).await
    }

    async fn get_student(&self, academy_id: i64, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(academy_id, id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(academy_id, id, update).await
    }

    async fn deactivate_student(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.deactivate_student_impl(academy_id, id).await
    }

    async fn count_active_students(&self, academy_id: i64) -> Result<u64> {
        self.count_active_students_impl(academy_id).await
    }

    async fn list_recent_students(&self, academy_id: i64, limit: u64) -> Result<Vec<Student>> {
        self.list_recent_students_impl(academy_id, limit).await
    }

    async fn replace_student_invite(
        &self,
        student_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<StudentInvite> {
        self.replace_student_invite_impl(student_id, token, expires_at)
            .await
    }

    async fn get_invite_by_token(
        &self,
        token: &str,
    ) -> Result<Option<(StudentInvite, Student)>> {
        self.get_invite_by_token_impl(token).await
    }

    async fn upsert_user_account(&self, profile: ProviderProfile) -> Result<UserAccount> {
        self.upsert_user_account_impl(profile).await
    }

    async fn get_user_account(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<UserAccount>> {
        self.get_user_account_impl(provider, provider_user_id).await
    }

    async fn redeem_invite(&self, token: &str, user_account_id: i64) -> Result<Student> {
        self.redeem_invite_impl(token, user_account_id).await
    }

    async fn find_linked_student(&self, user_account_id: i64) -> Result<Option<Student>> {
        self.find_linked_student_impl(user_account_id).await
    }

    // 班级模块
    async fn create_class(&self, academy_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(academy_id, class).await
    }

    async fn get_class(&self, academy_id: i64, id: i64) -> Result<Option<Class>> {
        self.get_class_impl(academy_id, id).await
    }

    async fn list_classes(&self, academy_id: i64) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl(academy_id).await
    }

    async fn update_class(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(academy_id, id, update).await
    }

    async fn delete_class(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.delete_class_impl(academy_id, id).await
    }

    async fn count_academy_classes(&self, academy_id: i64, class_ids: &[i64]) -> Result<u64> {
        self.count_academy_classes_impl(academy_id, class_ids).await
    }

    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        self.list_class_members_impl(class_id).await
    }

    async fn add_class_students(
        &self,
        academy_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        self.add_class_students_impl(academy_id, class_id, student_ids)
            .await
    }

    async fn remove_class_student(&self, class_id: i64, student_id: i64) -> Result<bool> {
        self.remove_class_student_impl(class_id, student_id).await
    }

    async fn list_student_class_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_student_class_ids_impl(student_id).await
    }

    // 出勤模块
    async fn upsert_attendance(&self, record: UpsertAttendance) -> Result<Attendance> {
        self.upsert_attendance_impl(record).await
    }

    async fn get_attendance(&self, academy_id: i64, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_impl(academy_id, id).await
    }

    async fn get_attendance_for_day(
        &self,
        academy_id: i64,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        self.get_attendance_for_day_impl(academy_id, student_id, date)
            .await
    }

    async fn update_attendance(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(academy_id, id, update).await
    }

    async fn list_attendance_by_date(
        &self,
        academy_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_by_date_impl(academy_id, date).await
    }

    async fn list_student_attendance(
        &self,
        academy_id: i64,
        student_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        self.list_student_attendance_impl(academy_id, student_id, from, to)
            .await
    }

    async fn create_qr_code(
        &self,
        academy_id: i64,
        code: &str,
        code_type: &str,
        expires_at: Option<i64>,
        created_by: i64,
    ) -> Result<QrCode> {
        self.create_qr_code_impl(academy_id, code, code_type, expires_at, created_by)
            .await
    }

    async fn list_qr_codes(&self, academy_id: i64) -> Result<Vec<QrCode>> {
        self.list_qr_codes_impl(academy_id).await
    }

    async fn get_qr_code_by_code(&self, code: &str) -> Result<Option<QrCode>> {
        self.get_qr_code_by_code_impl(code).await
    }

    async fn deactivate_qr_code(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.deactivate_qr_code_impl(academy_id, id).await
    }

    // 收费模块
    async fn create_billing(
        &self,
        academy_id: i64,
        billing: CreateBillingRequest,
    ) -> Result<Billing> {
        self.create_billing_impl(academy_id, billing).await
    }

    async fn get_billing(&self, academy_id: i64, id: i64) -> Result<Option<Billing>> {
        self.get_billing_impl(academy_id, id).await
    }

    async fn list_billings_with_pagination(
        &self,
        query: BillingListQuery,
    ) -> Result<BillingListResponse> {
        self.list_billings_with_pagination_impl(query).await
    }

    async fn update_billing(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateBillingRequest,
    ) -> Result<Option<Billing>> {
        self.update_billing_impl(academy_id, id, update).await
    }

    async fn delete_billing(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.delete_billing_impl(academy_id, id).await
    }

    async fn list_student_billings(
        &self,
        academy_id: i64,
        student_id: i64,
    ) -> Result<Vec<Billing>> {
        self.list_student_billings_impl(academy_id, student_id).await
    }

    async fn create_payment(
        &self,
        academy_id: i64,
        created_by: i64,
        payment: CreatePaymentRequest,
    ) -> Result<Payment> {
        self.create_payment_impl(academy_id, created_by, payment).await
    }

    async fn list_payments(&self, academy_id: i64, limit: u64) -> Result<Vec<PaymentRecord>> {
        self.list_payments_impl(academy_id, limit).await
    }

    async fn billing_stats(
        &self,
        academy_id: i64,
        month: &str,
        from_ts: i64,
        to_ts: i64,
    ) -> Result<BillingStats> {
        self.billing_stats_impl(academy_id, month, from_ts, to_ts).await
    }

    // 作业模块
    async fn create_homework(
        &self,
        academy_id: i64,
        created_by: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<HomeworkSummary> {
        self.create_homework_impl(academy_id, created_by, homework)
            .await
    }

    async fn get_homework(&self, academy_id: i64, id: i64) -> Result<Option<Homework>> {
        self.get_homework_impl(academy_id, id).await
    }

    async fn list_homeworks(&self, academy_id: i64) -> Result<Vec<HomeworkSummary>> {
        self.list_homeworks_impl(academy_id).await
    }

    async fn update_homework(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>> {
        self.update_homework_impl(academy_id, id, update).await
    }

    async fn delete_homework(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.delete_homework_impl(academy_id, id).await
    }

    async fn list_homework_submissions(&self, homework_id: i64) -> Result<Vec<TargetSubmission>> {
        self.list_homework_submissions_impl(homework_id).await
    }

    async fn grade_submission(
        &self,
        academy_id: i64,
        submission_id: i64,
        graded_by: i64,
        grade: GradeSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(academy_id, submission_id, graded_by, grade)
            .await
    }

    async fn list_student_homeworks(
        &self,
        academy_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentHomework>> {
        self.list_student_homeworks_impl(academy_id, student_id).await
    }

    async fn is_homework_target(&self, homework_id: i64, student_id: i64) -> Result<bool> {
        self.is_homework_target_impl(homework_id, student_id).await
    }

    async fn submit_homework(
        &self,
        homework_id: i64,
        student_id: i64,
        submission: SubmitHomeworkRequest,
    ) -> Result<Submission> {
        self.submit_homework_impl(homework_id, student_id, submission)
            .await
    }

    async fn count_pending_homework(&self, academy_id: i64, student_id: i64) -> Result<u64> {
        self.count_pending_homework_impl(academy_id, student_id).await
    }

    // 公告模块
    async fn create_notice(
        &self,
        academy_id: i64,
        created_by: i64,
        notice: CreateNoticeRequest,
    ) -> Result<NoticeDetailResponse> {
        self.create_notice_impl(academy_id, created_by, notice).await
    }

    async fn list_notices(&self, academy_id: i64) -> Result<Vec<NoticeSummary>> {
        self.list_notices_impl(academy_id).await
    }

    async fn list_student_notices(
        &self,
        academy_id: i64,
        student_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<NoticeSummary>> {
        self.list_student_notices_impl(academy_id, student_id, limit)
            .await
    }

    async fn get_notice_detail(
        &self,
        academy_id: i64,
        id: i64,
    ) -> Result<Option<NoticeDetailResponse>> {
        self.get_notice_detail_impl(academy_id, id).await
    }

    async fn is_notice_visible_to_student(&self, notice_id: i64, student_id: i64) -> Result<bool> {
        self.is_notice_visible_to_student_impl(notice_id, student_id)
            .await
    }

    async fn increment_notice_views(&self, id: i64) -> Result<()> {
        self.increment_notice_views_impl(id).await
    }

    async fn update_notice(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<NoticeDetailResponse>> {
        self.update_notice_impl(academy_id, id, update).await
    }

    async fn publish_notice(&self, academy_id: i64, id: i64) -> Result<Option<Notice>> {
        self.publish_notice_impl(academy_id, id).await
    }

    async fn delete_notice(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.delete_notice_impl(academy_id, id).await
    }

    // 咨询模块
    async fn create_counseling(
        &self,
        academy_id: i64,
        counselor_id: i64,
        note: CreateCounselingRequest,
    ) -> Result<CounselingNote> {
        self.create_counseling_impl(academy_id, counselor_id, note)
            .await
    }

    async fn get_counseling(&self, academy_id: i64, id: i64) -> Result<Option<CounselingRecord>> {
        self.get_counseling_impl(academy_id, id).await
    }

    async fn list_counseling_with_pagination(
        &self,
        query: CounselingListQuery,
    ) -> Result<CounselingListResponse> {
        self.list_counseling_with_pagination_impl(query).await
    }

    async fn update_counseling(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateCounselingRequest,
    ) -> Result<Option<CounselingNote>> {
        self.update_counseling_impl(academy_id, id, update).await
    }

    async fn delete_counseling(&self, academy_id: i64, id: i64) -> Result<bool> {
        self.delete_counseling_impl(academy_id, id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::academies::CreateAcademy;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::students::{entities::Student, requests::CreateStudentRequest};

    /// 内存 SQLite，单连接保证同一个数据库
    pub async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory storage")
    }

    pub async fn seed_academy(storage: &SeaOrmStorage, code: &str) -> i64 {
        storage
            .create_academy_impl(CreateAcademy {
                name: format!("Academy {code}"),
                code: code.to_string(),
                owner_name: None,
                contact_email: None,
            })
            .await
            .expect("seed academy")
            .id
    }

    pub async fn seed_student(storage: &SeaOrmStorage, academy_id: i64, name: &str) -> Student {
        storage
            .create_student_impl(
                academy_id,
                CreateStudentRequest {
                    name: name.to_string(),
                    student_number: None,
                    phone: None,
                    email: None,
                    grade: Some("중2".to_string()),
                    parent_phone: None,
                    parent_name: None,
                    memo: None,
                },
            )
            .await
            .expect("seed student")
    }

    pub fn class_request(name: &str) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            grade_level: Some("중2".to_string()),
            subject: Some("수학".to_string()),
            description: None,
            teacher_id: None,
            start_date: None,
            end_date: None,
        }
    }

    /// 创建班级并加入学生，返回班级 ID
    pub async fn seed_class(storage: &SeaOrmStorage, academy_id: i64, student_ids: &[i64]) -> i64 {
        let class = storage
            .create_class_impl(academy_id, class_request("수학 A반"))
            .await
            .expect("seed class");
        storage
            .add_class_students_impl(academy_id, class.id, student_ids)
            .await
            .expect("seed members");
        class.id
    }
}
