use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储接口
///
/// 带 `academy_id` 参数的方法只会读写该学院的数据，其他学院的行视为不存在。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学院
    async fn create_academy(&self, academy: CreateAcademy) -> Result<Academy>;
    async fn get_academy_by_id(&self, id: i64) -> Result<Option<Academy>>;
    async fn get_academy_by_code(&self, code: &str) -> Result<Option<Academy>>;
    async fn update_academy(
        &self,
        id: i64,
        update: UpdateAcademyRequest,
    ) -> Result<Option<Academy>>;

    /// 功能开关
    async fn list_academy_features(&self, academy_id: i64) -> Result<Vec<AcademyFeature>>;
    async fn upsert_academy_feature(
        &self,
        academy_id: i64,
        feature_code: &str,
        enabled: bool,
        settings: Option<serde_json::Value>,
    ) -> Result<AcademyFeature>;

    /// 教职工
    async fn create_user(&self, user: CreateUser) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_staff(&self, academy_id: i64) -> Result<Vec<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, academy_id: i64, student: CreateStudentRequest)
    -> Result<Student>;
    async fn get_student(&self, academy_id: i64, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 软删除：状态改为 inactive
    async fn deactivate_student(&self, academy_id: i64, id: i64) -> Result<bool>;
    async fn count_active_students(&self, academy_id: i64) -> Result<u64>;
    async fn list_recent_students(&self, academy_id: i64, limit: u64) -> Result<Vec<Student>>;

    /// 学生邀请与第三方账号绑定
    // 删除旧邀请后创建新邀请
    async fn replace_student_invite(
        &self,
        student_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<StudentInvite>;
    // 邀请及其学生
    async fn get_invite_by_token(&self, token: &str)
    -> Result<Option<(StudentInvite, Student)>>;
    async fn upsert_user_account(&self, profile: ProviderProfile) -> Result<UserAccount>;
    async fn get_user_account(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<UserAccount>>;
    // 使用邀请绑定账号，邀请失效时返回 InviteExpired / InviteUsed
    async fn redeem_invite(&self, token: &str, user_account_id: i64) -> Result<Student>;
    async fn find_linked_student(&self, user_account_id: i64) -> Result<Option<Student>>;

    /// 班级
    async fn create_class(&self, academy_id: i64, class: CreateClassRequest) -> Result<Class>;
    async fn get_class(&self, academy_id: i64, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self, academy_id: i64) -> Result<Vec<ClassSummary>>;
    async fn update_class(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, academy_id: i64, id: i64) -> Result<bool>;
    async fn count_academy_classes(&self, academy_id: i64, class_ids: &[i64]) -> Result<u64>;

    /// 班级成员
    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>>;
    // 返回实际加入（或重新加入）的学生 ID
    async fn add_class_students(
        &self,
        academy_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>>;
    async fn remove_class_student(&self, class_id: i64, student_id: i64) -> Result<bool>;
    async fn list_student_class_ids(&self, student_id: i64) -> Result<Vec<i64>>;

    /// 出勤
    // 每个学生每天一条记录，已存在时更新
    async fn upsert_attendance(&self, record: UpsertAttendance) -> Result<Attendance>;
    async fn get_attendance(&self, academy_id: i64, id: i64) -> Result<Option<Attendance>>;
    async fn get_attendance_for_day(
        &self,
        academy_id: i64,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>>;
    async fn update_attendance(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn list_attendance_by_date(
        &self,
        academy_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    // [from, to)
    async fn list_student_attendance(
        &self,
        academy_id: i64,
        student_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>>;

    /// 签到二维码
    async fn create_qr_code(
        &self,
        academy_id: i64,
        code: &str,
        code_type: &str,
        expires_at: Option<i64>,
        created_by: i64,
    ) -> Result<QrCode>;
    async fn list_qr_codes(&self, academy_id: i64) -> Result<Vec<QrCode>>;
    async fn get_qr_code_by_code(&self, code: &str) -> Result<Option<QrCode>>;
    async fn deactivate_qr_code(&self, academy_id: i64, id: i64) -> Result<bool>;

    /// 账单与收款
    async fn create_billing(&self, academy_id: i64, billing: CreateBillingRequest)
    -> Result<Billing>;
    async fn get_billing(&self, academy_id: i64, id: i64) -> Result<Option<Billing>>;
    async fn list_billings_with_pagination(
        &self,
        query: BillingListQuery,
    ) -> Result<BillingListResponse>;
    async fn update_billing(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateBillingRequest,
    ) -> Result<Option<Billing>>;
    async fn delete_billing(&self, academy_id: i64, id: i64) -> Result<bool>;
    async fn list_student_billings(&self, academy_id: i64, student_id: i64)
    -> Result<Vec<Billing>>;
    // 关联账单时同步更新已付金额与状态
    async fn create_payment(
        &self,
        academy_id: i64,
        created_by: i64,
        payment: CreatePaymentRequest,
    ) -> Result<Payment>;
    async fn list_payments(&self, academy_id: i64, limit: u64) -> Result<Vec<PaymentRecord>>;
    // [from_ts, to_ts) 内的收款统计
    async fn billing_stats(
        &self,
        academy_id: i64,
        month: &str,
        from_ts: i64,
        to_ts: i64,
    ) -> Result<BillingStats>;

    /// 作业
    // 创建作业并从班级成员生成对象名单
    async fn create_homework(
        &self,
        academy_id: i64,
        created_by: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<HomeworkSummary>;
    async fn get_homework(&self, academy_id: i64, id: i64) -> Result<Option<Homework>>;
    async fn list_homeworks(&self, academy_id: i64) -> Result<Vec<HomeworkSummary>>;
    async fn update_homework(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>>;
    async fn delete_homework(&self, academy_id: i64, id: i64) -> Result<bool>;
    async fn list_homework_submissions(&self, homework_id: i64) -> Result<Vec<TargetSubmission>>;
    async fn grade_submission(
        &self,
        academy_id: i64,
        submission_id: i64,
        graded_by: i64,
        grade: GradeSubmissionRequest,
    ) -> Result<Option<Submission>>;
    async fn list_student_homeworks(
        &self,
        academy_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentHomework>>;
    async fn is_homework_target(&self, homework_id: i64, student_id: i64) -> Result<bool>;
    // 提交或重新提交，附件整体替换
    async fn submit_homework(
        &self,
        homework_id: i64,
        student_id: i64,
        submission: SubmitHomeworkRequest,
    ) -> Result<Submission>;
    async fn count_pending_homework(&self, academy_id: i64, student_id: i64) -> Result<u64>;

    /// 公告
    async fn create_notice(
        &self,
        academy_id: i64,
        created_by: i64,
        notice: CreateNoticeRequest,
    ) -> Result<NoticeDetailResponse>;
    async fn list_notices(&self, academy_id: i64) -> Result<Vec<NoticeSummary>>;
    // 已发布且面向学生所在班级的公告
    async fn list_student_notices(
        &self,
        academy_id: i64,
        student_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<NoticeSummary>>;
    async fn get_notice_detail(
        &self,
        academy_id: i64,
        id: i64,
    ) -> Result<Option<NoticeDetailResponse>>;
    async fn is_notice_visible_to_student(&self, notice_id: i64, student_id: i64) -> Result<bool>;
    async fn increment_notice_views(&self, id: i64) -> Result<()>;
    async fn update_notice(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<NoticeDetailResponse>>;
    async fn publish_notice(&self, academy_id: i64, id: i64) -> Result<Option<Notice>>;
    async fn delete_notice(&self, academy_id: i64, id: i64) -> Result<bool>;

    /// 咨询记录
    async fn create_counseling(
        &self,
        academy_id: i64,
        counselor_id: i64,
        note: CreateCounselingRequest,
    ) -> Result<CounselingNote>;
    async fn get_counseling(&self, academy_id: i64, id: i64) -> Result<Option<CounselingRecord>>;
    async fn list_counseling_with_pagination(
        &self,
        query: CounselingListQuery,
    ) -> Result<CounselingListResponse>;
    async fn update_counseling(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateCounselingRequest,
    ) -> Result<Option<CounselingNote>>;
    async fn delete_counseling(&self, academy_id: i64, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
