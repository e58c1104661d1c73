use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键列
fn id_column<T: IntoIden + 'static>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 外键（级联删除）
fn cascade_fk<T, C, R, P>(from_table: T, from_col: C, to_table: R, to_col: P) -> ForeignKeyCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
    R: IntoIden + 'static,
    P: IntoIden + 'static,
{
    ForeignKey::create()
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 学院（租户）
        manager
            .create_table(
                Table::create()
                    .table(Academies::Table)
                    .if_not_exists()
                    .col(id_column(Academies::Id))
                    .col(ColumnDef::new(Academies::Name).string().not_null())
                    .col(
                        ColumnDef::new(Academies::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Academies::OwnerName).string().null())
                    .col(ColumnDef::new(Academies::ContactEmail).string().null())
                    .col(ColumnDef::new(Academies::ContactPhone).string().null())
                    .col(ColumnDef::new(Academies::Address).string().null())
                    .col(
                        ColumnDef::new(Academies::SubscriptionTier)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Academies::SubscriptionStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Academies::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Academies::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 学院功能开关
        manager
            .create_table(
                Table::create()
                    .table(AcademyFeatures::Table)
                    .if_not_exists()
                    .col(id_column(AcademyFeatures::Id))
                    .col(
                        ColumnDef::new(AcademyFeatures::AcademyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AcademyFeatures::FeatureCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AcademyFeatures::Enabled).boolean().not_null())
                    .col(ColumnDef::new(AcademyFeatures::EnabledAt).big_integer().null())
                    .col(ColumnDef::new(AcademyFeatures::Settings).text().null())
                    .foreign_key(&mut cascade_fk(
                        AcademyFeatures::Table,
                        AcademyFeatures::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 教职工账号（管理员 / 教师）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_column(Users::Id))
                    .col(ColumnDef::new(Users::AcademyId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Users::Table,
                        Users::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 学生
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id_column(Students::Id))
                    .col(ColumnDef::new(Students::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::StudentNumber).string().null())
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::Grade).string().null())
                    .col(ColumnDef::new(Students::ParentPhone).string().null())
                    .col(ColumnDef::new(Students::ParentName).string().null())
                    .col(ColumnDef::new(Students::Memo).text().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::IsLinked).boolean().not_null())
                    .col(ColumnDef::new(Students::LinkedAt).big_integer().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Students::Table,
                        Students::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 学生邀请
        manager
            .create_table(
                Table::create()
                    .table(StudentInvites::Table)
                    .if_not_exists()
                    .col(id_column(StudentInvites::Id))
                    .col(
                        ColumnDef::new(StudentInvites::StudentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentInvites::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentInvites::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentInvites::UsedAt).big_integer().null())
                    .col(
                        ColumnDef::new(StudentInvites::UsedByUserAccountId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentInvites::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade_fk(
                        StudentInvites::Table,
                        StudentInvites::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 第三方登录账号
        manager
            .create_table(
                Table::create()
                    .table(UserAccounts::Table)
                    .if_not_exists()
                    .col(id_column(UserAccounts::Id))
                    .col(ColumnDef::new(UserAccounts::Provider).string().not_null())
                    .col(
                        ColumnDef::new(UserAccounts::ProviderUserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAccounts::Email).string().null())
                    .col(ColumnDef::new(UserAccounts::Name).string().null())
                    .col(
                        ColumnDef::new(UserAccounts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生与第三方账号的绑定
        manager
            .create_table(
                Table::create()
                    .table(StudentLinks::Table)
                    .if_not_exists()
                    .col(id_column(StudentLinks::Id))
                    .col(ColumnDef::new(StudentLinks::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(StudentLinks::UserAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentLinks::LinkedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        StudentLinks::Table,
                        StudentLinks::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        StudentLinks::Table,
                        StudentLinks::UserAccountId,
                        UserAccounts::Table,
                        UserAccounts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 班级
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(id_column(Classes::Id))
                    .col(ColumnDef::new(Classes::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::GradeLevel).string().null())
                    .col(ColumnDef::new(Classes::Subject).string().null())
                    .col(ColumnDef::new(Classes::Description).text().null())
                    .col(ColumnDef::new(Classes::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Classes::StartDate).date().null())
                    .col(ColumnDef::new(Classes::EndDate).date().null())
                    .col(ColumnDef::new(Classes::IsActive).boolean().not_null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Classes::Table,
                        Classes::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 班级成员
        manager
            .create_table(
                Table::create()
                    .table(ClassMembers::Table)
                    .if_not_exists()
                    .col(id_column(ClassMembers::Id))
                    .col(ColumnDef::new(ClassMembers::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(ClassMembers::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ClassMembers::JoinedAt).big_integer().not_null())
                    .col(ColumnDef::new(ClassMembers::LeftAt).big_integer().null())
                    .foreign_key(&mut cascade_fk(
                        ClassMembers::Table,
                        ClassMembers::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        ClassMembers::Table,
                        ClassMembers::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 出勤记录
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(id_column(Attendance::Id))
                    .col(ColumnDef::new(Attendance::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::CheckInTime).big_integer().null())
                    .col(ColumnDef::new(Attendance::CheckOutTime).big_integer().null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::CheckInMethod).string().null())
                    .col(ColumnDef::new(Attendance::CheckOutMethod).string().null())
                    .col(ColumnDef::new(Attendance::Memo).text().null())
                    .col(ColumnDef::new(Attendance::MarkedBy).big_integer().null())
                    .col(ColumnDef::new(Attendance::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Attendance::Table,
                        Attendance::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        Attendance::Table,
                        Attendance::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 签到二维码
        manager
            .create_table(
                Table::create()
                    .table(QrCodes::Table)
                    .if_not_exists()
                    .col(id_column(QrCodes::Id))
                    .col(ColumnDef::new(QrCodes::AcademyId).big_integer().not_null())
                    .col(
                        ColumnDef::new(QrCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(QrCodes::CodeType).string().not_null())
                    .col(ColumnDef::new(QrCodes::IsActive).boolean().not_null())
                    .col(ColumnDef::new(QrCodes::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(QrCodes::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(QrCodes::CreatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        QrCodes::Table,
                        QrCodes::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 账单
        manager
            .create_table(
                Table::create()
                    .table(Billings::Table)
                    .if_not_exists()
                    .col(id_column(Billings::Id))
                    .col(ColumnDef::new(Billings::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Billings::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Billings::Title).string().not_null())
                    .col(ColumnDef::new(Billings::Description).text().null())
                    .col(ColumnDef::new(Billings::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Billings::PaidAmount).big_integer().not_null())
                    .col(ColumnDef::new(Billings::Status).string().not_null())
                    .col(ColumnDef::new(Billings::BillingDate).date().not_null())
                    .col(ColumnDef::new(Billings::DueDate).date().null())
                    .col(ColumnDef::new(Billings::PaymentMethod).string().null())
                    .col(ColumnDef::new(Billings::PaidAt).big_integer().null())
                    .col(ColumnDef::new(Billings::Memo).text().null())
                    .col(ColumnDef::new(Billings::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Billings::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Billings::Table,
                        Billings::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        Billings::Table,
                        Billings::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 收款记录
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(id_column(Payments::Id))
                    .col(ColumnDef::new(Payments::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::BillingId).big_integer().null())
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Payments::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::PaidAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Notes).text().null())
                    .col(ColumnDef::new(Payments::CreatedBy).big_integer().null())
                    .foreign_key(&mut cascade_fk(
                        Payments::Table,
                        Payments::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        Payments::Table,
                        Payments::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::BillingId)
                            .to(Billings::Table, Billings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业
        manager
            .create_table(
                Table::create()
                    .table(Homeworks::Table)
                    .if_not_exists()
                    .col(id_column(Homeworks::Id))
                    .col(ColumnDef::new(Homeworks::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::Title).string().not_null())
                    .col(ColumnDef::new(Homeworks::Description).text().null())
                    .col(ColumnDef::new(Homeworks::DueDate).date().null())
                    .col(ColumnDef::new(Homeworks::Subject).string().null())
                    .col(ColumnDef::new(Homeworks::GradeLevel).string().null())
                    .col(ColumnDef::new(Homeworks::ClassIds).text().not_null())
                    .col(ColumnDef::new(Homeworks::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Homeworks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Homeworks::Table,
                        Homeworks::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 作业对象（创建时的快照）
        manager
            .create_table(
                Table::create()
                    .table(HomeworkTargets::Table)
                    .if_not_exists()
                    .col(id_column(HomeworkTargets::Id))
                    .col(
                        ColumnDef::new(HomeworkTargets::HomeworkId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkTargets::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HomeworkTargets::StudentName).string().not_null())
                    .col(ColumnDef::new(HomeworkTargets::ClassId).big_integer().null())
                    .col(ColumnDef::new(HomeworkTargets::ClassName).string().null())
                    .col(
                        ColumnDef::new(HomeworkTargets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade_fk(
                        HomeworkTargets::Table,
                        HomeworkTargets::HomeworkId,
                        Homeworks::Table,
                        Homeworks::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        HomeworkTargets::Table,
                        HomeworkTargets::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 作业提交
        manager
            .create_table(
                Table::create()
                    .table(HomeworkSubmissions::Table)
                    .if_not_exists()
                    .col(id_column(HomeworkSubmissions::Id))
                    .col(
                        ColumnDef::new(HomeworkSubmissions::HomeworkId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HomeworkSubmissions::Content).text().null())
                    .col(ColumnDef::new(HomeworkSubmissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(HomeworkSubmissions::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(HomeworkSubmissions::Grade).string().null())
                    .col(ColumnDef::new(HomeworkSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(HomeworkSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade_fk(
                        HomeworkSubmissions::Table,
                        HomeworkSubmissions::HomeworkId,
                        Homeworks::Table,
                        Homeworks::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        HomeworkSubmissions::Table,
                        HomeworkSubmissions::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 提交附件
        manager
            .create_table(
                Table::create()
                    .table(SubmissionFiles::Table)
                    .if_not_exists()
                    .col(id_column(SubmissionFiles::Id))
                    .col(
                        ColumnDef::new(SubmissionFiles::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubmissionFiles::FileKey).string().not_null())
                    .col(ColumnDef::new(SubmissionFiles::FileName).string().not_null())
                    .col(ColumnDef::new(SubmissionFiles::FileUrl).string().not_null())
                    .col(ColumnDef::new(SubmissionFiles::FileSize).big_integer().null())
                    .col(ColumnDef::new(SubmissionFiles::MimeType).string().null())
                    .col(ColumnDef::new(SubmissionFiles::UploadOrder).integer().not_null())
                    .col(
                        ColumnDef::new(SubmissionFiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade_fk(
                        SubmissionFiles::Table,
                        SubmissionFiles::SubmissionId,
                        HomeworkSubmissions::Table,
                        HomeworkSubmissions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 公告
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(id_column(Notices::Id))
                    .col(ColumnDef::new(Notices::AcademyId).big_integer().not_null())
                    .col(ColumnDef::new(Notices::Title).string().not_null())
                    .col(ColumnDef::new(Notices::Body).text().not_null())
                    .col(ColumnDef::new(Notices::Status).string().not_null())
                    .col(ColumnDef::new(Notices::IsImportant).boolean().not_null())
                    .col(ColumnDef::new(Notices::IsPinned).boolean().not_null())
                    .col(ColumnDef::new(Notices::ViewCount).big_integer().not_null())
                    .col(ColumnDef::new(Notices::PublishedAt).big_integer().null())
                    .col(ColumnDef::new(Notices::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Notices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Notices::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        Notices::Table,
                        Notices::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 公告目标班级
        manager
            .create_table(
                Table::create()
                    .table(NoticeTargets::Table)
                    .if_not_exists()
                    .col(id_column(NoticeTargets::Id))
                    .col(ColumnDef::new(NoticeTargets::NoticeId).big_integer().not_null())
                    .col(ColumnDef::new(NoticeTargets::ClassId).big_integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        NoticeTargets::Table,
                        NoticeTargets::NoticeId,
                        Notices::Table,
                        Notices::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        NoticeTargets::Table,
                        NoticeTargets::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 公告附件
        manager
            .create_table(
                Table::create()
                    .table(NoticeAttachments::Table)
                    .if_not_exists()
                    .col(id_column(NoticeAttachments::Id))
                    .col(
                        ColumnDef::new(NoticeAttachments::NoticeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NoticeAttachments::FileKey).string().not_null())
                    .col(ColumnDef::new(NoticeAttachments::FileName).string().not_null())
                    .col(ColumnDef::new(NoticeAttachments::FileUrl).string().not_null())
                    .col(ColumnDef::new(NoticeAttachments::FileSize).big_integer().null())
                    .col(ColumnDef::new(NoticeAttachments::MimeType).string().null())
                    .foreign_key(&mut cascade_fk(
                        NoticeAttachments::Table,
                        NoticeAttachments::NoticeId,
                        Notices::Table,
                        Notices::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 咨询记录
        manager
            .create_table(
                Table::create()
                    .table(CounselingNotes::Table)
                    .if_not_exists()
                    .col(id_column(CounselingNotes::Id))
                    .col(
                        ColumnDef::new(CounselingNotes::AcademyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::CounselorId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::CounselingDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounselingNotes::Duration).integer().null())
                    .col(
                        ColumnDef::new(CounselingNotes::CounselingType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounselingNotes::Topic).string().not_null())
                    .col(ColumnDef::new(CounselingNotes::Content).text().not_null())
                    .col(ColumnDef::new(CounselingNotes::ActionItems).text().null())
                    .col(
                        ColumnDef::new(CounselingNotes::FollowUpRequired)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::IsConfidential)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounselingNotes::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade_fk(
                        CounselingNotes::Table,
                        CounselingNotes::AcademyId,
                        Academies::Table,
                        Academies::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        CounselingNotes::Table,
                        CounselingNotes::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 联合唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_academy_features_code")
                    .table(AcademyFeatures::Table)
                    .col(AcademyFeatures::AcademyId)
                    .col(AcademyFeatures::FeatureCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_accounts_provider")
                    .table(UserAccounts::Table)
                    .col(UserAccounts::Provider)
                    .col(UserAccounts::ProviderUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_links_pair")
                    .table(StudentLinks::Table)
                    .col(StudentLinks::StudentId)
                    .col(StudentLinks::UserAccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_class_members_pair")
                    .table(ClassMembers::Table)
                    .col(ClassMembers::ClassId)
                    .col(ClassMembers::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_homework_targets_pair")
                    .table(HomeworkTargets::Table)
                    .col(HomeworkTargets::HomeworkId)
                    .col(HomeworkTargets::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_homework_submissions_pair")
                    .table(HomeworkSubmissions::Table)
                    .col(HomeworkSubmissions::HomeworkId)
                    .col(HomeworkSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 常用查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_academy_id")
                    .table(Students::Table)
                    .col(Students::AcademyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_academy_date")
                    .table(Attendance::Table)
                    .col(Attendance::AcademyId)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_academy_paid_at")
                    .table(Payments::Table)
                    .col(Payments::AcademyId)
                    .col(Payments::PaidAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notices_academy_id")
                    .table(Notices::Table)
                    .col(Notices::AcademyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CounselingNotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NoticeAttachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NoticeTargets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubmissionFiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HomeworkSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HomeworkTargets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Homeworks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Billings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QrCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentInvites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademyFeatures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Academies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Academies {
    #[sea_orm(iden = "academies")]
    Table,
    Id,
    Name,
    Code,
    OwnerName,
    ContactEmail,
    ContactPhone,
    Address,
    SubscriptionTier,
    SubscriptionStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AcademyFeatures {
    #[sea_orm(iden = "academy_features")]
    Table,
    Id,
    AcademyId,
    FeatureCode,
    Enabled,
    EnabledAt,
    Settings,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    AcademyId,
    Email,
    PasswordHash,
    Name,
    Role,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    AcademyId,
    Name,
    StudentNumber,
    Phone,
    Email,
    Grade,
    ParentPhone,
    ParentName,
    Memo,
    Status,
    IsLinked,
    LinkedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentInvites {
    #[sea_orm(iden = "student_invites")]
    Table,
    Id,
    StudentId,
    Token,
    ExpiresAt,
    UsedAt,
    UsedByUserAccountId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserAccounts {
    #[sea_orm(iden = "user_accounts")]
    Table,
    Id,
    Provider,
    ProviderUserId,
    Email,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentLinks {
    #[sea_orm(iden = "student_links")]
    Table,
    Id,
    StudentId,
    UserAccountId,
    LinkedAt,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    AcademyId,
    Name,
    GradeLevel,
    Subject,
    Description,
    TeacherId,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassMembers {
    #[sea_orm(iden = "class_members")]
    Table,
    Id,
    ClassId,
    StudentId,
    JoinedAt,
    LeftAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    AcademyId,
    StudentId,
    Date,
    CheckInTime,
    CheckOutTime,
    Status,
    CheckInMethod,
    CheckOutMethod,
    Memo,
    MarkedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QrCodes {
    #[sea_orm(iden = "qr_codes")]
    Table,
    Id,
    AcademyId,
    Code,
    CodeType,
    IsActive,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Billings {
    #[sea_orm(iden = "billings")]
    Table,
    Id,
    AcademyId,
    StudentId,
    Title,
    Description,
    Amount,
    PaidAmount,
    Status,
    BillingDate,
    DueDate,
    PaymentMethod,
    PaidAt,
    Memo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    AcademyId,
    StudentId,
    BillingId,
    Amount,
    PaymentMethod,
    Status,
    PaidAt,
    Notes,
    CreatedBy,
}

#[derive(DeriveIden)]
enum Homeworks {
    #[sea_orm(iden = "homeworks")]
    Table,
    Id,
    AcademyId,
    Title,
    Description,
    DueDate,
    Subject,
    GradeLevel,
    ClassIds,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HomeworkTargets {
    #[sea_orm(iden = "homework_targets")]
    Table,
    Id,
    HomeworkId,
    StudentId,
    StudentName,
    ClassId,
    ClassName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum HomeworkSubmissions {
    #[sea_orm(iden = "homework_submissions")]
    Table,
    Id,
    HomeworkId,
    StudentId,
    Content,
    Status,
    SubmittedAt,
    Grade,
    Feedback,
    GradedAt,
    GradedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubmissionFiles {
    #[sea_orm(iden = "submission_files")]
    Table,
    Id,
    SubmissionId,
    FileKey,
    FileName,
    FileUrl,
    FileSize,
    MimeType,
    UploadOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notices {
    #[sea_orm(iden = "notices")]
    Table,
    Id,
    AcademyId,
    Title,
    Body,
    Status,
    IsImportant,
    IsPinned,
    ViewCount,
    PublishedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NoticeTargets {
    #[sea_orm(iden = "notice_targets")]
    Table,
    Id,
    NoticeId,
    ClassId,
}

#[derive(DeriveIden)]
enum NoticeAttachments {
    #[sea_orm(iden = "notice_attachments")]
    Table,
    Id,
    NoticeId,
    FileKey,
    FileName,
    FileUrl,
    FileSize,
    MimeType,
}

#[derive(DeriveIden)]
enum CounselingNotes {
    #[sea_orm(iden = "counseling_notes")]
    Table,
    Id,
    AcademyId,
    StudentId,
    CounselorId,
    CounselingDate,
    Duration,
    CounselingType,
    Topic,
    Content,
    ActionItems,
    FollowUpRequired,
    IsConfidential,
    CreatedAt,
    UpdatedAt,
}
