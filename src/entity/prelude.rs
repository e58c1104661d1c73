//! 预导入模块，方便使用

pub use super::academies::{
    ActiveModel as AcademyActiveModel, Entity as Academies, Model as AcademyModel,
};
pub use super::academy_features::{
    ActiveModel as AcademyFeatureActiveModel, Entity as AcademyFeatures,
    Model as AcademyFeatureModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as AttendanceRecords, Model as AttendanceModel,
};
pub use super::billings::{ActiveModel as BillingActiveModel, Entity as Billings, Model as BillingModel};
pub use super::class_members::{
    ActiveModel as ClassMemberActiveModel, Entity as ClassMembers, Model as ClassMemberModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::counseling_notes::{
    ActiveModel as CounselingNoteActiveModel, Entity as CounselingNotes,
    Model as CounselingNoteModel,
};
pub use super::homework_submissions::{
    ActiveModel as SubmissionActiveModel, Entity as HomeworkSubmissions, Model as SubmissionModel,
};
pub use super::homework_targets::{
    ActiveModel as HomeworkTargetActiveModel, Entity as HomeworkTargets,
    Model as HomeworkTargetModel,
};
pub use super::homeworks::{
    ActiveModel as HomeworkActiveModel, Entity as Homeworks, Model as HomeworkModel,
};
pub use super::notice_attachments::{
    ActiveModel as NoticeAttachmentActiveModel, Entity as NoticeAttachments,
    Model as NoticeAttachmentModel,
};
pub use super::notice_targets::{
    ActiveModel as NoticeTargetActiveModel, Entity as NoticeTargets, Model as NoticeTargetModel,
};
pub use super::notices::{ActiveModel as NoticeActiveModel, Entity as Notices, Model as NoticeModel};
pub use super::payments::{ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel};
pub use super::qr_codes::{ActiveModel as QrCodeActiveModel, Entity as QrCodes, Model as QrCodeModel};
pub use super::student_invites::{
    ActiveModel as StudentInviteActiveModel, Entity as StudentInvites,
    Model as StudentInviteModel,
};
pub use super::student_links::{
    ActiveModel as StudentLinkActiveModel, Entity as StudentLinks, Model as StudentLinkModel,
};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel};
pub use super::submission_files::{
    ActiveModel as SubmissionFileActiveModel, Entity as SubmissionFiles,
    Model as SubmissionFileModel,
};
pub use super::user_accounts::{
    ActiveModel as UserAccountActiveModel, Entity as UserAccounts, Model as UserAccountModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
