//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homework_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub status: String,
    pub submitted_at: Option<i64>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub graded_at: Option<i64>,
    pub graded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::homeworks::Entity",
        from = "Column::HomeworkId",
        to = "super::homeworks::Column::Id"
    )]
    Homework,
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homework.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(
        self,
        files: Vec<crate::models::homeworks::entities::SubmissionFile>,
    ) -> crate::models::homeworks::entities::Submission {
        use super::to_datetime;
        use crate::models::homeworks::entities::{Submission, SubmissionStatus};

        Submission {
            id: self.id,
            homework_id: self.homework_id,
            student_id: self.student_id,
            content: self.content,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Pending),
            submitted_at: self.submitted_at.map(to_datetime),
            grade: self.grade,
            feedback: self.feedback,
            graded_at: self.graded_at.map(to_datetime),
            graded_by: self.graded_by,
            files,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
