//! 出勤记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub date: Date,
    pub check_in_time: Option<i64>,
    pub check_out_time: Option<i64>,
    pub status: String,
    pub check_in_method: Option<String>,
    pub check_out_method: Option<String>,
    pub memo: Option<String>,
    pub marked_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendance::entities::Attendance {
        use super::to_datetime;
        use crate::models::attendance::entities::{Attendance, AttendanceStatus, CheckMethod};

        Attendance {
            id: self.id,
            academy_id: self.academy_id,
            student_id: self.student_id,
            date: self.date,
            check_in_time: self.check_in_time.map(to_datetime),
            check_out_time: self.check_out_time.map(to_datetime),
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Absent),
            check_in_method: self
                .check_in_method
                .and_then(|m| m.parse::<CheckMethod>().ok()),
            check_out_method: self
                .check_out_method
                .and_then(|m| m.parse::<CheckMethod>().ok()),
            memo: self.memo,
            marked_by: self.marked_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
