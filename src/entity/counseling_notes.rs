//! 咨询记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "counseling_notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub counselor_id: Option<i64>,
    pub counseling_date: Date,
    pub duration: Option<i32>,
    pub counseling_type: String,
    pub topic: String,
    pub content: String,
    pub action_items: Option<String>,
    pub follow_up_required: bool,
    pub is_confidential: bool,
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
    pub fn into_note(self) -> crate::models::counseling::CounselingNote {
        use super::to_datetime;

        crate::models::counseling::CounselingNote {
            id: self.id,
            academy_id: self.academy_id,
            student_id: self.student_id,
            counselor_id: self.counselor_id,
            counseling_date: self.counseling_date,
            duration: self.duration,
            counseling_type: self.counseling_type,
            topic: self.topic,
            content: self.content,
            action_items: self.action_items,
            follow_up_required: self.follow_up_required,
            is_confidential: self.is_confidential,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
