//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub name: String,
    pub student_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_name: Option<String>,
    pub memo: Option<String>,
    pub status: String,
    pub is_linked: bool,
    pub linked_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academies::Entity",
        from = "Column::AcademyId",
        to = "super::academies::Column::Id"
    )]
    Academy,
}

impl Related<super::academies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Academy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use super::to_datetime;
        use crate::models::students::entities::{Student, StudentStatus};

        Student {
            id: self.id,
            academy_id: self.academy_id,
            name: self.name,
            student_number: self.student_number,
            phone: self.phone,
            email: self.email,
            grade: self.grade,
            parent_phone: self.parent_phone,
            parent_name: self.parent_name,
            memo: self.memo,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Inactive),
            is_linked: self.is_linked,
            linked_at: self.linked_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
