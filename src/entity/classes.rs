//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub name: String,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_active: bool,
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

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use super::to_datetime;

        crate::models::classes::entities::Class {
            id: self.id,
            academy_id: self.academy_id,
            name: self.name,
            grade_level: self.grade_level,
            subject: self.subject,
            description: self.description,
            teacher_id: self.teacher_id,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
