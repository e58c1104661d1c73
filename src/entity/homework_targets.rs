//! 作业对象实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homework_targets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub created_at: i64,
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
    pub fn into_target(self) -> crate::models::homeworks::entities::HomeworkTarget {
        crate::models::homeworks::entities::HomeworkTarget {
            homework_id: self.homework_id,
            student_id: self.student_id,
            student_name: self.student_name,
            class_id: self.class_id,
            class_name: self.class_name,
        }
    }
}
