//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homeworks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    /// JSON 数组
    pub class_ids: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_homework(self) -> crate::models::homeworks::entities::Homework {
        use super::to_datetime;

        crate::models::homeworks::entities::Homework {
            id: self.id,
            academy_id: self.academy_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            subject: self.subject,
            grade_level: self.grade_level,
            class_ids: serde_json::from_str(&self.class_ids).unwrap_or_default(),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
