//! 提交附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submission_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub upload_order: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_file(self) -> crate::models::homeworks::entities::SubmissionFile {
        crate::models::homeworks::entities::SubmissionFile {
            id: self.id,
            file_key: self.file_key,
            file_name: self.file_name,
            file_url: self.file_url,
            file_size: self.file_size,
            mime_type: self.mime_type,
            upload_order: self.upload_order,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
