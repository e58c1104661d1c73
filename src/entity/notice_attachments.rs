//! 公告附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notice_attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub notice_id: i64,
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attachment(self) -> crate::models::notices::entities::NoticeAttachment {
        crate::models::notices::entities::NoticeAttachment {
            id: self.id,
            file_key: self.file_key,
            file_name: self.file_name,
            file_url: self.file_url,
            file_size: self.file_size,
            mime_type: self.mime_type,
        }
    }
}
