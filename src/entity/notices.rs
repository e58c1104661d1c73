//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub title: String,
    pub body: String,
    pub status: String,
    pub is_important: bool,
    pub is_pinned: bool,
    pub view_count: i64,
    pub published_at: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notice(self) -> crate::models::notices::entities::Notice {
        use super::to_datetime;
        use crate::models::notices::entities::{Notice, NoticeStatus};

        Notice {
            id: self.id,
            academy_id: self.academy_id,
            title: self.title,
            body: self.body,
            status: self
                .status
                .parse::<NoticeStatus>()
                .unwrap_or(NoticeStatus::Draft),
            is_important: self.is_important,
            is_pinned: self.is_pinned,
            view_count: self.view_count,
            published_at: self.published_at.map(to_datetime),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
