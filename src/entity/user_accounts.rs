//! 第三方登录账号实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub provider: String,
    pub provider_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user_account(self) -> crate::models::students::entities::UserAccount {
        crate::models::students::entities::UserAccount {
            id: self.id,
            provider: self.provider,
            provider_user_id: self.provider_user_id,
            email: self.email,
            name: self.name,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
