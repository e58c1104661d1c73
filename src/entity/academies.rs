//! 学院实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub owner_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_academy(self) -> crate::models::academies::Academy {
        use super::to_datetime;

        crate::models::academies::Academy {
            id: self.id,
            name: self.name,
            code: self.code,
            owner_name: self.owner_name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            address: self.address,
            subscription_tier: self.subscription_tier,
            subscription_status: self.subscription_status,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
