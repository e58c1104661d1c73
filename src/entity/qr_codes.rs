//! 签到二维码实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub code_type: String,
    pub is_active: bool,
    pub expires_at: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_qr_code(self) -> crate::models::attendance::entities::QrCode {
        use super::to_datetime;

        crate::models::attendance::entities::QrCode {
            id: self.id,
            academy_id: self.academy_id,
            code: self.code,
            code_type: self.code_type,
            is_active: self.is_active,
            expires_at: self.expires_at.map(to_datetime),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
        }
    }
}
