//! 学院功能开关实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academy_features")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub feature_code: String,
    pub enabled: bool,
    pub enabled_at: Option<i64>,
    pub settings: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_academy_feature(self) -> crate::models::features::AcademyFeature {
        crate::models::features::AcademyFeature {
            academy_id: self.academy_id,
            feature_code: self.feature_code,
            enabled: self.enabled,
            enabled_at: self.enabled_at.map(super::to_datetime),
            settings: self
                .settings
                .and_then(|raw| serde_json::from_str(&raw).ok()),
        }
    }
}
