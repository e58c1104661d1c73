use super::SeaOrmStorage;
use crate::entity::academies::{ActiveModel, Column, Entity as Academies};
use crate::entity::academy_features::{
    ActiveModel as FeatureActiveModel, Column as FeatureColumn, Entity as AcademyFeatures,
};
use crate::errors::{AcademyError, Result};
use crate::models::academies::{Academy, CreateAcademy, UpdateAcademyRequest};
use crate::models::features::AcademyFeature;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建学院
    pub async fn create_academy_impl(&self, req: CreateAcademy) -> Result<Academy> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            owner_name: Set(req.owner_name),
            contact_email: Set(req.contact_email),
            contact_phone: Set(None),
            address: Set(None),
            subscription_tier: Set("basic".to_string()),
            subscription_status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建学院失败: {e}")))?;

        Ok(result.into_academy())
    }

    pub async fn get_academy_by_id_impl(&self, id: i64) -> Result<Option<Academy>> {
        let result = Academies::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_academy()))
    }

    pub async fn get_academy_by_code_impl(&self, code: &str) -> Result<Option<Academy>> {
        let result = Academies::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_academy()))
    }

    /// 更新学院信息，只修改提供的字段
    pub async fn update_academy_impl(
        &self,
        id: i64,
        update: UpdateAcademyRequest,
    ) -> Result<Option<Academy>> {
        if self.get_academy_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(owner_name) = update.owner_name {
            model.owner_name = Set(Some(owner_name));
        }
        if let Some(contact_email) = update.contact_email {
            model.contact_email = Set(Some(contact_email));
        }
        if let Some(contact_phone) = update.contact_phone {
            model.contact_phone = Set(Some(contact_phone));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新学院失败: {e}")))?;

        Ok(Some(result.into_academy()))
    }

    /// 学院已保存的功能开关
    pub async fn list_academy_features_impl(&self, academy_id: i64) -> Result<Vec<AcademyFeature>> {
        let rows = AcademyFeatures::find()
            .filter(FeatureColumn::AcademyId.eq(academy_id))
            .order_by_asc(FeatureColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询功能开关失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_academy_feature()).collect())
    }

    /// 写入功能开关；`settings` 为 None 时保留原有设置
    pub async fn upsert_academy_feature_impl(
        &self,
        academy_id: i64,
        feature_code: &str,
        enabled: bool,
        settings: Option<serde_json::Value>,
    ) -> Result<AcademyFeature> {
        let now = chrono::Utc::now().timestamp();
        let settings = settings
            .map(|value| serde_json::to_string(&value))
            .transpose()
            .map_err(|e| AcademyError::serialization(format!("序列化功能设置失败: {e}")))?;

        let existing = AcademyFeatures::find()
            .filter(FeatureColumn::AcademyId.eq(academy_id))
            .filter(FeatureColumn::FeatureCode.eq(feature_code))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询功能开关失败: {e}")))?;

        let result = match existing {
            Some(row) => {
                // 从关闭切换到开启时刷新启用时间
                let enabled_at = if enabled && !row.enabled {
                    Some(now)
                } else if enabled {
                    row.enabled_at.or(Some(now))
                } else {
                    row.enabled_at
                };

                let mut model: FeatureActiveModel = row.into();
                model.enabled = Set(enabled);
                model.enabled_at = Set(enabled_at);
                if settings.is_some() {
                    model.settings = Set(settings);
                }
                model.update(&self.db).await
            }
            None => {
                FeatureActiveModel {
                    academy_id: Set(academy_id),
                    feature_code: Set(feature_code.to_string()),
                    enabled: Set(enabled),
                    enabled_at: Set(enabled.then_some(now)),
                    settings: Set(settings),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| AcademyError::database_operation(format!("保存功能开关失败: {e}")))?;

        Ok(result.into_academy_feature())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy};
    use crate::models::academies::UpdateAcademyRequest;

    #[tokio::test]
    async fn test_academy_lookup_and_update() {
        let storage = memory_storage().await;
        let academy_id = seed_academy(&storage, "seoul").await;

        let found = storage.get_academy_by_code_impl("seoul").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(academy_id));
        assert!(storage.get_academy_by_code_impl("busan").await.unwrap().is_none());

        let updated = storage
            .update_academy_impl(
                academy_id,
                UpdateAcademyRequest {
                    address: Some("서울시 강남구".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.address.as_deref(), Some("서울시 강남구"));
        assert_eq!(updated.name, "Academy seoul");

        let missing = storage
            .update_academy_impl(academy_id + 100, UpdateAcademyRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_feature_upsert_keeps_single_row() {
        let storage = memory_storage().await;
        let academy_id = seed_academy(&storage, "feat").await;

        let first = storage
            .upsert_academy_feature_impl(
                academy_id,
                "billing",
                false,
                Some(serde_json::json!({"due_day": 10})),
            )
            .await
            .unwrap();
        assert!(!first.enabled);
        assert!(first.enabled_at.is_none());

        let second = storage
            .upsert_academy_feature_impl(academy_id, "billing", true, None)
            .await
            .unwrap();
        assert!(second.enabled);
        assert!(second.enabled_at.is_some());
        assert_eq!(second.settings, Some(serde_json::json!({"due_day": 10})));

        let features = storage.list_academy_features_impl(academy_id).await.unwrap();
        assert_eq!(features.len(), 1);
    }
}
