use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AcademyError, Result};
use crate::models::users::{
    entities::{User, UserStatus},
    requests::CreateUser,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教职工账号
    pub async fn create_user_impl(&self, req: CreateUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academy_id: Set(req.academy_id),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            name: Set(req.name),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 学院内的教职工，按创建时间排序
    pub async fn list_staff_impl(&self, academy_id: i64) -> Result<Vec<User>> {
        let rows = Users::find()
            .filter(Column::AcademyId.eq(academy_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询教职工列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy};
    use crate::models::users::{entities::UserRole, requests::CreateUser};

    fn staff(academy_id: i64, email: &str, role: UserRole) -> CreateUser {
        CreateUser {
            academy_id,
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "선생님".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_staff_scoped_by_academy() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "a").await;
        let b = seed_academy(&storage, "b").await;

        storage
            .create_user_impl(staff(a, "admin@a.test", UserRole::Admin))
            .await
            .unwrap();
        storage
            .create_user_impl(staff(a, "teacher@a.test", UserRole::Teacher))
            .await
            .unwrap();
        storage
            .create_user_impl(staff(b, "admin@b.test", UserRole::Admin))
            .await
            .unwrap();

        let list = storage.list_staff_impl(a).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|u| u.academy_id == a));
    }

    #[tokio::test]
    async fn test_email_is_unique_and_last_login_updates() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "u").await;

        let user = storage
            .create_user_impl(staff(a, "dup@a.test", UserRole::Teacher))
            .await
            .unwrap();
        assert!(user.last_login.is_none());

        let dup = storage
            .create_user_impl(staff(a, "dup@a.test", UserRole::Teacher))
            .await;
        assert!(dup.is_err());

        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        let reloaded = storage
            .get_user_by_email_impl("dup@a.test")
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
