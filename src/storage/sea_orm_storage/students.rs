use super::SeaOrmStorage;
use crate::entity::student_invites::{
    ActiveModel as InviteActiveModel, Column as InviteColumn, Entity as StudentInvites,
};
use crate::entity::student_links::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as StudentLinks,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::user_accounts::{
    ActiveModel as AccountActiveModel, Column as AccountColumn, Entity as UserAccounts,
};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{
            InviteState, ProviderProfile, Student, StudentInvite, StudentStatus, UserAccount,
        },
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生（状态 active，未绑定）
    pub async fn create_student_impl(
        &self,
        academy_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academy_id: Set(academy_id),
            name: Set(req.name),
            student_number: Set(req.student_number),
            phone: Set(req.phone),
            email: Set(req.email),
            grade: Set(req.grade),
            parent_phone: Set(req.parent_phone),
            parent_name: Set(req.parent_name),
            memo: Set(req.memo),
            status: Set(StudentStatus::Active.to_string()),
            is_linked: Set(false),
            linked_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_impl(&self, academy_id: i64, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生，最新创建的在前
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Students::find().filter(Column::AcademyId.eq(query.academy_id));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::StudentNumber.contains(&escaped))
                    .add(Column::Phone.contains(&escaped))
                    .add(Column::ParentPhone.contains(&escaped)),
            );
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 部分更新学生
    pub async fn update_student_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_impl(academy_id, id).await?.is_none() {
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
        if let Some(student_number) = update.student_number {
            model.student_number = Set(Some(student_number));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade));
        }
        if let Some(parent_phone) = update.parent_phone {
            model.parent_phone = Set(Some(parent_phone));
        }
        if let Some(parent_name) = update.parent_name {
            model.parent_name = Set(Some(parent_name));
        }
        if let Some(memo) = update.memo {
            model.memo = Set(Some(memo));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 软删除
    pub async fn deactivate_student_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(StudentStatus::Inactive.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("停用学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_active_students_impl(&self, academy_id: i64) -> Result<u64> {
        Students::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Status.eq(StudentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计学生数量失败: {e}")))
    }

    pub async fn list_recent_students_impl(
        &self,
        academy_id: i64,
        limit: u64,
    ) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(Column::AcademyId.eq(academy_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询最近学生失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student()).collect())
    }

    /// 删除旧邀请后写入新邀请
    pub async fn replace_student_invite_impl(
        &self,
        student_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<StudentInvite> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        StudentInvites::delete_many()
            .filter(InviteColumn::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除旧邀请失败: {e}")))?;

        let invite = InviteActiveModel {
            student_id: Set(student_id),
            token: Set(token.to_string()),
            expires_at: Set(expires_at),
            used_at: Set(None),
            used_by_user_account_id: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建邀请失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(invite.into_invite())
    }

    /// 按令牌查询邀请及对应学生
    pub async fn get_invite_by_token_impl(
        &self,
        token: &str,
    ) -> Result<Option<(StudentInvite, Student)>> {
        let Some(invite) = StudentInvites::find()
            .filter(InviteColumn::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询邀请失败: {e}")))?
        else {
            return Ok(None);
        };

        let student = Students::find_by_id(invite.student_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(student.map(|s| (invite.into_invite(), s.into_student())))
    }

    /// 按 (provider, provider_user_id) 写入第三方账号，已存在时刷新资料
    pub async fn upsert_user_account_impl(&self, profile: ProviderProfile) -> Result<UserAccount> {
        let existing = UserAccounts::find()
            .filter(AccountColumn::Provider.eq(&profile.provider))
            .filter(AccountColumn::ProviderUserId.eq(&profile.provider_user_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账号失败: {e}")))?;

        let result = match existing {
            Some(row) => {
                let mut model: AccountActiveModel = row.into();
                if profile.email.is_some() {
                    model.email = Set(profile.email);
                }
                if profile.name.is_some() {
                    model.name = Set(profile.name);
                }
                model.update(&self.db).await
            }
            None => {
                AccountActiveModel {
                    provider: Set(profile.provider),
                    provider_user_id: Set(profile.provider_user_id),
                    email: Set(profile.email),
                    name: Set(profile.name),
                    created_at: Set(chrono::Utc::now().timestamp()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| AcademyError::database_operation(format!("保存账号失败: {e}")))?;

        Ok(result.into_user_account())
    }

    pub async fn get_user_account_impl(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<UserAccount>> {
        let result = UserAccounts::find()
            .filter(AccountColumn::Provider.eq(provider))
            .filter(AccountColumn::ProviderUserId.eq(provider_user_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user_account()))
    }

    /// 使用邀请绑定账号
    ///
    /// 邀请在事务内重新读取，过期或已使用时整体回滚。
    pub async fn redeem_invite_impl(&self, token: &str, user_account_id: i64) -> Result<Student> {
        let now = chrono::Utc::now();
        let ts = now.timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let invite_row = StudentInvites::find()
            .filter(InviteColumn::Token.eq(token))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询邀请失败: {e}")))?
            .ok_or_else(|| AcademyError::not_found("Invite not found"))?;

        match invite_row.clone().into_invite().state_at(now) {
            InviteState::Used => return Err(AcademyError::invite_used("Invite already used")),
            InviteState::Expired => return Err(AcademyError::invite_expired("Invite expired")),
            InviteState::Valid => {}
        }

        let student_id = invite_row.student_id;

        let linked = StudentLinks::find()
            .filter(LinkColumn::StudentId.eq(student_id))
            .filter(LinkColumn::UserAccountId.eq(user_account_id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询绑定失败: {e}")))?;

        if linked.is_none() {
            LinkActiveModel {
                student_id: Set(student_id),
                user_account_id: Set(user_account_id),
                linked_at: Set(ts),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建绑定失败: {e}")))?;
        }

        let student = Students::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .ok_or_else(|| AcademyError::not_found("Student not found"))?;

        let mut student_model: ActiveModel = student.into();
        student_model.status = Set(StudentStatus::Active.to_string());
        student_model.is_linked = Set(true);
        student_model.linked_at = Set(Some(ts));
        student_model.updated_at = Set(ts);
        let student = student_model
            .update(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新学生失败: {e}")))?;

        let mut invite_model: InviteActiveModel = invite_row.into();
        invite_model.used_at = Set(Some(ts));
        invite_model.used_by_user_account_id = Set(Some(user_account_id));
        invite_model
            .update(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新邀请失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(student.into_student())
    }

    /// 账号最近绑定的学生
    pub async fn find_linked_student_impl(&self, user_account_id: i64) -> Result<Option<Student>> {
        let link = StudentLinks::find()
            .filter(LinkColumn::UserAccountId.eq(user_account_id))
            .order_by_desc(LinkColumn::LinkedAt)
            .order_by_desc(LinkColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询绑定失败: {e}")))?;

        let Some(link) = link else {
            return Ok(None);
        };

        let result = Students::find_by_id(link.student_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_student};
    use crate::errors::AcademyError;
    use crate::models::students::{
        entities::{ProviderProfile, StudentStatus},
        requests::{StudentListQuery, UpdateStudentRequest},
    };

    fn kakao(id: &str) -> ProviderProfile {
        ProviderProfile {
            provider: "KAKAO".to_string(),
            provider_user_id: id.to_string(),
            email: None,
            name: Some("카카오".to_string()),
        }
    }

    #[tokio::test]
    async fn test_student_scoped_by_academy() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "a").await;
        let b = seed_academy(&storage, "b").await;
        let student = seed_student(&storage, a, "김철수").await;

        assert!(storage.get_student_impl(a, student.id).await.unwrap().is_some());
        assert!(storage.get_student_impl(b, student.id).await.unwrap().is_none());
        assert!(!storage.deactivate_student_impl(b, student.id).await.unwrap());
        assert!(
            storage
                .update_student_impl(b, student.id, UpdateStudentRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_search_and_status_filter() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "list").await;
        seed_student(&storage, a, "김철수").await;
        let younghee = seed_student(&storage, a, "이영희").await;
        seed_student(&storage, a, "박민수").await;
        storage.deactivate_student_impl(a, younghee.id).await.unwrap();

        let all = storage
            .list_students_with_pagination_impl(StudentListQuery {
                academy_id: a,
                page: 1,
                size: 2,
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);
        assert_eq!(all.pagination.total_pages, 2);
        assert_eq!(all.items.len(), 2);

        let active = storage
            .list_students_with_pagination_impl(StudentListQuery {
                academy_id: a,
                page: 1,
                size: 10,
                status: Some(StudentStatus::Active),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(active.pagination.total, 2);

        let searched = storage
            .list_students_with_pagination_impl(StudentListQuery {
                academy_id: a,
                page: 1,
                size: 10,
                status: None,
                search: Some("영희".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].id, younghee.id);

        assert_eq!(storage.count_active_students_impl(a).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_redeem_invite_links_student_once() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "invite").await;
        let student = seed_student(&storage, a, "최지우").await;
        let expires_at = chrono::Utc::now().timestamp() + 3600;

        storage
            .replace_student_invite_impl(student.id, "old-token", expires_at)
            .await
            .unwrap();
        storage
            .replace_student_invite_impl(student.id, "new-token", expires_at)
            .await
            .unwrap();
        assert!(storage.get_invite_by_token_impl("old-token").await.unwrap().is_none());

        let account = storage.upsert_user_account_impl(kakao("1001")).await.unwrap();
        let again = storage.upsert_user_account_impl(kakao("1001")).await.unwrap();
        assert_eq!(account.id, again.id);

        let linked = storage
            .redeem_invite_impl("new-token", account.id)
            .await
            .unwrap();
        assert!(linked.is_linked);
        assert!(linked.linked_at.is_some());

        let err = storage
            .redeem_invite_impl("new-token", account.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::InviteUsed(_)));

        let found = storage
            .find_linked_student_impl(account.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, student.id);
    }

    #[tokio::test]
    async fn test_redeem_expired_or_unknown_invite() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "expired").await;
        let student = seed_student(&storage, a, "정하늘").await;
        let account = storage.upsert_user_account_impl(kakao("2002")).await.unwrap();

        storage
            .replace_student_invite_impl(student.id, "stale", chrono::Utc::now().timestamp() - 10)
            .await
            .unwrap();

        let err = storage.redeem_invite_impl("stale", account.id).await.unwrap_err();
        assert!(matches!(err, AcademyError::InviteExpired(_)));

        let err = storage.redeem_invite_impl("missing", account.id).await.unwrap_err();
        assert!(matches!(err, AcademyError::NotFound(_)));

        let student = storage.get_student_impl(a, student.id).await.unwrap().unwrap();
        assert!(!student.is_linked);
    }
}
