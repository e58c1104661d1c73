use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::counseling_notes::{ActiveModel, Column, Entity as CounselingNotes};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    counseling::{
        CounselingListQuery, CounselingListResponse, CounselingNote, CounselingRecord,
        CreateCounselingRequest, UpdateCounselingRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

const DEFAULT_COUNSELING_TYPE: &str = "general";

impl SeaOrmStorage {
    /// 创建咨询记录，日期默认今天
    pub async fn create_counseling_impl(
        &self,
        academy_id: i64,
        counselor_id: i64,
        req: CreateCounselingRequest,
    ) -> Result<CounselingNote> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academy_id: Set(academy_id),
            student_id: Set(req.student_id),
            counselor_id: Set(Some(counselor_id)),
            counseling_date: Set(req.counseling_date.unwrap_or_else(crate::utils::time::today)),
            duration: Set(req.duration),
            counseling_type: Set(req
                .counseling_type
                .unwrap_or_else(|| DEFAULT_COUNSELING_TYPE.to_string())),
            topic: Set(req.topic.unwrap_or_default()),
            content: Set(req.content),
            action_items: Set(req.action_items),
            follow_up_required: Set(req.follow_up_required),
            is_confidential: Set(req.is_confidential),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建咨询记录失败: {e}")))?;

        Ok(result.into_note())
    }

    pub async fn get_counseling_impl(
        &self,
        academy_id: i64,
        id: i64,
    ) -> Result<Option<CounselingRecord>> {
        let Some(row) = CounselingNotes::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询咨询记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let student_name = Students::find_by_id(row.student_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .map(|s| s.name)
            .unwrap_or_default();

        Ok(Some(CounselingRecord {
            note: row.into_note(),
            student_name,
        }))
    }

    /// 分页列出咨询记录，按咨询日期倒序
    ///
    /// 指定 `viewer_id` 时，保密记录只保留该咨询师本人的。
    pub async fn list_counseling_with_pagination_impl(
        &self,
        query: CounselingListQuery,
    ) -> Result<CounselingListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = CounselingNotes::find().filter(Column::AcademyId.eq(query.academy_id));
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(viewer_id) = query.viewer_id {
            select = select.filter(
                Condition::any()
                    .add(Column::IsConfidential.eq(false))
                    .add(Column::CounselorId.eq(viewer_id)),
            );
        }
        select = select
            .order_by_desc(Column::CounselingDate)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询咨询记录总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询咨询记录页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询咨询记录列表失败: {e}")))?;

        let names: HashMap<i64, String> = Students::find()
            .filter(StudentColumn::Id.is_in(rows.iter().map(|r| r.student_id).collect::<Vec<_>>()))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        Ok(CounselingListResponse {
            items: rows
                .into_iter()
                .map(|row| CounselingRecord {
                    student_name: names.get(&row.student_id).cloned().unwrap_or_default(),
                    note: row.into_note(),
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_counseling_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateCounselingRequest,
    ) -> Result<Option<CounselingNote>> {
        let Some(row) = CounselingNotes::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询咨询记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = row.into();
        if let Some(counseling_date) = update.counseling_date {
            model.counseling_date = Set(counseling_date);
        }
        if let Some(duration) = update.duration {
            model.duration = Set(Some(duration));
        }
        if let Some(counseling_type) = update.counseling_type {
            model.counseling_type = Set(counseling_type);
        }
        if let Some(topic) = update.topic {
            model.topic = Set(topic);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(action_items) = update.action_items {
            model.action_items = Set(Some(action_items));
        }
        if let Some(follow_up_required) = update.follow_up_required {
            model.follow_up_required = Set(follow_up_required);
        }
        if let Some(is_confidential) = update.is_confidential {
            model.is_confidential = Set(is_confidential);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新咨询记录失败: {e}")))?;

        Ok(Some(result.into_note()))
    }

    pub async fn delete_counseling_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = CounselingNotes::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除咨询记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_student};
    use crate::models::counseling::{CounselingListQuery, CreateCounselingRequest, UpdateCounselingRequest};
    use chrono::NaiveDate;

    fn note(student_id: i64, day: u32, confidential: bool) -> CreateCounselingRequest {
        CreateCounselingRequest {
            student_id,
            counseling_date: NaiveDate::from_ymd_opt(2025, 4, day),
            duration: Some(30),
            counseling_type: Some("parent".to_string()),
            topic: Some("진로 상담".to_string()),
            content: "상담 내용".to_string(),
            action_items: None,
            follow_up_required: false,
            is_confidential: confidential,
        }
    }

    fn query(academy_id: i64, viewer_id: Option<i64>) -> CounselingListQuery {
        CounselingListQuery {
            academy_id,
            page: 1,
            size: 10,
            student_id: None,
            viewer_id,
        }
    }

    #[tokio::test]
    async fn test_confidential_notes_visible_to_counselor_only() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "cs").await;
        let student = seed_student(&storage, a, "상담학생").await;

        storage.create_counseling_impl(a, 10, note(student.id, 1, false)).await.unwrap();
        storage.create_counseling_impl(a, 10, note(student.id, 3, true)).await.unwrap();
        storage.create_counseling_impl(a, 20, note(student.id, 2, true)).await.unwrap();

        let admin_view = storage.list_counseling_with_pagination_impl(query(a, None)).await.unwrap();
        assert_eq!(admin_view.pagination.total, 3);
        assert_eq!(admin_view.items[0].note.counseling_date, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
        assert_eq!(admin_view.items[0].student_name, "상담학생");

        let counselor_view = storage
            .list_counseling_with_pagination_impl(query(a, Some(10)))
            .await
            .unwrap();
        assert_eq!(counselor_view.pagination.total, 2);

        let other_view = storage
            .list_counseling_with_pagination_impl(query(a, Some(30)))
            .await
            .unwrap();
        assert_eq!(other_view.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_scoped() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "cu").await;
        let b = seed_academy(&storage, "cu2").await;
        let student = seed_student(&storage, a, "학생").await;
        let created = storage.create_counseling_impl(a, 1, note(student.id, 5, false)).await.unwrap();
        assert_eq!(created.counseling_type, "parent");

        let update = UpdateCounselingRequest {
            follow_up_required: Some(true),
            ..Default::default()
        };
        assert!(storage.update_counseling_impl(b, created.id, update.clone()).await.unwrap().is_none());
        let updated = storage.update_counseling_impl(a, created.id, update).await.unwrap().unwrap();
        assert!(updated.follow_up_required);

        assert!(storage.get_counseling_impl(b, created.id).await.unwrap().is_none());
        assert!(!storage.delete_counseling_impl(b, created.id).await.unwrap());
        assert!(storage.delete_counseling_impl(a, created.id).await.unwrap());
    }
}
