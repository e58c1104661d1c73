use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::notice_attachments::{
    ActiveModel as AttachmentActiveModel, Column as AttachmentColumn, Entity as NoticeAttachments,
};
use crate::entity::notice_targets::{
    ActiveModel as TargetActiveModel, Column as TargetColumn, Entity as NoticeTargets,
};
use crate::entity::notices::{ActiveModel, Column, Entity as Notices, Model as NoticeModel};
use crate::errors::{AcademyError, Result};
use crate::models::notices::{
    entities::{Notice, NoticeStatus, NoticeTargetClass},
    requests::{CreateNoticeRequest, UpdateNoticeRequest},
    responses::{NoticeDetailResponse, NoticeSummary},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 去重并保持原有顺序
fn dedup_ids(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// 加载公告的目标班级与附件
async fn load_detail<C: ConnectionTrait>(db: &C, row: NoticeModel) -> Result<NoticeDetailResponse> {
    let targets = NoticeTargets::find()
        .filter(TargetColumn::NoticeId.eq(row.id))
        .order_by_asc(TargetColumn::Id)
        .all(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询公告对象失败: {e}")))?;

    let class_names: HashMap<i64, String> = Classes::find()
        .filter(ClassColumn::Id.is_in(targets.iter().map(|t| t.class_id).collect::<Vec<_>>()))
        .all(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询班级失败: {e}")))?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let attachments = NoticeAttachments::find()
        .filter(AttachmentColumn::NoticeId.eq(row.id))
        .order_by_asc(AttachmentColumn::Id)
        .all(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询公告附件失败: {e}")))?;

    Ok(NoticeDetailResponse {
        notice: row.into_notice(),
        target_classes: targets
            .into_iter()
            .map(|t| NoticeTargetClass {
                class_name: class_names.get(&t.class_id).cloned().unwrap_or_default(),
                class_id: t.class_id,
            })
            .collect(),
        attachments: attachments.into_iter().map(|a| a.into_attachment()).collect(),
    })
}

/// 替换公告的目标班级
async fn replace_targets<C: ConnectionTrait>(db: &C, notice_id: i64, class_ids: Vec<i64>) -> Result<()> {
    NoticeTargets::delete_many()
        .filter(TargetColumn::NoticeId.eq(notice_id))
        .exec(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("删除公告对象失败: {e}")))?;

    for class_id in dedup_ids(class_ids) {
        TargetActiveModel {
            notice_id: Set(notice_id),
            class_id: Set(class_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建公告对象失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 补充目标班级数与附件数
    async fn summarize_notices(&self, rows: Vec<NoticeModel>) -> Result<Vec<NoticeSummary>> {
        let ids: Vec<i64> = rows.iter().map(|n| n.id).collect();

        let mut target_counts: HashMap<i64, i64> = HashMap::new();
        for target in NoticeTargets::find()
            .filter(TargetColumn::NoticeId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告对象失败: {e}")))?
        {
            *target_counts.entry(target.notice_id).or_default() += 1;
        }

        let mut attachment_counts: HashMap<i64, i64> = HashMap::new();
        for attachment in NoticeAttachments::find()
            .filter(AttachmentColumn::NoticeId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告附件失败: {e}")))?
        {
            *attachment_counts.entry(attachment.notice_id).or_default() += 1;
        }

        Ok(rows
            .into_iter()
            .map(|row| NoticeSummary {
                target_count: target_counts.get(&row.id).copied().unwrap_or(0),
                attachment_count: attachment_counts.get(&row.id).copied().unwrap_or(0),
                notice: row.into_notice(),
            })
            .collect())
    }

    /// 学生当前所在班级能看到的公告 ID
    async fn student_notice_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        let class_ids = self.list_student_class_ids_impl(student_id).await?;
        let rows = NoticeTargets::find()
            .filter(TargetColumn::ClassId.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告对象失败: {e}")))?;

        Ok(dedup_ids(rows.into_iter().map(|t| t.notice_id).collect()))
    }

    /// 创建公告，目标班级与附件在同一事务内写入
    pub async fn create_notice_impl(
        &self,
        academy_id: i64,
        created_by: i64,
        req: CreateNoticeRequest,
    ) -> Result<NoticeDetailResponse> {
        let now = chrono::Utc::now().timestamp();
        let status = req.status.unwrap_or(NoticeStatus::Published);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let notice = ActiveModel {
            academy_id: Set(academy_id),
            title: Set(req.title),
            body: Set(req.body),
            status: Set(status.to_string()),
            is_important: Set(req.is_important),
            is_pinned: Set(req.is_pinned),
            view_count: Set(0),
            published_at: Set((status == NoticeStatus::Published).then_some(now)),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建公告失败: {e}")))?;

        replace_targets(&txn, notice.id, req.class_ids).await?;

        for attachment in req.attachments {
            AttachmentActiveModel {
                notice_id: Set(notice.id),
                file_key: Set(attachment.file_key),
                file_name: Set(attachment.file_name),
                file_url: Set(attachment.file_url),
                file_size: Set(attachment.file_size),
                mime_type: Set(attachment.mime_type),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("保存公告附件失败: {e}")))?;
        }

        let detail = load_detail(&txn, notice).await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(detail)
    }

    /// 学院全部公告，置顶优先，其次最新
    pub async fn list_notices_impl(&self, academy_id: i64) -> Result<Vec<NoticeSummary>> {
        let rows = Notices::find()
            .filter(Column::AcademyId.eq(academy_id))
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告列表失败: {e}")))?;

        self.summarize_notices(rows).await
    }

    /// 面向学生所在班级的已发布公告
    pub async fn list_student_notices_impl(
        &self,
        academy_id: i64,
        student_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<NoticeSummary>> {
        let notice_ids = self.student_notice_ids(student_id).await?;

        let mut select = Notices::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Status.eq(NoticeStatus::Published.to_string()))
            .filter(Column::Id.is_in(notice_ids))
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生公告失败: {e}")))?;

        self.summarize_notices(rows).await
    }

    pub async fn get_notice_detail_impl(
        &self,
        academy_id: i64,
        id: i64,
    ) -> Result<Option<NoticeDetailResponse>> {
        let row = Notices::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告失败: {e}")))?;

        match row {
            Some(row) => Ok(Some(load_detail(&self.db, row).await?)),
            None => Ok(None),
        }
    }

    /// 已发布且面向学生所在的某个班级
    pub async fn is_notice_visible_to_student_impl(
        &self,
        notice_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let published = Notices::find_by_id(notice_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告失败: {e}")))?
            .is_some_and(|n| n.status == NoticeStatus::Published.as_str());
        if !published {
            return Ok(false);
        }

        Ok(self.student_notice_ids(student_id).await?.contains(&notice_id))
    }

    pub async fn increment_notice_views_impl(&self, id: i64) -> Result<()> {
        let Some(row) = Notices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告失败: {e}")))?
        else {
            return Ok(());
        };

        let view_count = row.view_count + 1;
        let mut model: ActiveModel = row.into();
        model.view_count = Set(view_count);
        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新浏览次数失败: {e}")))?;

        Ok(())
    }

    /// 部分更新公告；提供 class_ids 时整体替换目标班级
    pub async fn update_notice_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<NoticeDetailResponse>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(row) = Notices::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告失败: {e}")))?
        else {
            return Ok(None);
        };

        let published_at = row.published_at;
        let mut model: ActiveModel = row.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(body) = update.body {
            model.body = Set(body);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
            if status == NoticeStatus::Published && published_at.is_none() {
                model.published_at = Set(Some(now));
            }
        }
        if let Some(is_important) = update.is_important {
            model.is_important = Set(is_important);
        }
        if let Some(is_pinned) = update.is_pinned {
            model.is_pinned = Set(is_pinned);
        }
        model.updated_at = Set(now);

        let notice = model
            .update(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新公告失败: {e}")))?;

        if let Some(class_ids) = update.class_ids {
            replace_targets(&txn, notice.id, class_ids).await?;
        }

        let detail = load_detail(&txn, notice).await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(detail))
    }

    /// 发布公告，已发布的保留原发布时间
    pub async fn publish_notice_impl(&self, academy_id: i64, id: i64) -> Result<Option<Notice>> {
        let Some(row) = Notices::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询公告失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let published_at = row.published_at.unwrap_or(now);
        let mut model: ActiveModel = row.into();
        model.status = Set(NoticeStatus::Published.to_string());
        model.published_at = Set(Some(published_at));
        model.updated_at = Set(now);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("发布公告失败: {e}")))?;

        Ok(Some(result.into_notice()))
    }

    pub async fn delete_notice_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = Notices::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_class, seed_student};
    use crate::models::notices::{
        entities::NoticeStatus,
        requests::{CreateNoticeRequest, NoticeAttachmentInput, UpdateNoticeRequest},
    };

    fn notice(title: &str, class_ids: Vec<i64>, status: NoticeStatus, pinned: bool) -> CreateNoticeRequest {
        CreateNoticeRequest {
            title: title.to_string(),
            body: "내용".to_string(),
            class_ids,
            status: Some(status),
            is_important: false,
            is_pinned: pinned,
            attachments: vec![NoticeAttachmentInput {
                file_key: "homework/notice.pdf".to_string(),
                file_name: "안내문.pdf".to_string(),
                file_url: "/uploads/homework/notice.pdf".to_string(),
                file_size: None,
                mime_type: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_student_sees_only_published_targeted_notices() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "nt").await;
        let student = seed_student(&storage, a, "공지학생").await;
        let mine = seed_class(&storage, a, &[student.id]).await;
        let other = seed_class(&storage, a, &[]).await;

        let visible = storage
            .create_notice_impl(a, 1, notice("보임", vec![mine, other], NoticeStatus::Published, false))
            .await
            .unwrap();
        let draft = storage
            .create_notice_impl(a, 1, notice("초안", vec![mine], NoticeStatus::Draft, false))
            .await
            .unwrap();
        storage
            .create_notice_impl(a, 1, notice("다른반", vec![other], NoticeStatus::Published, false))
            .await
            .unwrap();

        assert_eq!(visible.target_classes.len(), 2);
        assert_eq!(visible.attachments.len(), 1);
        assert!(visible.notice.published_at.is_some());
        assert!(draft.notice.published_at.is_none());

        let list = storage.list_student_notices_impl(a, student.id, None).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].notice.id, visible.notice.id);
        assert_eq!(list[0].target_count, 2);
        assert_eq!(list[0].attachment_count, 1);

        assert!(storage.is_notice_visible_to_student_impl(visible.notice.id, student.id).await.unwrap());
        assert!(!storage.is_notice_visible_to_student_impl(draft.notice.id, student.id).await.unwrap());

        storage.publish_notice_impl(a, draft.notice.id).await.unwrap().unwrap();
        assert_eq!(storage.list_student_notices_impl(a, student.id, Some(5)).await.unwrap().len(), 2);

        // 离开班级后不再可见
        storage.remove_class_student_impl(mine, student.id).await.unwrap();
        assert!(storage.list_student_notices_impl(a, student.id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pinned_first_and_update_targets() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "pin").await;
        let c1 = seed_class(&storage, a, &[]).await;
        let c2 = seed_class(&storage, a, &[]).await;

        let pinned = storage
            .create_notice_impl(a, 1, notice("고정", vec![c1], NoticeStatus::Published, true))
            .await
            .unwrap();
        storage
            .create_notice_impl(a, 1, notice("일반", vec![c1], NoticeStatus::Published, false))
            .await
            .unwrap();

        let list = storage.list_notices_impl(a).await.unwrap();
        assert_eq!(list[0].notice.id, pinned.notice.id);

        let updated = storage
            .update_notice_impl(
                a,
                pinned.notice.id,
                UpdateNoticeRequest {
                    class_ids: Some(vec![c2, c2]),
                    is_pinned: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.target_classes.len(), 1);
        assert_eq!(updated.target_classes[0].class_id, c2);
        assert!(!updated.notice.is_pinned);

        storage.increment_notice_views_impl(pinned.notice.id).await.unwrap();
        storage.increment_notice_views_impl(pinned.notice.id).await.unwrap();
        let detail = storage
            .get_notice_detail_impl(a, pinned.notice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.notice.view_count, 2);

        let other = seed_academy(&storage, "pin2").await;
        assert!(storage.get_notice_detail_impl(other, pinned.notice.id).await.unwrap().is_none());
        assert!(!storage.delete_notice_impl(other, pinned.notice.id).await.unwrap());
        assert!(storage.delete_notice_impl(a, pinned.notice.id).await.unwrap());
    }
}
