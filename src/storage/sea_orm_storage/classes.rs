use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::class_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as ClassMembers,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{AcademyError, Result};
use crate::models::classes::{
    entities::{Class, ClassMember},
    requests::{CreateClassRequest, UpdateClassRequest},
    responses::ClassSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, academy_id: i64, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academy_id: Set(academy_id),
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            subject: Set(req.subject),
            description: Set(req.description),
            teacher_id: Set(req.teacher_id),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过ID获取班级
    pub async fn get_class_impl(&self, academy_id: i64, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级及在籍人数，最新创建的在前
    pub async fn list_classes_impl(&self, academy_id: i64) -> Result<Vec<ClassSummary>> {
        let classes = Classes::find()
            .filter(Column::AcademyId.eq(academy_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级列表失败: {e}")))?;

        let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
        let members = ClassMembers::find()
            .filter(MemberColumn::ClassId.is_in(class_ids))
            .filter(MemberColumn::LeftAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级成员失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for member in members {
            *counts.entry(member.class_id).or_default() += 1;
        }

        Ok(classes
            .into_iter()
            .map(|m| {
                let student_count = counts.get(&m.id).copied().unwrap_or(0);
                ClassSummary {
                    class: m.into_class(),
                    student_count,
                }
            })
            .collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_impl(academy_id, id).await?.is_none() {
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
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(Some(grade_level));
        }
        if let Some(subject) = update.subject {
            model.subject = Set(Some(subject));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级，成员关系随外键级联删除
    pub async fn delete_class_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = Classes::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计属于该学院的班级数（去重）
    pub async fn count_academy_classes_impl(&self, academy_id: i64, class_ids: &[i64]) -> Result<u64> {
        if class_ids.is_empty() {
            return Ok(0);
        }

        let mut ids = class_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        Classes::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Id.is_in(ids))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计班级失败: {e}")))
    }

    /// 班级在籍成员，按加入时间排序
    pub async fn list_class_members_impl(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        let members = ClassMembers::find()
            .filter(MemberColumn::ClassId.eq(class_id))
            .filter(MemberColumn::LeftAt.is_null())
            .order_by_asc(MemberColumn::JoinedAt)
            .order_by_asc(MemberColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级成员失败: {e}")))?;

        let student_ids: Vec<i64> = members.iter().map(|m| m.student_id).collect();
        let students: HashMap<i64, _> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(members
            .into_iter()
            .filter_map(|member| {
                let student = students.get(&member.student_id)?;
                Some(ClassMember {
                    class_id: member.class_id,
                    student_id: member.student_id,
                    student_name: student.name.clone(),
                    student_number: student.student_number.clone(),
                    grade: student.grade.clone(),
                    joined_at: crate::entity::to_datetime(member.joined_at),
                })
            })
            .collect())
    }

    /// 添加学生到班级
    ///
    /// 已在籍的学生跳过；曾离开的学生清除 `left_at` 重新加入。
    /// 任一学生不属于该学院时整体失败。
    pub async fn add_class_students_impl(
        &self,
        academy_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        let mut ids = student_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let known = Students::find()
            .filter(StudentColumn::AcademyId.eq(academy_id))
            .filter(StudentColumn::Id.is_in(ids.clone()))
            .count(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?;
        if known != ids.len() as u64 {
            return Err(AcademyError::not_found("Student not found"));
        }

        let existing: HashMap<i64, _> = ClassMembers::find()
            .filter(MemberColumn::ClassId.eq(class_id))
            .filter(MemberColumn::StudentId.is_in(ids.clone()))
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级成员失败: {e}")))?
            .into_iter()
            .map(|m| (m.student_id, m))
            .collect();

        let mut added = Vec::new();
        for student_id in ids {
            match existing.get(&student_id) {
                Some(member) if member.left_at.is_none() => continue,
                Some(member) => {
                    let mut model: MemberActiveModel = member.clone().into();
                    model.left_at = Set(None);
                    model.joined_at = Set(now);
                    model.update(&txn).await.map_err(|e| {
                        AcademyError::database_operation(format!("恢复班级成员失败: {e}"))
                    })?;
                }
                None => {
                    MemberActiveModel {
                        class_id: Set(class_id),
                        student_id: Set(student_id),
                        joined_at: Set(now),
                        left_at: Set(None),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| {
                        AcademyError::database_operation(format!("添加班级成员失败: {e}"))
                    })?;
                }
            }
            added.push(student_id);
        }

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(added)
    }

    /// 学生离开班级
    pub async fn remove_class_student_impl(&self, class_id: i64, student_id: i64) -> Result<bool> {
        let result = ClassMembers::update_many()
            .col_expr(
                MemberColumn::LeftAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(MemberColumn::ClassId.eq(class_id))
            .filter(MemberColumn::StudentId.eq(student_id))
            .filter(MemberColumn::LeftAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("移除班级成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生当前所在的班级
    pub async fn list_student_class_ids_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        let rows = ClassMembers::find()
            .filter(MemberColumn::StudentId.eq(student_id))
            .filter(MemberColumn::LeftAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生班级失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.class_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_request, memory_storage, seed_academy, seed_student};
    use crate::errors::AcademyError;
    use crate::models::classes::requests::UpdateClassRequest;

    #[tokio::test]
    async fn test_membership_leave_and_rejoin() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "cls").await;
        let class = storage.create_class_impl(a, class_request("수학 A반")).await.unwrap();
        let s1 = seed_student(&storage, a, "학생1").await;
        let s2 = seed_student(&storage, a, "학생2").await;

        let added = storage
            .add_class_students_impl(a, class.id, &[s1.id, s2.id, s1.id])
            .await
            .unwrap();
        assert_eq!(added, vec![s1.id, s2.id]);

        // 已在籍的学生不会重复加入
        let added = storage
            .add_class_students_impl(a, class.id, &[s1.id])
            .await
            .unwrap();
        assert!(added.is_empty());

        assert!(storage.remove_class_student_impl(class.id, s1.id).await.unwrap());
        assert!(!storage.remove_class_student_impl(class.id, s1.id).await.unwrap());

        let summary = storage.list_classes_impl(a).await.unwrap();
        assert_eq!(summary[0].student_count, 1);

        let added = storage
            .add_class_students_impl(a, class.id, &[s1.id])
            .await
            .unwrap();
        assert_eq!(added, vec![s1.id]);

        let members = storage.list_class_members_impl(class.id).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(storage.list_student_class_ids_impl(s1.id).await.unwrap(), vec![class.id]);
    }

    #[tokio::test]
    async fn test_foreign_student_rejected() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "own").await;
        let b = seed_academy(&storage, "other").await;
        let class = storage.create_class_impl(a, class_request("영어")).await.unwrap();
        let outsider = seed_student(&storage, b, "외부학생").await;

        let err = storage
            .add_class_students_impl(a, class.id, &[outsider.id])
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::NotFound(_)));
        assert!(storage.list_class_members_impl(class.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_class_scoped_update_and_delete() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "x").await;
        let b = seed_academy(&storage, "y").await;
        let class = storage.create_class_impl(a, class_request("국어")).await.unwrap();

        assert!(storage.get_class_impl(b, class.id).await.unwrap().is_none());
        let updated = storage
            .update_class_impl(
                a,
                class.id,
                UpdateClassRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.name, "국어");

        assert_eq!(
            storage.count_academy_classes_impl(a, &[class.id, class.id]).await.unwrap(),
            1
        );
        assert_eq!(storage.count_academy_classes_impl(b, &[class.id]).await.unwrap(), 0);

        assert!(!storage.delete_class_impl(b, class.id).await.unwrap());
        assert!(storage.delete_class_impl(a, class.id).await.unwrap());
        assert!(storage.get_class_impl(a, class.id).await.unwrap().is_none());
    }
}
