use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::class_members::{Column as MemberColumn, Entity as ClassMembers};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::homework_submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submissions,
    Model as SubmissionModel,
};
use crate::entity::homework_targets::{
    ActiveModel as TargetActiveModel, Column as TargetColumn, Entity as HomeworkTargets,
};
use crate::entity::homeworks::{ActiveModel, Column, Entity as Homeworks, Model as HomeworkModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::submission_files::{
    ActiveModel as FileActiveModel, Column as FileColumn, Entity as SubmissionFiles,
};
use crate::errors::{AcademyError, Result};
use crate::models::homeworks::{
    entities::{Homework, Submission, SubmissionFile, SubmissionStatus},
    requests::{
        CreateHomeworkRequest, GradeSubmissionRequest, SubmitHomeworkRequest,
        UpdateHomeworkRequest,
    },
    responses::{HomeworkSummary, StudentHomework, TargetSubmission},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 按提交 ID 分组的附件，组内按 upload_order 排序
async fn files_by_submission<C: ConnectionTrait>(
    db: &C,
    submission_ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<SubmissionFile>>> {
    let rows = SubmissionFiles::find()
        .filter(FileColumn::SubmissionId.is_in(submission_ids))
        .order_by_asc(FileColumn::UploadOrder)
        .order_by_asc(FileColumn::Id)
        .all(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询提交附件失败: {e}")))?;

    let mut grouped: HashMap<i64, Vec<SubmissionFile>> = HashMap::new();
    for row in rows {
        grouped.entry(row.submission_id).or_default().push(row.into_file());
    }
    Ok(grouped)
}

async fn load_submission<C: ConnectionTrait>(db: &C, row: SubmissionModel) -> Result<Submission> {
    let mut files = files_by_submission(db, vec![row.id]).await?;
    let files = files.remove(&row.id).unwrap_or_default();
    Ok(row.into_submission(files))
}

impl SeaOrmStorage {
    /// 为作业列表补充对象人数与班级名
    async fn summarize_homeworks(&self, rows: Vec<HomeworkModel>) -> Result<Vec<HomeworkSummary>> {
        let homework_ids: Vec<i64> = rows.iter().map(|h| h.id).collect();
        let targets = HomeworkTargets::find()
            .filter(TargetColumn::HomeworkId.is_in(homework_ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业对象失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for target in targets {
            *counts.entry(target.homework_id).or_default() += 1;
        }

        let homeworks: Vec<Homework> = rows.into_iter().map(|m| m.into_homework()).collect();
        let class_ids: HashSet<i64> = homeworks
            .iter()
            .flat_map(|h| h.class_ids.iter().copied())
            .collect();
        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(homeworks
            .into_iter()
            .map(|homework| HomeworkSummary {
                target_count: counts.get(&homework.id).copied().unwrap_or(0),
                class_names: homework
                    .class_ids
                    .iter()
                    .filter_map(|id| class_names.get(id).cloned())
                    .collect(),
                homework,
            })
            .collect())
    }

    /// 创建作业并从班级在籍成员生成对象名单
    ///
    /// 同一学生出现在多个班级时只记录第一个班级。
    pub async fn create_homework_impl(
        &self,
        academy_id: i64,
        created_by: i64,
        req: CreateHomeworkRequest,
    ) -> Result<HomeworkSummary> {
        let now = chrono::Utc::now().timestamp();
        let mut class_ids = Vec::with_capacity(req.class_ids.len());
        for id in req.class_ids {
            if !class_ids.contains(&id) {
                class_ids.push(id);
            }
        }
        let class_ids_json = serde_json::to_string(&class_ids)
            .map_err(|e| AcademyError::serialization(format!("序列化班级列表失败: {e}")))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let homework = ActiveModel {
            academy_id: Set(academy_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date),
            subject: Set(req.subject),
            grade_level: Set(req.grade_level),
            class_ids: Set(class_ids_json),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建作业失败: {e}")))?;

        let classes: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::AcademyId.eq(academy_id))
            .filter(ClassColumn::Id.is_in(class_ids.clone()))
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let members = ClassMembers::find()
            .filter(MemberColumn::ClassId.is_in(classes.keys().copied().collect::<Vec<_>>()))
            .filter(MemberColumn::LeftAt.is_null())
            .order_by_asc(MemberColumn::Id)
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询班级成员失败: {e}")))?;

        let student_names: HashMap<i64, String> = Students::find()
            .filter(StudentColumn::AcademyId.eq(academy_id))
            .filter(StudentColumn::Id.is_in(members.iter().map(|m| m.student_id).collect::<Vec<_>>()))
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let mut seen = HashSet::new();
        let mut target_count = 0;
        for class_id in &class_ids {
            let Some(class_name) = classes.get(class_id) else {
                continue;
            };
            for member in members.iter().filter(|m| m.class_id == *class_id) {
                let Some(student_name) = student_names.get(&member.student_id) else {
                    continue;
                };
                if !seen.insert(member.student_id) {
                    continue;
                }
                TargetActiveModel {
                    homework_id: Set(homework.id),
                    student_id: Set(member.student_id),
                    student_name: Set(student_name.clone()),
                    class_id: Set(Some(*class_id)),
                    class_name: Set(Some(class_name.clone())),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("创建作业对象失败: {e}")))?;
                target_count += 1;
            }
        }

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        let class_names = class_ids
            .iter()
            .filter_map(|id| classes.get(id).cloned())
            .collect();

        Ok(HomeworkSummary {
            homework: homework.into_homework(),
            target_count,
            class_names,
        })
    }

    pub async fn get_homework_impl(&self, academy_id: i64, id: i64) -> Result<Option<Homework>> {
        let result = Homeworks::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_homework()))
    }

    /// 列出作业，最新的在前
    pub async fn list_homeworks_impl(&self, academy_id: i64) -> Result<Vec<HomeworkSummary>> {
        let rows = Homeworks::find()
            .filter(Column::AcademyId.eq(academy_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.summarize_homeworks(rows).await
    }

    pub async fn update_homework_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>> {
        if self.get_homework_impl(academy_id, id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date));
        }
        if let Some(subject) = update.subject {
            model.subject = Set(Some(subject));
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(Some(grade_level));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_homework()))
    }

    /// 删除作业，对象与提交随外键级联删除
    pub async fn delete_homework_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = Homeworks::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 对象名单与各自的提交
    pub async fn list_homework_submissions_impl(
        &self,
        homework_id: i64,
    ) -> Result<Vec<TargetSubmission>> {
        let targets = HomeworkTargets::find()
            .filter(TargetColumn::HomeworkId.eq(homework_id))
            .order_by_asc(TargetColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业对象失败: {e}")))?;

        let submissions = Submissions::find()
            .filter(SubmissionColumn::HomeworkId.eq(homework_id))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业提交失败: {e}")))?;

        let mut files =
            files_by_submission(&self.db, submissions.iter().map(|s| s.id).collect()).await?;
        let mut by_student: HashMap<i64, Submission> = submissions
            .into_iter()
            .map(|s| {
                let attached = files.remove(&s.id).unwrap_or_default();
                (s.student_id, s.into_submission(attached))
            })
            .collect();

        Ok(targets
            .into_iter()
            .map(|t| {
                let submission = by_student.remove(&t.student_id);
                TargetSubmission::merge(t.student_id, t.student_name, t.class_name, submission)
            })
            .collect())
    }

    /// 批改提交，作业必须属于该学院
    pub async fn grade_submission_impl(
        &self,
        academy_id: i64,
        submission_id: i64,
        graded_by: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let Some(row) = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业提交失败: {e}")))?
        else {
            return Ok(None);
        };

        if self.get_homework_impl(academy_id, row.homework_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model: SubmissionActiveModel = row.into();
        model.status = Set(SubmissionStatus::Graded.to_string());
        model.grade = Set(Some(req.grade));
        model.feedback = Set(req.feedback);
        model.graded_at = Set(Some(now));
        model.graded_by = Set(Some(graded_by));
        model.updated_at = Set(now);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("批改作业失败: {e}")))?;

        Ok(Some(load_submission(&self.db, result).await?))
    }

    /// 学生被分配的作业及自己的提交，最新的在前
    pub async fn list_student_homeworks_impl(
        &self,
        academy_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentHomework>> {
        let homework_ids: Vec<i64> = HomeworkTargets::find()
            .filter(TargetColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业对象失败: {e}")))?
            .into_iter()
            .map(|t| t.homework_id)
            .collect();

        let homeworks = Homeworks::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Id.is_in(homework_ids))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业失败: {e}")))?;

        let submissions = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .filter(SubmissionColumn::HomeworkId.is_in(homeworks.iter().map(|h| h.id).collect::<Vec<_>>()))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业提交失败: {e}")))?;

        let mut files =
            files_by_submission(&self.db, submissions.iter().map(|s| s.id).collect()).await?;
        let mut by_homework: HashMap<i64, Submission> = submissions
            .into_iter()
            .map(|s| {
                let attached = files.remove(&s.id).unwrap_or_default();
                (s.homework_id, s.into_submission(attached))
            })
            .collect();

        Ok(homeworks
            .into_iter()
            .map(|h| StudentHomework {
                submission: by_homework.remove(&h.id),
                homework: h.into_homework(),
            })
            .collect())
    }

    pub async fn is_homework_target_impl(&self, homework_id: i64, student_id: i64) -> Result<bool> {
        let count = HomeworkTargets::find()
            .filter(TargetColumn::HomeworkId.eq(homework_id))
            .filter(TargetColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业对象失败: {e}")))?;

        Ok(count > 0)
    }

    /// 提交或重新提交，附件整体替换
    pub async fn submit_homework_impl(
        &self,
        homework_id: i64,
        student_id: i64,
        req: SubmitHomeworkRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(SubmissionColumn::HomeworkId.eq(homework_id))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业提交失败: {e}")))?;

        let submission = match existing {
            Some(row) => {
                let mut model: SubmissionActiveModel = row.into();
                model.content = Set(req.content);
                model.status = Set(SubmissionStatus::Submitted.to_string());
                model.submitted_at = Set(Some(now));
                model.updated_at = Set(now);
                model.update(&txn).await
            }
            None => {
                SubmissionActiveModel {
                    homework_id: Set(homework_id),
                    student_id: Set(student_id),
                    content: Set(req.content),
                    status: Set(SubmissionStatus::Submitted.to_string()),
                    submitted_at: Set(Some(now)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
            }
        }
        .map_err(|e| AcademyError::database_operation(format!("保存作业提交失败: {e}")))?;

        SubmissionFiles::delete_many()
            .filter(FileColumn::SubmissionId.eq(submission.id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除旧附件失败: {e}")))?;

        for (order, file) in req.files.into_iter().enumerate() {
            FileActiveModel {
                submission_id: Set(submission.id),
                file_key: Set(file.file_key),
                file_name: Set(file.file_name),
                file_url: Set(file.file_url),
                file_size: Set(file.file_size),
                mime_type: Set(file.mime_type),
                upload_order: Set(order as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("保存附件失败: {e}")))?;
        }

        let submission = load_submission(&txn, submission).await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(submission)
    }

    /// 尚未提交的作业数
    pub async fn count_pending_homework_impl(&self, academy_id: i64, student_id: i64) -> Result<u64> {
        let homework_ids: Vec<i64> = self
            .list_student_homeworks_impl(academy_id, student_id)
            .await?
            .into_iter()
            .filter(|h| {
                h.submission
                    .as_ref()
                    .is_none_or(|s| s.status == SubmissionStatus::Pending)
            })
            .map(|h| h.homework.id)
            .collect();

        Ok(homework_ids.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_class, seed_student};
    use crate::models::homeworks::{
        entities::SubmissionStatus,
        requests::{
            CreateHomeworkRequest, GradeSubmissionRequest, SubmissionFileInput,
            SubmitHomeworkRequest,
        },
    };

    fn homework(class_ids: Vec<i64>) -> CreateHomeworkRequest {
        CreateHomeworkRequest {
            title: "단원평가 풀이".to_string(),
            description: None,
            due_date: None,
            subject: Some("수학".to_string()),
            grade_level: None,
            class_ids,
        }
    }

    fn file(key: &str) -> SubmissionFileInput {
        SubmissionFileInput {
            file_key: key.to_string(),
            file_name: format!("{key}.pdf"),
            file_url: format!("/uploads/{key}"),
            file_size: Some(1024),
            mime_type: Some("application/pdf".to_string()),
        }
    }

    #[tokio::test]
    async fn test_targets_snapshot_active_members_once() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "hw").await;
        let s1 = seed_student(&storage, a, "학생1").await;
        let s2 = seed_student(&storage, a, "학생2").await;
        let s3 = seed_student(&storage, a, "학생3").await;
        let class_a = seed_class(&storage, a, &[s1.id, s2.id]).await;
        let class_b = seed_class(&storage, a, &[s2.id, s3.id]).await;
        storage.remove_class_student_impl(class_b, s3.id).await.unwrap();

        let summary = storage
            .create_homework_impl(a, 1, homework(vec![class_a, class_b, class_a]))
            .await
            .unwrap();
        assert_eq!(summary.target_count, 2);
        assert_eq!(summary.homework.class_ids, vec![class_a, class_b]);
        assert_eq!(summary.class_names.len(), 2);

        // 之后加入班级的学生不会成为对象
        storage.add_class_students_impl(a, class_b, &[s3.id]).await.unwrap();
        let listed = storage.list_homeworks_impl(a).await.unwrap();
        assert_eq!(listed[0].target_count, 2);
        assert!(!storage.is_homework_target_impl(summary.homework.id, s3.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_submit_replaces_files_and_grade() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "sub").await;
        let student = seed_student(&storage, a, "제출자").await;
        let class_id = seed_class(&storage, a, &[student.id]).await;
        let hw = storage
            .create_homework_impl(a, 1, homework(vec![class_id]))
            .await
            .unwrap()
            .homework;

        assert_eq!(storage.count_pending_homework_impl(a, student.id).await.unwrap(), 1);

        storage
            .submit_homework_impl(
                hw.id,
                student.id,
                SubmitHomeworkRequest {
                    content: Some("첫 제출".to_string()),
                    files: vec![file("homework/a"), file("homework/b")],
                },
            )
            .await
            .unwrap();
        let resubmitted = storage
            .submit_homework_impl(
                hw.id,
                student.id,
                SubmitHomeworkRequest {
                    content: Some("다시 제출".to_string()),
                    files: vec![file("homework/c")],
                },
            )
            .await
            .unwrap();
        assert_eq!(resubmitted.files.len(), 1);
        assert_eq!(resubmitted.files[0].file_key, "homework/c");
        assert_eq!(resubmitted.status, SubmissionStatus::Submitted);
        assert_eq!(storage.count_pending_homework_impl(a, student.id).await.unwrap(), 0);

        let other = seed_academy(&storage, "other").await;
        let grade = GradeSubmissionRequest {
            grade: "A".to_string(),
            feedback: Some("잘했어요".to_string()),
        };
        assert!(
            storage
                .grade_submission_impl(other, resubmitted.id, 1, grade.clone())
                .await
                .unwrap()
                .is_none()
        );
        let graded = storage
            .grade_submission_impl(a, resubmitted.id, 1, grade)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.graded_by, Some(1));

        let rows = storage.list_homework_submissions_impl(hw.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].grade.as_deref(), Some("A"));

        let mine = storage.list_student_homeworks_impl(a, student.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(mine[0].submission.is_some());
    }

    #[tokio::test]
    async fn test_delete_homework_scoped() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "del").await;
        let b = seed_academy(&storage, "del2").await;
        let hw = storage
            .create_homework_impl(a, 1, homework(vec![]))
            .await
            .unwrap()
            .homework;

        assert!(!storage.delete_homework_impl(b, hw.id).await.unwrap());
        assert!(storage.delete_homework_impl(a, hw.id).await.unwrap());
        assert!(storage.get_homework_impl(a, hw.id).await.unwrap().is_none());
    }
}
