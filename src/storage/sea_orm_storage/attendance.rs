use std::collections::HashMap;

use chrono::NaiveDate;

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRows, Model};
use crate::entity::qr_codes::{
    ActiveModel as QrActiveModel, Column as QrColumn, Entity as QrCodes,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{AcademyError, Result};
use crate::models::attendance::{
    entities::{Attendance, QrCode},
    requests::{UpdateAttendanceRequest, UpsertAttendance},
    responses::AttendanceRecord,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use tracing::debug;

/// 在已有记录上覆盖状态，其余字段只覆盖提供的值
fn merge_attendance(row: Model, record: &UpsertAttendance, now: i64) -> ActiveModel {
    let mut model: ActiveModel = row.into();
    model.status = Set(record.status.to_string());
    if let Some(check_in_time) = record.check_in_time {
        model.check_in_time = Set(Some(check_in_time.timestamp()));
    }
    if let Some(check_out_time) = record.check_out_time {
        model.check_out_time = Set(Some(check_out_time.timestamp()));
    }
    if let Some(method) = record.check_in_method {
        model.check_in_method = Set(Some(method.to_string()));
    }
    if let Some(method) = record.check_out_method {
        model.check_out_method = Set(Some(method.to_string()));
    }
    if record.memo.is_some() {
        model.memo = Set(record.memo.clone());
    }
    if record.marked_by.is_some() {
        model.marked_by = Set(record.marked_by);
    }
    model.updated_at = Set(now);
    model
}

fn new_attendance(record: &UpsertAttendance, now: i64) -> ActiveModel {
    ActiveModel {
        academy_id: Set(record.academy_id),
        student_id: Set(record.student_id),
        date: Set(record.date),
        check_in_time: Set(record.check_in_time.map(|t| t.timestamp())),
        check_out_time: Set(record.check_out_time.map(|t| t.timestamp())),
        status: Set(record.status.to_string()),
        check_in_method: Set(record.check_in_method.map(|m| m.to_string())),
        check_out_method: Set(record.check_out_method.map(|m| m.to_string())),
        memo: Set(record.memo.clone()),
        marked_by: Set(record.marked_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

impl SeaOrmStorage {
    /// 写入出勤记录
    ///
    /// 先插入；(student_id, date) 唯一索引冲突时读取已有记录并合并。
    /// 同一学生同一天的并发签到因此不会失败。
    pub async fn upsert_attendance_impl(&self, record: UpsertAttendance) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        match new_attendance(&record, now).insert(&self.db).await {
            Ok(row) => return Ok(row.into_attendance()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(
                    "Attendance for student {} on {} already exists, merging",
                    record.student_id, record.date
                );
            }
            Err(e) => {
                return Err(AcademyError::database_operation(format!(
                    "保存出勤记录失败: {e}"
                )));
            }
        }

        let existing = AttendanceRows::find()
            .filter(Column::AcademyId.eq(record.academy_id))
            .filter(Column::StudentId.eq(record.student_id))
            .filter(Column::Date.eq(record.date))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询出勤记录失败: {e}")))?
            // 同一学生的记录属于其他学院
            .ok_or_else(|| AcademyError::conflict("Attendance belongs to another academy"))?;

        let result = merge_attendance(existing, &record, now)
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("保存出勤记录失败: {e}")))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_impl(&self, academy_id: i64, id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceRows::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询出勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn get_attendance_for_day_impl(
        &self,
        academy_id: i64,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = AttendanceRows::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询出勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn update_attendance_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        let Some(row) = AttendanceRows::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询出勤记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = row.into();
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(check_in_time) = update.check_in_time {
            model.check_in_time = Set(Some(check_in_time.timestamp()));
        }
        if let Some(check_out_time) = update.check_out_time {
            model.check_out_time = Set(Some(check_out_time.timestamp()));
        }
        if let Some(memo) = update.memo {
            model.memo = Set(Some(memo));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新出勤记录失败: {e}")))?;

        Ok(Some(result.into_attendance()))
    }

    /// 某天的出勤记录（带学生姓名），最新的在前
    pub async fn list_attendance_by_date_impl(
        &self,
        academy_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let rows = AttendanceRows::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Date.eq(date))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询出勤列表失败: {e}")))?;

        let student_ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
        let students: HashMap<i64, _> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let student = students.get(&row.student_id);
                AttendanceRecord {
                    student_name: student.map(|s| s.name.clone()).unwrap_or_default(),
                    student_number: student.and_then(|s| s.student_number.clone()),
                    attendance: row.into_attendance(),
                }
            })
            .collect())
    }

    /// 学生在 [from, to) 内的出勤记录，按日期倒序
    pub async fn list_student_attendance_impl(
        &self,
        academy_id: i64,
        student_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        let rows = AttendanceRows::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.gte(from))
            .filter(Column::Date.lt(to))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生出勤失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn create_qr_code_impl(
        &self,
        academy_id: i64,
        code: &str,
        code_type: &str,
        expires_at: Option<i64>,
        created_by: i64,
    ) -> Result<QrCode> {
        let result = QrActiveModel {
            academy_id: Set(academy_id),
            code: Set(code.to_string()),
            code_type: Set(code_type.to_string()),
            is_active: Set(true),
            expires_at: Set(expires_at),
            created_by: Set(Some(created_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建二维码失败: {e}")))?;

        Ok(result.into_qr_code())
    }

    pub async fn list_qr_codes_impl(&self, academy_id: i64) -> Result<Vec<QrCode>> {
        let rows = QrCodes::find()
            .filter(QrColumn::AcademyId.eq(academy_id))
            .order_by_desc(QrColumn::CreatedAt)
            .order_by_desc(QrColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询二维码失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_qr_code()).collect())
    }

    pub async fn get_qr_code_by_code_impl(&self, code: &str) -> Result<Option<QrCode>> {
        let result = QrCodes::find()
            .filter(QrColumn::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询二维码失败: {e}")))?;

        Ok(result.map(|m| m.into_qr_code()))
    }

    pub async fn deactivate_qr_code_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = QrCodes::update_many()
            .col_expr(QrColumn::IsActive, sea_orm::sea_query::Expr::value(false))
            .filter(QrColumn::Id.eq(id))
            .filter(QrColumn::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("停用二维码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_student};
    use crate::models::attendance::{
        entities::{AttendanceStatus, CheckMethod},
        requests::{UpdateAttendanceRequest, UpsertAttendance},
    };
    use chrono::NaiveDate;

    fn record(academy_id: i64, student_id: i64, date: NaiveDate, status: AttendanceStatus) -> UpsertAttendance {
        UpsertAttendance {
            academy_id,
            student_id,
            date,
            status,
            check_in_time: None,
            check_out_time: None,
            check_in_method: Some(CheckMethod::Manual),
            check_out_method: None,
            memo: None,
            marked_by: None,
        }
    }

    #[tokio::test]
    async fn test_one_record_per_student_per_day() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "att").await;
        let student = seed_student(&storage, a, "출석학생").await;
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let first = storage
            .upsert_attendance_impl(record(a, student.id, day, AttendanceStatus::Late))
            .await
            .unwrap();
        let mut second = record(a, student.id, day, AttendanceStatus::Present);
        second.memo = Some("정정".to_string());
        let second = storage.upsert_attendance_impl(second).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Present);
        assert_eq!(second.memo.as_deref(), Some("정정"));

        let list = storage.list_attendance_by_date_impl(a, day).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].student_name, "출석학생");
    }

    #[tokio::test]
    async fn test_simultaneous_check_ins_share_one_record() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "dup").await;
        let student = seed_student(&storage, a, "동시").await;
        let day = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();

        let mut by_qr = record(a, student.id, day, AttendanceStatus::Present);
        by_qr.check_in_method = Some(CheckMethod::Qr);
        let mut by_staff = record(a, student.id, day, AttendanceStatus::Present);
        by_staff.marked_by = Some(9);

        let (first, second) = tokio::join!(
            storage.upsert_attendance_impl(by_qr),
            storage.upsert_attendance_impl(by_staff),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(first.id, second.id);

        let list = storage.list_attendance_by_date_impl(a, day).await.unwrap();
        assert_eq!(list.len(), 1);
        let merged = storage.get_attendance_impl(a, first.id).await.unwrap().unwrap();
        assert_eq!(merged.marked_by, Some(9));
    }

    #[tokio::test]
    async fn test_student_month_range_is_half_open() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "range").await;
        let student = seed_student(&storage, a, "범위").await;

        for (m, d) in [(2, 28), (3, 1), (3, 31), (4, 1)] {
            let date = NaiveDate::from_ymd_opt(2025, m, d).unwrap();
            storage
                .upsert_attendance_impl(record(a, student.id, date, AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let rows = storage
            .list_student_attendance_impl(a, student.id, from, to)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[tokio::test]
    async fn test_update_is_scoped_by_academy() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "upd").await;
        let b = seed_academy(&storage, "oth").await;
        let student = seed_student(&storage, a, "학생").await;
        let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let row = storage
            .upsert_attendance_impl(record(a, student.id, day, AttendanceStatus::Absent))
            .await
            .unwrap();

        let update = UpdateAttendanceRequest {
            status: Some(AttendanceStatus::Excused),
            ..Default::default()
        };
        assert!(
            storage
                .update_attendance_impl(b, row.id, update.clone())
                .await
                .unwrap()
                .is_none()
        );
        let updated = storage.update_attendance_impl(a, row.id, update).await.unwrap().unwrap();
        assert_eq!(updated.status, AttendanceStatus::Excused);
    }

    #[tokio::test]
    async fn test_qr_code_deactivate() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "qr").await;
        let b = seed_academy(&storage, "qr2").await;

        let qr = storage
            .create_qr_code_impl(a, "CODE123", "attendance", None, 1)
            .await
            .unwrap();
        assert!(storage.create_qr_code_impl(a, "CODE123", "attendance", None, 1).await.is_err());

        assert!(!storage.deactivate_qr_code_impl(b, qr.id).await.unwrap());
        assert!(storage.deactivate_qr_code_impl(a, qr.id).await.unwrap());

        let found = storage.get_qr_code_by_code_impl("CODE123").await.unwrap().unwrap();
        assert!(!found.is_active);
        assert_eq!(storage.list_qr_codes_impl(a).await.unwrap().len(), 1);
    }
}
