use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::billings::{ActiveModel, Column, Entity as Billings};
use crate::entity::payments::{
    ActiveModel as PaymentActiveModel, Column as PaymentColumn, Entity as Payments,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    billing::{
        entities::{Billing, BillingStatus, Payment, PaymentStatus},
        requests::{
            BillingListQuery, CreateBillingRequest, CreatePaymentRequest, UpdateBillingRequest,
        },
        responses::{BillingListResponse, BillingRecord, BillingStats, PaymentRecord},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 学生 ID 到姓名的映射
async fn student_names<C: ConnectionTrait>(db: &C, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
    let rows = Students::find()
        .filter(StudentColumn::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询学生失败: {e}")))?;

    Ok(rows.into_iter().map(|s| (s.id, s.name)).collect())
}

impl SeaOrmStorage {
    /// 创建账单，开票日期默认今天
    pub async fn create_billing_impl(
        &self,
        academy_id: i64,
        req: CreateBillingRequest,
    ) -> Result<Billing> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academy_id: Set(academy_id),
            student_id: Set(req.student_id),
            title: Set(req.title),
            description: Set(req.description),
            amount: Set(req.amount),
            paid_amount: Set(0),
            status: Set(BillingStatus::Pending.to_string()),
            billing_date: Set(req.billing_date.unwrap_or_else(crate::utils::time::today)),
            due_date: Set(req.due_date),
            payment_method: Set(None),
            paid_at: Set(None),
            memo: Set(req.memo),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建账单失败: {e}")))?;

        Ok(result.into_billing())
    }

    pub async fn get_billing_impl(&self, academy_id: i64, id: i64) -> Result<Option<Billing>> {
        let result = Billings::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账单失败: {e}")))?;

        Ok(result.map(|m| m.into_billing()))
    }

    /// 分页列出账单，最新的在前
    pub async fn list_billings_with_pagination_impl(
        &self,
        query: BillingListQuery,
    ) -> Result<BillingListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Billings::find().filter(Column::AcademyId.eq(query.academy_id));
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账单总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账单页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账单列表失败: {e}")))?;

        let names = student_names(&self.db, rows.iter().map(|r| r.student_id).collect()).await?;

        Ok(BillingListResponse {
            items: rows
                .into_iter()
                .map(|m| BillingRecord {
                    student_name: names.get(&m.student_id).cloned().unwrap_or_default(),
                    billing: m.into_billing(),
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 部分更新账单
    ///
    /// 金额变化且未显式指定状态时按已付金额重新推导状态。
    pub async fn update_billing_impl(
        &self,
        academy_id: i64,
        id: i64,
        update: UpdateBillingRequest,
    ) -> Result<Option<Billing>> {
        let Some(row) = Billings::find_by_id(id)
            .filter(Column::AcademyId.eq(academy_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账单失败: {e}")))?
        else {
            return Ok(None);
        };

        let current_status = row
            .status
            .parse::<BillingStatus>()
            .unwrap_or(BillingStatus::Pending);
        let amount = update.amount.unwrap_or(row.amount);
        let paid_amount = update.paid_amount.unwrap_or(row.paid_amount);
        let amounts_changed = update.amount.is_some() || update.paid_amount.is_some();

        let mut model: ActiveModel = row.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        model.amount = Set(amount);
        model.paid_amount = Set(paid_amount);
        match update.status {
            Some(status) => model.status = Set(status.to_string()),
            None if amounts_changed => {
                let status = BillingStatus::from_amounts(current_status, amount, paid_amount);
                model.status = Set(status.to_string());
            }
            None => {}
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date));
        }
        if let Some(method) = update.payment_method {
            model.payment_method = Set(Some(method.to_string()));
        }
        if let Some(paid_at) = update.paid_at {
            model.paid_at = Set(Some(paid_at.timestamp()));
        }
        if let Some(memo) = update.memo {
            model.memo = Set(Some(memo));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新账单失败: {e}")))?;

        Ok(Some(result.into_billing()))
    }

    /// 删除账单，关联的收款记录保留（billing_id 置空）
    pub async fn delete_billing_impl(&self, academy_id: i64, id: i64) -> Result<bool> {
        let result = Billings::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::AcademyId.eq(academy_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除账单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_student_billings_impl(
        &self,
        academy_id: i64,
        student_id: i64,
    ) -> Result<Vec<Billing>> {
        let rows = Billings::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::BillingDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生账单失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_billing()).collect())
    }

    /// 登记收款
    ///
    /// 指定账单时，账单必须属于同一学院和同一学生，已付金额与状态在同一事务内更新。
    pub async fn create_payment_impl(
        &self,
        academy_id: i64,
        created_by: i64,
        req: CreatePaymentRequest,
    ) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        if let Some(billing_id) = req.billing_id {
            let billing = Billings::find_by_id(billing_id)
                .filter(Column::AcademyId.eq(academy_id))
                .one(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("查询账单失败: {e}")))?
                .ok_or_else(|| AcademyError::not_found("Billing not found"))?;

            if billing.student_id != req.student_id {
                return Err(AcademyError::validation(
                    "Billing does not belong to the student",
                ));
            }

            let current = billing
                .status
                .parse::<BillingStatus>()
                .unwrap_or(BillingStatus::Pending);
            if current == BillingStatus::Cancelled {
                return Err(AcademyError::validation(
                    "Cannot record a payment against a cancelled billing",
                ));
            }
            let paid_amount = billing.paid_amount + req.amount;
            let status = BillingStatus::from_amounts(current, billing.amount, paid_amount);

            let mut model: ActiveModel = billing.into();
            model.paid_amount = Set(paid_amount);
            model.status = Set(status.to_string());
            model.payment_method = Set(Some(req.payment_method.to_string()));
            if status == BillingStatus::Paid {
                model.paid_at = Set(Some(now));
            }
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("更新账单失败: {e}")))?;
        }

        let payment = PaymentActiveModel {
            academy_id: Set(academy_id),
            student_id: Set(req.student_id),
            billing_id: Set(req.billing_id),
            amount: Set(req.amount),
            payment_method: Set(req.payment_method.to_string()),
            status: Set(PaymentStatus::Completed.to_string()),
            paid_at: Set(now),
            notes: Set(req.notes),
            created_by: Set(Some(created_by)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建收款记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(payment.into_payment())
    }

    /// 最近的收款记录
    pub async fn list_payments_impl(&self, academy_id: i64, limit: u64) -> Result<Vec<PaymentRecord>> {
        let rows = Payments::find()
            .filter(PaymentColumn::AcademyId.eq(academy_id))
            .order_by_desc(PaymentColumn::PaidAt)
            .order_by_desc(PaymentColumn::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询收款记录失败: {e}")))?;

        let names = student_names(&self.db, rows.iter().map(|r| r.student_id).collect()).await?;

        Ok(rows
            .into_iter()
            .map(|m| PaymentRecord {
                student_name: names.get(&m.student_id).cloned().unwrap_or_default(),
                payment: m.into_payment(),
            })
            .collect())
    }

    /// [from_ts, to_ts) 内已完成的收款合计，以及未结清账单的剩余金额
    pub async fn billing_stats_impl(
        &self,
        academy_id: i64,
        month: &str,
        from_ts: i64,
        to_ts: i64,
    ) -> Result<BillingStats> {
        let payments = Payments::find()
            .filter(PaymentColumn::AcademyId.eq(academy_id))
            .filter(PaymentColumn::Status.eq(PaymentStatus::Completed.to_string()))
            .filter(PaymentColumn::PaidAt.gte(from_ts))
            .filter(PaymentColumn::PaidAt.lt(to_ts))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计收款失败: {e}")))?;

        let open_statuses = [
            BillingStatus::Pending.to_string(),
            BillingStatus::Partial.to_string(),
            BillingStatus::Overdue.to_string(),
        ];
        let open_billings = Billings::find()
            .filter(Column::AcademyId.eq(academy_id))
            .filter(Column::Status.is_in(open_statuses))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计未收金额失败: {e}")))?;

        Ok(BillingStats {
            month: month.to_string(),
            monthly_revenue: payments.iter().map(|p| p.amount).sum(),
            payment_count: payments.len() as i64,
            outstanding_amount: open_billings
                .iter()
                .map(|b| (b.amount - b.paid_amount).max(0))
                .sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_academy, seed_student};
    use crate::errors::AcademyError;
    use crate::models::billing::{
        entities::{BillingStatus, PaymentMethod},
        requests::{BillingListQuery, CreateBillingRequest, CreatePaymentRequest, UpdateBillingRequest},
    };

    fn billing(student_id: i64, amount: i64) -> CreateBillingRequest {
        CreateBillingRequest {
            student_id,
            title: "3월 수강료".to_string(),
            description: None,
            amount,
            billing_date: None,
            due_date: None,
            memo: None,
        }
    }

    fn payment(student_id: i64, billing_id: Option<i64>, amount: i64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            student_id,
            amount,
            payment_method: PaymentMethod::Card,
            billing_id,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_payments_move_billing_to_partial_then_paid() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "bill").await;
        let student = seed_student(&storage, a, "수강생").await;
        let bill = storage.create_billing_impl(a, billing(student.id, 300_000)).await.unwrap();
        assert_eq!(bill.status, BillingStatus::Pending);

        storage
            .create_payment_impl(a, 1, payment(student.id, Some(bill.id), 100_000))
            .await
            .unwrap();
        let partial = storage.get_billing_impl(a, bill.id).await.unwrap().unwrap();
        assert_eq!(partial.status, BillingStatus::Partial);
        assert_eq!(partial.paid_amount, 100_000);
        assert!(partial.paid_at.is_none());

        storage
            .create_payment_impl(a, 1, payment(student.id, Some(bill.id), 200_000))
            .await
            .unwrap();
        let paid = storage.get_billing_impl(a, bill.id).await.unwrap().unwrap();
        assert_eq!(paid.status, BillingStatus::Paid);
        assert!(paid.paid_at.is_some());
        assert_eq!(paid.payment_method, Some(PaymentMethod::Card));

        let now = chrono::Utc::now().timestamp();
        let stats = storage
            .billing_stats_impl(a, "2025-03", now - 60, now + 60)
            .await
            .unwrap();
        assert_eq!(stats.monthly_revenue, 300_000);
        assert_eq!(stats.payment_count, 2);
        assert_eq!(stats.outstanding_amount, 0);
    }

    #[tokio::test]
    async fn test_payment_rejects_foreign_billing() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "pa").await;
        let b = seed_academy(&storage, "pb").await;
        let student_a = seed_student(&storage, a, "A").await;
        let student_b = seed_student(&storage, b, "B").await;
        let other = seed_student(&storage, a, "C").await;
        let bill_b = storage.create_billing_impl(b, billing(student_b.id, 50_000)).await.unwrap();
        let bill_a = storage.create_billing_impl(a, billing(student_a.id, 50_000)).await.unwrap();

        let err = storage
            .create_payment_impl(a, 1, payment(student_a.id, Some(bill_b.id), 10_000))
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::NotFound(_)));

        let err = storage
            .create_payment_impl(a, 1, payment(other.id, Some(bill_a.id), 10_000))
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::Validation(_)));

        // 事务回滚，没有留下收款记录
        assert!(storage.list_payments_impl(a, 10).await.unwrap().is_empty());
        let stats = storage.billing_stats_impl(a, "m", 0, i64::MAX).await.unwrap();
        assert_eq!(stats.outstanding_amount, 50_000);
    }

    #[tokio::test]
    async fn test_payment_rejects_cancelled_billing() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "pc").await;
        let student = seed_student(&storage, a, "취소").await;
        let bill = storage.create_billing_impl(a, billing(student.id, 80_000)).await.unwrap();
        storage
            .update_billing_impl(
                a,
                bill.id,
                UpdateBillingRequest {
                    status: Some(BillingStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let err = storage
            .create_payment_impl(a, 1, payment(student.id, Some(bill.id), 80_000))
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::Validation(_)));

        let after = storage.get_billing_impl(a, bill.id).await.unwrap().unwrap();
        assert_eq!(after.status, BillingStatus::Cancelled);
        assert_eq!(after.paid_amount, 0);
        assert!(storage.list_payments_impl(a, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_and_update_recomputes_status() {
        let storage = memory_storage().await;
        let a = seed_academy(&storage, "bl").await;
        let s1 = seed_student(&storage, a, "하나").await;
        let s2 = seed_student(&storage, a, "둘").await;
        let bill = storage.create_billing_impl(a, billing(s1.id, 100_000)).await.unwrap();
        storage.create_billing_impl(a, billing(s2.id, 100_000)).await.unwrap();

        let updated = storage
            .update_billing_impl(
                a,
                bill.id,
                UpdateBillingRequest {
                    paid_amount: Some(40_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, BillingStatus::Partial);

        let list = storage
            .list_billings_with_pagination_impl(BillingListQuery {
                academy_id: a,
                page: 1,
                size: 10,
                status: Some(BillingStatus::Partial),
                student_id: None,
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].student_name, "하나");

        let by_student = storage.list_student_billings_impl(a, s2.id).await.unwrap();
        assert_eq!(by_student.len(), 1);

        assert!(storage.delete_billing_impl(a, bill.id).await.unwrap());
        assert!(storage.get_billing_impl(a, bill.id).await.unwrap().is_none());
    }
}
