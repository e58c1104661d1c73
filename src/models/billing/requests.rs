use serde::Deserialize;
use ts_rs::TS;

use super::entities::{BillingStatus, PaymentMethod};
use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};

// 账单列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct BillingQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<BillingStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
}

// 账单列表查询（用于存储层）
#[derive(Debug, Clone)]
pub struct BillingListQuery {
    pub academy_id: i64,
    pub page: u64,
    pub size: u64,
    pub status: Option<BillingStatus>,
    pub student_id: Option<i64>,
}

// 创建账单
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct CreateBillingRequest {
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: i64,
    pub billing_date: Option<chrono::NaiveDate>,
    pub due_date: Option<chrono::NaiveDate>,
    pub memo: Option<String>,
}

// 更新账单
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct UpdateBillingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub paid_amount: Option<i64>,
    pub status: Option<BillingStatus>,
    pub due_date: Option<chrono::NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    pub memo: Option<String>,
}

// 登记收款
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub billing_id: Option<i64>,
    pub notes: Option<String>,
}
