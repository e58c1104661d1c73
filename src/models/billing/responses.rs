use serde::Serialize;
use ts_rs::TS;

use super::entities::{Billing, Payment};
use crate::models::common::PaginationInfo;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct BillingRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub billing: Billing,
    pub student_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct BillingListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<BillingRecord>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct PaymentRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub payment: Payment,
    pub student_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct PaymentListResponse {
    pub items: Vec<PaymentRecord>,
}

// 本月收费统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct BillingStats {
    pub month: String,
    pub monthly_revenue: i64,
    pub payment_count: i64,
    /// 未结清账单的剩余金额
    pub outstanding_amount: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct StudentBillingResponse {
    pub items: Vec<Billing>,
}
