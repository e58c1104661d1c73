use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 账单状态
    pub enum BillingStatus("账单状态", "../frontend/src/types/generated/billing.ts") {
        Pending => "pending",
        Partial => "partial",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

impl BillingStatus {
    /// 根据已付金额推导状态，已取消的账单保持不变
    pub fn from_amounts(current: BillingStatus, amount: i64, paid_amount: i64) -> BillingStatus {
        if current == BillingStatus::Cancelled {
            BillingStatus::Cancelled
        } else if paid_amount >= amount {
            BillingStatus::Paid
        } else if paid_amount > 0 {
            BillingStatus::Partial
        } else if current == BillingStatus::Overdue {
            BillingStatus::Overdue
        } else {
            BillingStatus::Pending
        }
    }
}

string_enum! {
    /// 支付方式
    pub enum PaymentMethod("支付方式", "../frontend/src/types/generated/billing.ts") {
        Card => "card",
        Cash => "cash",
        Transfer => "transfer",
    }
}

string_enum! {
    /// 收款状态
    pub enum PaymentStatus("收款状态", "../frontend/src/types/generated/billing.ts") {
        Completed => "completed",
        Refunded => "refunded",
    }
}

// 账单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct Billing {
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: i64,
    pub paid_amount: i64,
    pub status: BillingStatus,
    pub billing_date: chrono::NaiveDate,
    pub due_date: Option<chrono::NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    pub memo: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 收款记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/billing.ts")]
pub struct Payment {
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub billing_id: Option<i64>,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: chrono::DateTime<chrono::Utc>,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_amounts() {
        use BillingStatus::*;
        assert_eq!(BillingStatus::from_amounts(Pending, 100_000, 0), Pending);
        assert_eq!(BillingStatus::from_amounts(Pending, 100_000, 30_000), Partial);
        assert_eq!(BillingStatus::from_amounts(Partial, 100_000, 100_000), Paid);
        assert_eq!(BillingStatus::from_amounts(Pending, 100_000, 120_000), Paid);
        assert_eq!(BillingStatus::from_amounts(Overdue, 100_000, 0), Overdue);
        assert_eq!(BillingStatus::from_amounts(Cancelled, 100_000, 100_000), Cancelled);
    }
}
