//! 账单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "billings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: i64,
    pub paid_amount: i64,
    pub status: String,
    pub billing_date: Date,
    pub due_date: Option<Date>,
    pub payment_method: Option<String>,
    pub paid_at: Option<i64>,
    pub memo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_billing(self) -> crate::models::billing::entities::Billing {
        use super::to_datetime;
        use crate::models::billing::entities::{Billing, BillingStatus, PaymentMethod};

        Billing {
            id: self.id,
            academy_id: self.academy_id,
            student_id: self.student_id,
            title: self.title,
            description: self.description,
            amount: self.amount,
            paid_amount: self.paid_amount,
            status: self
                .status
                .parse::<BillingStatus>()
                .unwrap_or(BillingStatus::Pending),
            billing_date: self.billing_date,
            due_date: self.due_date,
            payment_method: self
                .payment_method
                .and_then(|m| m.parse::<PaymentMethod>().ok()),
            paid_at: self.paid_at.map(to_datetime),
            memo: self.memo,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
