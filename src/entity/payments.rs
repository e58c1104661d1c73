//! 收款记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub billing_id: Option<i64>,
    pub amount: i64,
    pub payment_method: String,
    pub status: String,
    pub paid_at: i64,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
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
    pub fn into_payment(self) -> crate::models::billing::entities::Payment {
        use crate::models::billing::entities::{Payment, PaymentMethod, PaymentStatus};

        Payment {
            id: self.id,
            academy_id: self.academy_id,
            student_id: self.student_id,
            billing_id: self.billing_id,
            amount: self.amount,
            payment_method: self
                .payment_method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            status: self
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Completed),
            paid_at: super::to_datetime(self.paid_at),
            notes: self.notes,
            created_by: self.created_by,
        }
    }
}
