//! 学生邀请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_invites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub expires_at: i64,
    pub used_at: Option<i64>,
    pub used_by_user_account_id: Option<i64>,
    pub created_at: i64,
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
    pub fn into_invite(self) -> crate::models::students::entities::StudentInvite {
        use super::to_datetime;

        crate::models::students::entities::StudentInvite {
            id: self.id,
            student_id: self.student_id,
            token: self.token,
            expires_at: to_datetime(self.expires_at),
            used_at: self.used_at.map(to_datetime),
            used_by_user_account_id: self.used_by_user_account_id,
            created_at: to_datetime(self.created_at),
        }
    }
}
