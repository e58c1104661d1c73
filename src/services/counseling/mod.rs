pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::entities::CurrentUser;
use crate::models::counseling::{
    CounselingNote, CounselingQueryParams, CreateCounselingRequest, UpdateCounselingRequest,
};
use crate::storage::Storage;

use super::common::storage_from_request;

/// 保密记录仅咨询人本人和管理员可见
pub(crate) fn can_view(user: &CurrentUser, note: &CounselingNote) -> bool {
    !note.is_confidential || user.is_admin() || note.counselor_id == Some(user.id)
}

pub struct CounselingService {
    storage: Option<Arc<dyn Storage>>,
}

impl CounselingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    pub async fn list_counseling(
        &self,
        request: &HttpRequest,
        query: CounselingQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_counseling(self, request, query).await
    }

    pub async fn create_counseling(
        &self,
        request: &HttpRequest,
        data: CreateCounselingRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_counseling(self, request, data).await
    }

    pub async fn get_counseling(
        &self,
        request: &HttpRequest,
        counseling_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_counseling(self, request, counseling_id).await
    }

    pub async fn update_counseling(
        &self,
        request: &HttpRequest,
        counseling_id: i64,
        data: UpdateCounselingRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_counseling(self, request, counseling_id, data).await
    }

    pub async fn delete_counseling(
        &self,
        request: &HttpRequest,
        counseling_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_counseling(self, request, counseling_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::{NaiveDate, Utc};

    fn user(id: i64, role: UserRole) -> CurrentUser {
        CurrentUser {
            id,
            academy_id: 1,
            role,
            name: format!("staff{id}"),
            email: None,
            user_account_id: None,
        }
    }

    fn note(counselor_id: i64, is_confidential: bool) -> CounselingNote {
        let now = Utc::now();
        CounselingNote {
            id: 1,
            academy_id: 1,
            student_id: 10,
            counselor_id: Some(counselor_id),
            counseling_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            duration: Some(30),
            counseling_type: "general".to_string(),
            topic: "진로".to_string(),
            content: "상담 내용".to_string(),
            action_items: None,
            follow_up_required: false,
            is_confidential,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_confidential_visibility() {
        let counselor = user(2, UserRole::Teacher);
        let other = user(3, UserRole::Teacher);
        let admin = user(1, UserRole::Admin);

        assert!(can_view(&other, &note(2, false)));
        assert!(can_view(&counselor, &note(2, true)));
        assert!(can_view(&admin, &note(2, true)));
        assert!(!can_view(&other, &note(2, true)));
    }
}
