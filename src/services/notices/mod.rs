pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod publish;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notices::requests::{CreateNoticeRequest, UpdateNoticeRequest};
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct NoticeService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoticeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 教职工看到全部公告，学生只看到面向自己班级的已发布公告
    pub async fn list_notices(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_notices(self, request).await
    }

    pub async fn create_notice(
        &self,
        request: &HttpRequest,
        data: CreateNoticeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notice(self, request, data).await
    }

    pub async fn get_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_notice(self, request, notice_id).await
    }

    pub async fn update_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
        data: UpdateNoticeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_notice(self, request, notice_id, data).await
    }

    pub async fn publish_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::publish_notice(self, request, notice_id).await
    }

    pub async fn delete_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notice(self, request, notice_id).await
    }
}
