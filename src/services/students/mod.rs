pub mod create;
pub mod get;
pub mod invite;
pub mod list;
pub mod profile;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 学生端首页
    pub async fn get_my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_my_profile(self, request).await
    }

    // 创建学生并发放邀请
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, update).await
    }

    // 软删除
    pub async fn delete_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        update::deactivate_student(self, request, id).await
    }

    // 重新发放邀请，旧邀请失效
    pub async fn issue_invite(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        invite::issue_invite(self, request, id).await
    }
}
