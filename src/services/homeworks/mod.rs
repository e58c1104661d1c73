pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod student;
pub mod submissions;
pub mod update;
pub mod uploads;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::homeworks::requests::{
    CreateHomeworkRequest, GradeSubmissionRequest, PresignUploadRequest, SubmitHomeworkRequest,
    UpdateHomeworkRequest,
};
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct HomeworkService {
    storage: Option<Arc<dyn Storage>>,
}

impl HomeworkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 创建作业并生成对象名单
    pub async fn create_homework(
        &self,
        request: &HttpRequest,
        data: CreateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_homework(self, request, data).await
    }

    pub async fn list_homeworks(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_homeworks(self, request).await
    }

    pub async fn get_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_homework(self, request, homework_id).await
    }

    pub async fn update_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        data: UpdateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_homework(self, request, homework_id, data).await
    }

    pub async fn delete_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_homework(self, request, homework_id).await
    }

    // 对象学生及提交情况
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, homework_id).await
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::grade_submission(self, request, submission_id, data).await
    }

    pub async fn list_my_homeworks(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::list_my_homeworks(self, request).await
    }

    pub async fn submit_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        data: SubmitHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        student::submit_homework(self, request, homework_id, data).await
    }

    pub async fn presign_upload(
        &self,
        request: &HttpRequest,
        data: PresignUploadRequest,
    ) -> ActixResult<HttpResponse> {
        uploads::presign_upload(request, data).await
    }

    pub async fn upload_file(
        &self,
        request: &HttpRequest,
        file_key: String,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        uploads::upload_file(request, file_key, payload).await
    }

    pub async fn serve_file(&self, file_key: String) -> ActixResult<HttpResponse> {
        uploads::serve_file(file_key).await
    }
}
