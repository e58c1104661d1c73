use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web::Bytes};
use futures_util::{Stream, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AcademyError;
use crate::models::{
    ApiResponse, ErrorCode,
    files::UploadedFileResponse,
    homeworks::{requests::PresignUploadRequest, responses::PresignUploadResponse},
};
use crate::services::common::{current_user, validation_error};
use crate::utils::file_magic::{extension_of, mime_for_extension, validate_magic_bytes};

const UPLOAD_DIR_PREFIX: &str = "homework";

fn upload_error(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}", AcademyError::file_operation(format!("{err}")));
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        "File upload failed",
    ))
}

/// 扩展名需在允许列表中
fn allowed_extension(file_name: &str) -> Option<String> {
    let extension = extension_of(file_name)?;
    AppConfig::get()
        .upload
        .allowed_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&extension))
        .then_some(extension)
}

pub(crate) fn new_file_key(extension: &str) -> String {
    format!("{UPLOAD_DIR_PREFIX}/{}{extension}", Uuid::new_v4())
}

fn file_path(file_key: &str) -> PathBuf {
    Path::new(&AppConfig::get().upload.dir).join(file_key)
}

/// 写入失败的原因
#[derive(Debug)]
enum WriteError {
    AlreadyExists,
    ContentMismatch,
    TooLarge,
    Empty,
    Io(String),
}

impl WriteError {
    fn into_response(self) -> HttpResponse {
        match self {
            WriteError::AlreadyExists => HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::FileAlreadyExists,
                "File already exists",
            )),
            WriteError::ContentMismatch => upload_error(
                ErrorCode::FileTypeNotAllowed,
                "File content does not match its extension",
            ),
            WriteError::TooLarge => {
                upload_error(ErrorCode::FileTooLarge, "File size exceeds the limit")
            }
            WriteError::Empty => upload_error(ErrorCode::FileNotFound, "Uploaded file is empty"),
            WriteError::Io(e) => upload_failed(e),
        }
    }
}

/// 将分块写入新文件，返回写入的字节数
///
/// 首个分块通过魔术字节校验后才创建文件；目标已存在时不覆盖。
/// 只有本次创建的文件会在失败时删除。
async fn write_new_file<S, E>(
    path: &Path,
    extension: &str,
    max_size: usize,
    mut chunks: S,
) -> Result<usize, WriteError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let first = match chunks.next().await {
        Some(Ok(data)) => data,
        Some(Err(e)) => return Err(WriteError::Io(e.to_string())),
        None => return Err(WriteError::Empty),
    };
    if !validate_magic_bytes(&first, extension) {
        return Err(WriteError::ContentMismatch);
    }
    if first.len() > max_size {
        return Err(WriteError::TooLarge);
    }

    let file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(WriteError::AlreadyExists);
        }
        Err(e) => return Err(WriteError::Io(e.to_string())),
    };

    let result = copy_chunks(file, first, chunks, max_size).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn copy_chunks<S, E>(
    mut file: tokio::fs::File,
    first: Bytes,
    mut chunks: S,
    max_size: usize,
) -> Result<usize, WriteError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut written = first.len();
    file.write_all(&first)
        .await
        .map_err(|e| WriteError::Io(e.to_string()))?;

    while let Some(chunk) = chunks.next().await {
        let data = chunk.map_err(|e| WriteError::Io(e.to_string()))?;
        written += data.len();
        if written > max_size {
            return Err(WriteError::TooLarge);
        }
        file.write_all(&data)
            .await
            .map_err(|e| WriteError::Io(e.to_string()))?;
    }

    file.flush()
        .await
        .map_err(|e| WriteError::Io(e.to_string()))?;
    Ok(written)
}

pub async fn presign_upload(
    request: &HttpRequest,
    data: PresignUploadRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = current_user(request) {
        return Ok(resp);
    }

    let file_name = data.file_name.trim();
    if file_name.is_empty() {
        return Ok(validation_error("file_name is required"));
    }
    let Some(extension) = allowed_extension(file_name) else {
        return Ok(upload_error(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed",
        ));
    };

    let file_key = new_file_key(&extension);
    let response = PresignUploadResponse {
        upload_url: format!("/api/v1/homeworks/uploads/file/{file_key}"),
        public_url: format!("/uploads/{file_key}"),
        file_key,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Upload URL issued successfully",
    )))
}

pub async fn upload_file(
    request: &HttpRequest,
    file_key: String,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if !file_key.starts_with(&format!("{UPLOAD_DIR_PREFIX}/")) {
        return Ok(validation_error("Invalid file key"));
    }
    let Some(extension) = allowed_extension(&file_key) else {
        return Ok(upload_error(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed",
        ));
    };

    let max_size = AppConfig::get().upload.max_size;
    let path = file_path(&file_key);
    if let Some(parent) = path.parent()
        && let Err(e) = tokio::fs::create_dir_all(parent).await
    {
        return Ok(upload_failed(e));
    }

    let mut original_name = None;
    let mut file_size: usize = 0;
    let mut file_uploaded = false;

    while let Ok(Some(field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(validation_error("Only one file can be uploaded at a time"));
        }
        file_uploaded = true;
        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        file_size = match write_new_file(&path, &extension, max_size, field).await {
            Ok(size) => size,
            Err(e) => return Ok(e.into_response()),
        };
    }

    if !file_uploaded {
        return Ok(upload_error(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    }

    tracing::info!(
        "File {} ({} bytes) uploaded by {} {}",
        file_key,
        file_size,
        user.role,
        user.id
    );

    let response = UploadedFileResponse {
        file_name: original_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| file_key.rsplit('/').next().unwrap_or_default().to_string()),
        file_url: format!("/uploads/{file_key}"),
        file_size: file_size as i64,
        mime_type: Some(mime_for_extension(&extension).to_string()),
        file_key,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "File uploaded successfully",
    )))
}

/// 读取已上传的文件
pub async fn serve_file(file_key: String) -> ActixResult<HttpResponse> {
    let path = file_path(&file_key);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            tracing::error!("{}", AcademyError::file_operation(format!("{e}")));
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )));
        }
    };

    let content_type = extension_of(&file_key)
        .map(|ext| mime_for_extension(&ext))
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header((header::CACHE_CONTROL, "private, max-age=3600"))
        .insert_header(("X-Content-Type-Options", "nosniff"))
        .body(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::extractor::is_safe_file_key;
    use futures_util::stream;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Unpin {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p)))
                .collect::<Vec<_>>(),
        )
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("academy-upload-{name}-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_new_file_key_is_safe() {
        let key = new_file_key(".pdf");
        assert!(key.starts_with("homework/"));
        assert!(key.ends_with(".pdf"));
        assert!(is_safe_file_key(&key));
    }

    #[actix_web::test]
    async fn test_write_new_file() {
        let dir = scratch_dir("new");
        let path = dir.join("report.pdf");

        let size = write_new_file(&path, ".pdf", 1024, chunks(&[b"%PDF-1.7\n", b"body"]))
            .await
            .unwrap();
        assert_eq!(size, 13);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7\nbody".to_vec());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[actix_web::test]
    async fn test_existing_file_is_never_overwritten_or_removed() {
        let dir = scratch_dir("existing");
        let path = dir.join("submitted.pdf");
        std::fs::write(&path, b"%PDF-original").unwrap();

        // 内容不匹配：拒绝且原文件保留
        let err = write_new_file(&path, ".pdf", 1024, chunks(&[b"NOT A PDF"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::ContentMismatch));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-original".to_vec());

        // 合法内容写入已存在的 key：409
        let err = write_new_file(&path, ".pdf", 1024, chunks(&[b"%PDF-replacement"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::AlreadyExists));
        assert_eq!(
            err.into_response().status(),
            actix_web::http::StatusCode::CONFLICT
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-original".to_vec());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[actix_web::test]
    async fn test_oversized_upload_removes_only_its_own_file() {
        let dir = scratch_dir("oversized");
        let path = dir.join("big.pdf");

        let err = write_new_file(&path, ".pdf", 8, chunks(&[b"%PDF-1.7", b"more bytes"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::TooLarge));
        assert!(!path.exists());

        let err = write_new_file(&path, ".pdf", 8, chunks(&[])).await.unwrap_err();
        assert!(matches!(err, WriteError::Empty));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
