use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::defaults::simulated_summary,
    errors::{AppError, AppResult},
    models::{
        domain::{Upload, UploadStatus},
        dto::{request::RegisterUploadRequest, response::Listing},
    },
    repositories::UploadRepository,
    services::degraded_notice,
};

/// Uploads and their summaries. Summaries are produced by a simulated
/// generator; no file content is read.
pub struct SummaryService {
    repository: Arc<dyn UploadRepository>,
}

impl SummaryService {
    pub fn new(repository: Arc<dyn UploadRepository>) -> Self {
        Self { repository }
    }

    pub async fn register_upload(&self, request: RegisterUploadRequest) -> AppResult<Upload> {
        request.validate()?;
        let upload = self.repository.create(request.into_new_upload()).await?;
        log::info!("Registered upload {} ({})", upload.id, upload.name);
        Ok(upload)
    }

    pub async fn summarize_upload(&self, id: &str) -> AppResult<Upload> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::NotFound("Upload not found".to_string()));
        }

        let upload = self.repository.find_by_id(id).await?;
        if upload.status == UploadStatus::Summarized {
            return Ok(upload);
        }

        let summary = simulated_summary(&upload.name);
        self.repository.update_summary(id, &summary).await
    }

    pub async fn list_summaries(&self) -> Listing<Upload> {
        match self.repository.list_by_status(UploadStatus::Summarized).await {
            Ok(uploads) => Listing::ok(uploads),
            Err(err) => Listing::degraded(degraded_notice("Summaries", &err)),
        }
    }
}
